use crate::dom;
use scene_core::{InputEvent, InputSink, InputSource, MoveKey, PointerButton};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type SharedSink = Rc<RefCell<Option<InputSink>>>;

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

/// Camera input from DOM listeners: buttons and wheel on the canvas, moves,
/// releases and keys on the document so drags survive leaving the canvas.
pub struct DomInputSource {
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    sink: SharedSink,
    listeners: Vec<Listener>,
}

impl DomInputSource {
    pub fn new(canvas: web::HtmlCanvasElement, document: web::Document) -> Self {
        Self {
            canvas,
            document,
            sink: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        }
    }

    fn listen(
        &mut self,
        target: web::EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(web::Event) + 'static,
    ) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let added = match passive {
            Some(p) => {
                let opts = web::AddEventListenerOptions::new();
                opts.set_passive(p);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                )
            }
            None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
        };
        if let Err(e) = added {
            log::warn!("[input] failed to add {kind} listener: {:?}", e);
            return;
        }
        self.listeners.push(Listener {
            target,
            kind,
            closure,
        });
    }
}

#[inline]
fn emit(sink: &SharedSink, event: InputEvent) {
    // re-entrant deliveries are dropped
    if let Ok(mut slot) = sink.try_borrow_mut() {
        if let Some(f) = slot.as_mut() {
            f(event);
        }
    }
}

impl InputSource for DomInputSource {
    fn attach(&mut self, sink: InputSink) {
        if !self.listeners.is_empty() {
            self.detach();
        }
        *self.sink.borrow_mut() = Some(sink);
        let canvas_target: web::EventTarget = self.canvas.clone().into();
        let doc_target: web::EventTarget = self.document.clone().into();

        let s = self.sink.clone();
        self.listen(canvas_target.clone(), "mousedown", None, move |ev| {
            if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                if let Some(button) = PointerButton::from_id(me.button()) {
                    emit(
                        &s,
                        InputEvent::PointerDown {
                            button,
                            position: dom::client_pos(me),
                        },
                    );
                }
            }
        });

        let s = self.sink.clone();
        self.listen(doc_target.clone(), "mousemove", None, move |ev| {
            if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                emit(
                    &s,
                    InputEvent::PointerMove {
                        position: dom::client_pos(me),
                    },
                );
            }
        });

        let s = self.sink.clone();
        self.listen(doc_target.clone(), "mouseup", None, move |ev| {
            if let Some(me) = ev.dyn_ref::<web::MouseEvent>() {
                if let Some(button) = PointerButton::from_id(me.button()) {
                    emit(&s, InputEvent::PointerUp { button });
                }
            }
        });

        // Non-passive so the page does not scroll while zooming.
        let s = self.sink.clone();
        self.listen(canvas_target.clone(), "wheel", Some(false), move |ev| {
            if let Some(we) = ev.dyn_ref::<web::WheelEvent>() {
                we.prevent_default();
                emit(
                    &s,
                    InputEvent::Wheel {
                        delta_y: we.delta_y() as f32,
                    },
                );
            }
        });

        let s = self.sink.clone();
        self.listen(doc_target.clone(), "keydown", None, move |ev| {
            if let Some(ke) = ev.dyn_ref::<web::KeyboardEvent>() {
                if let Some(key) = MoveKey::from_code(&ke.code()) {
                    emit(&s, InputEvent::Key { key, pressed: true });
                }
            }
        });

        let s = self.sink.clone();
        self.listen(doc_target, "keyup", None, move |ev| {
            if let Some(ke) = ev.dyn_ref::<web::KeyboardEvent>() {
                if let Some(key) = MoveKey::from_code(&ke.code()) {
                    emit(
                        &s,
                        InputEvent::Key {
                            key,
                            pressed: false,
                        },
                    );
                }
            }
        });

        // Right-drag pans; keep the browser menu out of the way.
        self.listen(canvas_target, "contextmenu", None, |ev| ev.prevent_default());

        log::info!("[input] attached {} listeners", self.listeners.len());
    }

    fn detach(&mut self) {
        for l in self.listeners.drain(..) {
            _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
        if let Ok(mut slot) = self.sink.try_borrow_mut() {
            *slot = None;
        }
    }
}
