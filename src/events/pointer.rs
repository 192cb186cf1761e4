use crate::dom;
use glam::Vec2;
use scene_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Last known cursor over the canvas, read by the frame loop for hovering.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorState {
    pub client: Vec2,
    pub ndc: Option<Vec2>,
}

pub fn wire_cursor_tracking(canvas: &web::HtmlCanvasElement, cursor: Rc<RefCell<CursorState>>) {
    let canvas_move = canvas.clone();
    let cursor_move = cursor.clone();
    let on_move = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let mut c = cursor_move.borrow_mut();
        c.client = dom::client_pos(&ev);
        c.ndc = dom::pointer_ndc(&ev, &canvas_move);
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
    on_move.forget();

    let on_leave = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
        cursor.borrow_mut().ndc = None;
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = canvas.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
    on_leave.forget();
}

/// Clicking a hovered activated marker opens its page in a new tab.
pub fn wire_marker_click(canvas: &web::HtmlCanvasElement, scene: Rc<RefCell<Scene>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let url = {
            let Ok(s) = scene.try_borrow() else {
                return;
            };
            match s.markers().on_click() {
                Some(payload) => payload.url.clone(),
                None => return,
            }
        };
        log::info!("[markers] opening {url}");
        if let Some(w) = web::window() {
            if let Err(e) = w.open_with_url_and_target(&url, "_blank") {
                log::warn!("[markers] window.open failed: {:?}", e);
            }
        }
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
