use crate::controls::{app_action_for_key, AppAction};
use crate::overlay;
use scene_core::{CameraController, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_app_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    controller: &Rc<RefCell<CameraController>>,
    scene: &Rc<RefCell<Scene>>,
) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = app_action_for_key(&ev.key()) else {
        return;
    };
    match action {
        AppAction::ResetCamera => {
            if let Ok(mut c) = controller.try_borrow_mut() {
                c.reset();
                log::info!("[camera] reset");
            }
        }
        AppAction::ToggleInfo => overlay::toggle_info(document),
        AppAction::ToggleTimeOfDay => {
            if let Ok(mut s) = scene.try_borrow_mut() {
                let time = s.toggle_time_of_day();
                log::info!("[environment] time of day now {:?}", time);
            }
        }
    }
}

pub fn wire_app_keydown(
    document: &web::Document,
    controller: Rc<RefCell<CameraController>>,
    scene: Rc<RefCell<Scene>>,
) {
    let doc = document.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_app_keydown(&ev, &doc, &controller, &scene);
    }) as Box<dyn FnMut(web::KeyboardEvent)>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
