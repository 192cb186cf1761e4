#![cfg(target_arch = "wasm32")]
use crate::constants::{CANVAS_ID, RESET_BUTTON_ID};
use instant::Instant;
use scene_core::{CameraRig, LoadingAnimation, RenderCamera, Scene, SceneConfig, TreeGeometry};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod controls;
mod dom;
mod events;
mod frame;
mod loader;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

// Listeners come off when the page goes away
fn wire_pagehide(rig: Rc<RefCell<CameraRig<events::DomInputSource>>>) {
    let closure = Closure::wrap(Box::new(move || {
        if let Ok(mut r) = rig.try_borrow_mut() {
            r.dispose();
            log::info!("[camera] disposed");
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn marker_counts(scene: &Scene) -> (usize, usize) {
    let markers = scene.markers().markers();
    let activated = markers.iter().filter(|m| m.is_activated()).count();
    (markers.len() - activated, activated)
}

/// Download the model, then install it (or the placeholder) into the scene.
fn load_tree(
    document: web::Document,
    scene: Rc<RefCell<Scene>>,
    loading: Rc<RefCell<LoadingAnimation>>,
) {
    let (url, params) = {
        let s = scene.borrow();
        (s.config().tree.model_url.clone(), s.config().tree.clone())
    };
    log::info!("[tree] loading {url}");
    loader::fetch_model(
        &url,
        move |event| loading.borrow_mut().on_load_event(event),
        move |result| {
            let geometry =
                TreeGeometry::resolve(result.and_then(|b| scene_core::decode_positions(&b)), &params);
            let Ok(mut s) = scene.try_borrow_mut() else {
                log::error!("[tree] scene busy, dropping loaded model");
                return;
            };
            if let Err(e) = s.install_tree(geometry) {
                log::error!("[markers] {e}");
            }
            let (potential, activated) = marker_counts(&s);
            overlay::update_info_counts(&document, potential, activated);
        },
    );
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tree-scene starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let loading = Rc::new(RefCell::new(LoadingAnimation::new()));
    overlay::mount_loading(&document, loading.borrow().label());
    overlay::mount_tooltip(&document);

    let config = SceneConfig::default();
    let camera_config = config.camera.clone();
    let scene = Rc::new(RefCell::new(Scene::new(config)));

    let mut camera = RenderCamera::new(1.0);
    camera.set_viewport(canvas.width(), canvas.height());
    let source = events::DomInputSource::new(canvas.clone(), document.clone());
    let rig = CameraRig::new(camera_config, source)
        .map_err(|e| anyhow::anyhow!("camera config: {e}"))?;
    rig.controller().borrow().write_to(&mut camera);
    let controller = rig.controller();
    let rig = Rc::new(RefCell::new(rig));

    // ---------------- Interaction wiring ----------------
    let cursor = Rc::new(RefCell::new(events::CursorState::default()));
    events::wire_cursor_tracking(&canvas, cursor.clone());
    events::wire_marker_click(&canvas, scene.clone());
    events::wire_app_keydown(&document, controller.clone(), scene.clone());
    let controller_reset = controller.clone();
    dom::add_click_listener(&document, RESET_BUTTON_ID, move || {
        if let Ok(mut c) = controller_reset.try_borrow_mut() {
            c.reset();
        }
    });
    let (potential, activated) = marker_counts(&scene.borrow());
    overlay::mount_info(&document, potential, activated);
    overlay::wire_info_buttons(&document);
    wire_pagehide(rig.clone());

    load_tree(document.clone(), scene.clone(), loading.clone());

    // Initialize WebGPU
    let gpu: Option<render::GpuState> = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        rig,
        camera,
        canvas,
        document,
        cursor,
        loading,
        loading_done: false,
        tooltip_visible: false,
        gpu,
        last_instant: Instant::now(),
        uploaded_revision: None,
        scratch: Vec::new(),
    }));
    // Start RAF loop
    frame::start_loop(frame_ctx);

    Ok(())
}
