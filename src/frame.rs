use crate::constants::MAX_FRAME_DT_SEC;
use crate::controls;
use crate::events::{CursorState, DomInputSource};
use crate::overlay;
use crate::render;
use instant::Instant;
use scene_core::{CameraRig, LoadingAnimation, PointVertex, RenderCamera, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scene: Rc<RefCell<Scene>>,
    pub rig: Rc<RefCell<CameraRig<DomInputSource>>>,
    pub camera: RenderCamera,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub cursor: Rc<RefCell<CursorState>>,

    pub loading: Rc<RefCell<LoadingAnimation>>,
    pub loading_done: bool,
    pub tooltip_visible: bool,

    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
    pub uploaded_revision: Option<u64>,
    pub scratch: Vec<PointVertex>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        self.tick_loading(dt_sec);

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.camera.set_viewport(w, h);
        self.rig.borrow().tick(&mut self.camera);

        let cursor = *self.cursor.borrow();
        let scene_rc = self.scene.clone();
        let Ok(mut scene) = scene_rc.try_borrow_mut() else {
            return;
        };
        match cursor.ndc {
            Some(ndc) => {
                scene.markers_mut().update_hover(ndc, &self.camera);
            }
            None => scene.markers_mut().clear_hover(),
        }
        scene.tick(dt_sec);
        self.update_tooltip(&scene, cursor);

        let Some(g) = &mut self.gpu else {
            return;
        };
        if self.uploaded_revision != Some(scene.static_revision()) {
            write_static_layers(&scene, &mut self.scratch);
            g.upload_static(&self.scratch);
            self.uploaded_revision = Some(scene.static_revision());
            log::info!("[render] static layers: {} points", self.scratch.len());
        }

        self.scratch.clear();
        scene.environment().write_beams(&mut self.scratch);
        scene.markers().write_vertices(&mut self.scratch);
        if let Some(hover) = scene.markers().hover_frame() {
            controls::write_hover_frame(&hover, &mut self.scratch);
        }
        g.upload_dynamic(&self.scratch);

        g.resize_if_needed(w, h);
        g.set_camera(&self.camera);
        if let Err(e) = g.render() {
            log::error!("render error: {:?}", e);
        }
    }
}

impl<'a> FrameContext<'a> {
    fn tick_loading(&mut self, dt_sec: f32) {
        if self.loading_done {
            return;
        }
        let mut loading = self.loading.borrow_mut();
        let finished = loading.tick(dt_sec);
        overlay::update_loading(&self.document, loading.fill_percent(), loading.opacity());
        if finished {
            overlay::remove_loading(&self.document);
            self.loading_done = true;
            log::info!("[loading] overlay removed");
        }
    }

    fn update_tooltip(&mut self, scene: &Scene, cursor: CursorState) {
        let markers = scene.markers();
        match (markers.hovered(), markers.hovered_marker()) {
            (Some(index), Some(marker)) => {
                let text = controls::tooltip_text(index, marker);
                overlay::show_tooltip(&self.document, &text, cursor.client);
                self.tooltip_visible = true;
            }
            _ if self.tooltip_visible => {
                overlay::hide_tooltip(&self.document);
                self.tooltip_visible = false;
            }
            _ => {}
        }
    }
}

/// Ground plus the tree tinted by the current lights.
fn write_static_layers(scene: &Scene, out: &mut Vec<PointVertex>) {
    out.clear();
    scene.environment().write_ground(out);
    if let Some(tree) = scene.tree() {
        let tint = scene.environment().lights().tint();
        out.extend(tree.points().iter().map(|p| {
            let mut v = *p;
            for (c, t) in v.color.iter_mut().zip(tint) {
                *c = (*c * t).min(1.0);
            }
            v
        }));
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
