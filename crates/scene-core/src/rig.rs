//! Binds an [`InputSource`] to a shared [`CameraController`].

use crate::camera::RenderCamera;
use crate::controller::{CameraConfig, CameraController, ConfigError};
use crate::input::{InputEvent, InputSource};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub struct CameraRig<S: InputSource> {
    controller: Rc<RefCell<CameraController>>,
    source: S,
    attached: bool,
}

impl<S: InputSource> CameraRig<S> {
    pub fn new(config: CameraConfig, mut source: S) -> Result<Self, ConfigError> {
        let controller = Rc::new(RefCell::new(CameraController::new(config)?));
        let weak: Weak<RefCell<CameraController>> = Rc::downgrade(&controller);
        source.attach(Box::new(move |event: InputEvent| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            // Events arriving while the controller is borrowed are dropped.
            if let Ok(mut c) = controller.try_borrow_mut() {
                c.handle_event(event);
            };
        }));
        Ok(Self {
            controller,
            source,
            attached: true,
        })
    }

    pub fn controller(&self) -> Rc<RefCell<CameraController>> {
        self.controller.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tick(&self, camera: &mut RenderCamera) {
        if let Ok(mut c) = self.controller.try_borrow_mut() {
            c.tick(camera);
        }
    }

    pub fn reset(&self) {
        if let Ok(mut c) = self.controller.try_borrow_mut() {
            c.reset();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Remove every listener and stop the controller. Safe to call twice.
    pub fn dispose(&mut self) {
        if self.attached {
            self.source.detach();
            self.attached = false;
        }
        if let Ok(mut c) = self.controller.try_borrow_mut() {
            c.dispose();
        }
    }
}

impl<S: InputSource> Drop for CameraRig<S> {
    fn drop(&mut self) {
        if self.attached {
            self.source.detach();
            self.attached = false;
        }
    }
}
