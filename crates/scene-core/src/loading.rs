//! Loading screen state: fill the label, hold, fade out.

use crate::constants::{LOADING_FADE_SEC, LOADING_LABEL, LOADING_SETTLE_SEC, LOADING_STEP_PER_FRAME};
use crate::tree::LoadEvent;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LoadingPhase {
    Filling,
    /// Full; seconds spent holding.
    Settling(f32),
    /// Seconds spent fading.
    FadingOut(f32),
    Finished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadingAnimation {
    progress: f32,
    phase: LoadingPhase,
}

impl Default for LoadingAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingAnimation {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            phase: LoadingPhase::Filling,
        }
    }

    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    pub fn label(&self) -> &'static str {
        LOADING_LABEL
    }

    /// Fill level of the label in percent.
    pub fn fill_percent(&self) -> f32 {
        match self.phase {
            LoadingPhase::Filling => self.progress,
            _ => 100.0,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self.phase {
            LoadingPhase::Filling | LoadingPhase::Settling(_) => 1.0,
            LoadingPhase::FadingOut(t) => (1.0 - t / LOADING_FADE_SEC).clamp(0.0, 1.0),
            LoadingPhase::Finished => 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == LoadingPhase::Finished
    }

    /// Raise the fill to real load progress; never moves it backwards.
    pub fn set_progress(&mut self, percent: f32) {
        if percent.is_finite() && self.phase == LoadingPhase::Filling {
            self.progress = self.progress.max(percent.clamp(0.0, 100.0));
        }
    }

    pub fn on_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Progress(p) => self.set_progress(p),
            LoadEvent::Loaded | LoadEvent::Failed => {}
        }
    }

    /// Advance one frame of `dt` seconds. Returns `true` once, on the frame
    /// the overlay finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.phase = match self.phase {
            LoadingPhase::Filling => {
                self.progress = (self.progress + LOADING_STEP_PER_FRAME).min(100.0);
                if self.progress >= 100.0 {
                    LoadingPhase::Settling(0.0)
                } else {
                    LoadingPhase::Filling
                }
            }
            LoadingPhase::Settling(t) => {
                let t = t + dt;
                if t >= LOADING_SETTLE_SEC {
                    LoadingPhase::FadingOut(0.0)
                } else {
                    LoadingPhase::Settling(t)
                }
            }
            LoadingPhase::FadingOut(t) => {
                let t = t + dt;
                if t >= LOADING_FADE_SEC {
                    log::info!("[loading] finished");
                    self.phase = LoadingPhase::Finished;
                    return true;
                }
                LoadingPhase::FadingOut(t)
            }
            LoadingPhase::Finished => LoadingPhase::Finished,
        };
        false
    }
}
