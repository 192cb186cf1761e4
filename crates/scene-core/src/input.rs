use glam::Vec2;
use smallvec::SmallVec;

/// Mouse buttons the camera reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` id; other ids (back/forward) are ignored.
    #[inline]
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Movement keys polled every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    YawLeft,
    YawRight,
}

impl MoveKey {
    /// Map a layout-independent `KeyboardEvent.code`.
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Back),
            "KeyA" => Some(Self::Left),
            "KeyD" => Some(Self::Right),
            "Space" => Some(Self::Up),
            "ShiftLeft" => Some(Self::Down),
            "KeyQ" => Some(Self::YawLeft),
            "KeyE" => Some(Self::YawRight),
            _ => None,
        }
    }
}

/// Raw input already filtered down to what the camera understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, position: Vec2 },
    PointerMove { position: Vec2 },
    PointerUp { button: PointerButton },
    Wheel { delta_y: f32 },
    Key { key: MoveKey, pressed: bool },
}

/// Drag and keyboard state between events.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    pub active_button: Option<PointerButton>,
    pub last_cursor: Vec2,
    pressed: SmallVec<[MoveKey; 8]>,
}

impl InputState {
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.active_button.is_some()
    }

    #[inline]
    pub fn is_pressed(&self, key: MoveKey) -> bool {
        self.pressed.contains(&key)
    }

    pub fn pressed_keys(&self) -> &[MoveKey] {
        &self.pressed
    }

    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        let held = self.is_pressed(key);
        if pressed && !held {
            self.pressed.push(key);
        } else if !pressed && held {
            self.pressed.retain(|k| *k != key);
        }
    }

    pub fn clear(&mut self) {
        self.active_button = None;
        self.pressed.clear();
    }
}

/// Callback an input source delivers events into.
pub type InputSink = Box<dyn FnMut(InputEvent)>;

/// Something that produces camera input, e.g. DOM listeners on a canvas.
///
/// Implementations register their listeners in `attach` and must remove all
/// of them in `detach`; after `detach` returns the sink is never called
/// again. `detach` must be safe to call more than once.
pub trait InputSource {
    fn attach(&mut self, sink: InputSink);
    fn detach(&mut self);
}
