/// Intents produced by the input layer and read by physics and targeting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Ascend while flying.
    pub up: bool,
    /// Descend while flying, slow walk otherwise.
    pub down: bool,
    /// Pointer lock held by the window.
    pub captured: bool,
    /// Look deltas accumulated since the last tick.
    pub look_dx: f32,
    pub look_dy: f32,
}

impl InputState {
    /// Drop held movement, keeping capture.
    pub fn release_all(&mut self) {
        *self = InputState {
            captured: self.captured,
            ..InputState::default()
        };
    }

    #[inline]
    pub fn take_look(&mut self) -> (f32, f32) {
        let d = (self.look_dx, self.look_dy);
        self.look_dx = 0.0;
        self.look_dy = 0.0;
        d
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Space,
    Shift,
    F,
}

impl Key {
    /// Parse a DOM-style key code (`KeyW`, `Space`, `ShiftLeft`, ...).
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "KeyW" => Some(Key::W),
            "KeyA" => Some(Key::A),
            "KeyS" => Some(Key::S),
            "KeyD" => Some(Key::D),
            "Space" => Some(Key::Space),
            "ShiftLeft" | "ShiftRight" => Some(Key::Shift),
            "KeyF" => Some(Key::F),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerAction {
    Place,
    Remove,
}

/// Primary places, primary with ctrl/meta or secondary removes.
pub fn pointer_action(button: PointerButton, modifier: bool) -> Option<PointerAction> {
    match (button, modifier) {
        (PointerButton::Primary, false) => Some(PointerAction::Place),
        (PointerButton::Primary, true) | (PointerButton::Secondary, _) => {
            Some(PointerAction::Remove)
        }
        (PointerButton::Middle, _) => None,
    }
}

/// Wheel delta to registry step: scrolling down moves to the next kind.
#[inline]
pub fn wheel_direction(delta_y: f32) -> i32 {
    if delta_y > 0.0 {
        1
    } else if delta_y < 0.0 {
        -1
    } else {
        0
    }
}
