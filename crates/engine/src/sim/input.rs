use super::direction::AxisSign;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    Action,
    Exit,
}

const LOGICAL_KEY_COUNT: usize = 6;

impl LogicalKey {
    pub const MOVEMENT: [LogicalKey; 4] = [
        LogicalKey::Up,
        LogicalKey::Down,
        LogicalKey::Left,
        LogicalKey::Right,
    ];

    const fn index(self) -> usize {
        match self {
            LogicalKey::Up => 0,
            LogicalKey::Down => 1,
            LogicalKey::Left => 2,
            LogicalKey::Right => 3,
            LogicalKey::Action => 4,
            LogicalKey::Exit => 5,
        }
    }
}

/// Physical keys the session reads. Movement keys are polled, the rest arrive as edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundKey {
    W,
    A,
    S,
    D,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Pressed,
    Released,
}

/// Level query answered by whoever owns the keyboard.
pub trait KeyLevels {
    fn is_held(&self, key: BoundKey) -> bool;
}

impl<F> KeyLevels for F
where
    F: Fn(BoundKey) -> bool,
{
    fn is_held(&self, key: BoundKey) -> bool {
        self(key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pressed: [bool; LOGICAL_KEY_COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: LogicalKey) -> bool {
        self.pressed[key.index()]
    }

    pub fn set(&mut self, key: LogicalKey, is_pressed: bool) {
        self.pressed[key.index()] = is_pressed;
    }

    pub fn with_pressed(mut self, key: LogicalKey, is_pressed: bool) -> Self {
        self.set(key, is_pressed);
        self
    }

    /// Re-derives movement keys from held physical keys; action and exit latches are untouched.
    pub fn refresh_movement(&mut self, levels: &impl KeyLevels) {
        for key in LogicalKey::MOVEMENT {
            self.set(key, false);
        }

        // Each pair only ever asserts, so WASD and arrows combine without clearing each other.
        self.assert_first_held(
            levels,
            (BoundKey::W, LogicalKey::Up),
            (BoundKey::S, LogicalKey::Down),
        );
        self.assert_first_held(
            levels,
            (BoundKey::A, LogicalKey::Left),
            (BoundKey::D, LogicalKey::Right),
        );
        self.assert_first_held(
            levels,
            (BoundKey::ArrowLeft, LogicalKey::Left),
            (BoundKey::ArrowRight, LogicalKey::Right),
        );
        self.assert_first_held(
            levels,
            (BoundKey::ArrowUp, LogicalKey::Up),
            (BoundKey::ArrowDown, LogicalKey::Down),
        );
    }

    fn assert_first_held(
        &mut self,
        levels: &impl KeyLevels,
        primary: (BoundKey, LogicalKey),
        secondary: (BoundKey, LogicalKey),
    ) {
        if levels.is_held(primary.0) {
            self.set(primary.1, true);
        } else if levels.is_held(secondary.0) {
            self.set(secondary.1, true);
        }
    }

    /// Applies a discrete key edge. Only Space and Escape latch; Escape has no release.
    pub fn apply_edge(&mut self, key: BoundKey, edge: KeyEdge) {
        match (key, edge) {
            (BoundKey::Escape, KeyEdge::Pressed) => self.set(LogicalKey::Exit, true),
            (BoundKey::Space, KeyEdge::Pressed) => self.set(LogicalKey::Action, true),
            (BoundKey::Space, KeyEdge::Released) => self.set(LogicalKey::Action, false),
            _ => {}
        }
    }

    pub fn has_horizontal_input(&self) -> bool {
        self.is_pressed(LogicalKey::Left) || self.is_pressed(LogicalKey::Right)
    }

    pub fn horizontal_sign(&self) -> AxisSign {
        if self.is_pressed(LogicalKey::Left) {
            AxisSign::Negative
        } else if self.is_pressed(LogicalKey::Right) {
            AxisSign::Positive
        } else {
            AxisSign::Zero
        }
    }

    /// Tracked for completeness; movement does not consume it.
    pub fn vertical_sign(&self) -> AxisSign {
        if self.is_pressed(LogicalKey::Up) {
            AxisSign::Positive
        } else if self.is_pressed(LogicalKey::Down) {
            AxisSign::Negative
        } else {
            AxisSign::Zero
        }
    }

    pub fn exit_requested(&self) -> bool {
        self.is_pressed(LogicalKey::Exit)
    }
}
