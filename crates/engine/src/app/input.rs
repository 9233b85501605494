use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::sim::{BoundKey, KeyEdge, KeyLevels};

const BOUND_KEY_COUNT: usize = 10;

const fn bound_key_index(key: BoundKey) -> usize {
    match key {
        BoundKey::W => 0,
        BoundKey::A => 1,
        BoundKey::S => 2,
        BoundKey::D => 3,
        BoundKey::ArrowUp => 4,
        BoundKey::ArrowDown => 5,
        BoundKey::ArrowLeft => 6,
        BoundKey::ArrowRight => 7,
        BoundKey::Space => 8,
        BoundKey::Escape => 9,
    }
}

pub(crate) fn bound_key_from_physical(key: PhysicalKey) -> Option<BoundKey> {
    let PhysicalKey::Code(code) = key else {
        return None;
    };
    match code {
        KeyCode::KeyW => Some(BoundKey::W),
        KeyCode::KeyA => Some(BoundKey::A),
        KeyCode::KeyS => Some(BoundKey::S),
        KeyCode::KeyD => Some(BoundKey::D),
        KeyCode::ArrowUp => Some(BoundKey::ArrowUp),
        KeyCode::ArrowDown => Some(BoundKey::ArrowDown),
        KeyCode::ArrowLeft => Some(BoundKey::ArrowLeft),
        KeyCode::ArrowRight => Some(BoundKey::ArrowRight),
        KeyCode::Space => Some(BoundKey::Space),
        KeyCode::Escape => Some(BoundKey::Escape),
        _ => None,
    }
}

/// Tracks which bound keys are physically down so the session can poll them.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HeldKeys {
    down: [bool; BOUND_KEY_COUNT],
}

impl HeldKeys {
    /// Records the new level and returns the edge to forward, if the key is bound.
    pub(crate) fn handle_physical_key(
        &mut self,
        key: PhysicalKey,
        state: ElementState,
    ) -> Option<(BoundKey, KeyEdge)> {
        let bound = bound_key_from_physical(key)?;
        let edge = match state {
            ElementState::Pressed => KeyEdge::Pressed,
            ElementState::Released => KeyEdge::Released,
        };
        self.down[bound_key_index(bound)] = edge == KeyEdge::Pressed;
        Some((bound, edge))
    }

    /// Focus loss swallows release events, so everything is treated as released.
    pub(crate) fn release_all(&mut self) {
        self.down = [false; BOUND_KEY_COUNT];
    }
}

impl KeyLevels for HeldKeys {
    fn is_held(&self, key: BoundKey) -> bool {
        self.down[bound_key_index(key)]
    }
}
