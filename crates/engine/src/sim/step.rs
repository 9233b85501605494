use super::direction::{AxisSign, Direction};
use super::input::InputState;
use super::player::PlayerEntity;
use super::world::WorldBounds;

/// Advances the player by one fixed slice: movement from horizontal input, then the world clamp.
///
/// The clamp runs on idle steps too.
pub fn step(
    input: &InputState,
    player: &PlayerEntity,
    bounds: &WorldBounds,
    fixed_dt_seconds: f32,
) -> PlayerEntity {
    match apply_player_input(input, player, fixed_dt_seconds) {
        Some(moved) => clamp_to_world(&moved, bounds),
        None => clamp_to_world(player, bounds),
    }
}

fn apply_player_input(
    input: &InputState,
    player: &PlayerEntity,
    fixed_dt_seconds: f32,
) -> Option<PlayerEntity> {
    if !input.has_horizontal_input() {
        return None;
    }

    // Vertical keys are tracked by InputState but never drive movement.
    let direction = Direction::resolve(input.horizontal_sign(), AxisSign::Zero);
    let rotation = direction.degree_angle();
    let (unit_x, unit_y) = direction.unit_vector();
    let distance = player.speed() * fixed_dt_seconds;

    let mut next = *player;
    next.x += unit_x * distance;
    next.y += unit_y * distance;
    next.rotation = rotation;
    next.direction = direction;
    Some(next)
}

fn clamp_to_world(player: &PlayerEntity, bounds: &WorldBounds) -> PlayerEntity {
    let mut clamped = *player;
    clamped.x = bounds.clamp_x(player.x, player.half_side());
    clamped
}
