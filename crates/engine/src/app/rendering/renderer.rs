use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::sim::Session;

use super::transform::{
    layer_rect, player_quad, PlayerQuad, ScreenRectPx, Viewport, HOUSES_LAYER, MOUNTAINS_LAYER,
};

const CLEAR_COLOR: [u8; 4] = [242, 242, 242, 255];
const PLAYER_COLOR: [u8; 4] = [58, 92, 168, 255];
const PLAYER_FACING_COLOR: [u8; 4] = [236, 240, 250, 255];
const FACING_MARK_START: f32 = 0.55;
const FACING_MARK_HALF_WIDTH: f32 = 0.12;

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_session(&mut self, session: &Session) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let viewport = self.viewport;
        let frame = self.pixels.frame_mut();
        draw_session(frame, viewport, session);
        self.pixels.render()
    }
}

fn draw_session(frame: &mut [u8], viewport: Viewport, session: &Session) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&CLEAR_COLOR);
    }

    let shift = session.parallax_shift();
    for layer in [MOUNTAINS_LAYER, HOUSES_LAYER] {
        fill_rect_clipped(frame, viewport, layer_rect(&layer, shift, viewport), layer.color);
    }

    let quad = player_quad(session.player(), session.bounds(), viewport);
    draw_player_quad(frame, viewport, &quad);
}

fn fill_rect_clipped(frame: &mut [u8], viewport: Viewport, rect: ScreenRectPx, color: [u8; 4]) {
    let left = rect.left.max(0);
    let top = rect.top.max(0);
    let right = rect.right.min(viewport.width as i32);
    let bottom = rect.bottom.min(viewport.height as i32);
    for y in top..bottom {
        for x in left..right {
            write_pixel_rgba_clipped(frame, viewport.width as usize, x, y, color);
        }
    }
}

fn draw_player_quad(frame: &mut [u8], viewport: Viewport, quad: &PlayerQuad) {
    let (sin, cos) = quad.rotation_radians.sin_cos();
    let reach = (quad.half_side * std::f32::consts::SQRT_2).ceil() as i32;
    let cx = quad.center_x.round() as i32;
    let cy = quad.center_y.round() as i32;

    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            if x < 0 || y < 0 || x >= viewport.width as i32 || y >= viewport.height as i32 {
                continue;
            }
            let Some(color) = player_pixel_color(quad, x as f32 + 0.5, y as f32 + 0.5, sin, cos)
            else {
                continue;
            };
            write_pixel_rgba_clipped(frame, viewport.width as usize, x, y, color);
        }
    }
}

/// Framebuffer y grows downward, so the local frame is rebuilt y-up before undoing the rotation.
fn player_pixel_color(
    quad: &PlayerQuad,
    px: f32,
    py: f32,
    sin: f32,
    cos: f32,
) -> Option<[u8; 4]> {
    let dx = px - quad.center_x;
    let dy = quad.center_y - py;
    let local_x = dx * cos + dy * sin;
    let local_y = -dx * sin + dy * cos;
    if local_x.abs() > quad.half_side || local_y.abs() > quad.half_side {
        return None;
    }
    let on_facing_mark = local_x >= quad.half_side * FACING_MARK_START
        && local_y.abs() <= quad.half_side * FACING_MARK_HALF_WIDTH;
    Some(if on_facing_mark {
        PLAYER_FACING_COLOR
    } else {
        PLAYER_COLOR
    })
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: [u8; 4]) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BoundKey, SessionConfig};

    fn pixel_at(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn background_layers_shift_after_player_moves_right() {
        let mut session = Session::new(SessionConfig::for_screen(960, 540)).expect("session");
        let holding_right = |key: BoundKey| key == BoundKey::D;
        for _ in 0..20 {
            session.run_frame(session.fixed_dt() * 3, &holding_right);
        }
        let shift = session.parallax_shift();
        assert!(shift < -100.0, "shift={shift}");

        let viewport = Viewport {
            width: 960,
            height: 540,
        };
        let mut frame = vec![0u8; (viewport.width * viewport.height * 4) as usize];
        draw_session(&mut frame, viewport, &session);

        // Houses track the full shift from their base x of 500.
        let houses_left = (500.0 + shift).round() as u32;
        assert_eq!(pixel_at(&frame, 960, houses_left + 2, 200), HOUSES_LAYER.color);
        assert_eq!(pixel_at(&frame, 960, houses_left - 2, 200), CLEAR_COLOR);
    }

    #[test]
    fn fill_rect_is_clipped_to_viewport() {
        let viewport = Viewport {
            width: 4,
            height: 4,
        };
        let mut frame = vec![0u8; 4 * 4 * 4];
        let rect = ScreenRectPx {
            left: -2,
            top: 2,
            right: 2,
            bottom: 9,
        };

        fill_rect_clipped(&mut frame, viewport, rect, [9, 9, 9, 255]);

        assert_eq!(pixel_at(&frame, 4, 0, 3), [9, 9, 9, 255]);
        assert_eq!(pixel_at(&frame, 4, 1, 2), [9, 9, 9, 255]);
        assert_eq!(pixel_at(&frame, 4, 2, 2), [0, 0, 0, 0]);
        assert_eq!(pixel_at(&frame, 4, 0, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn facing_mark_follows_rotation() {
        let quad = PlayerQuad {
            center_x: 50.0,
            center_y: 50.0,
            half_side: 20.0,
            rotation_radians: 0.0,
        };
        let (sin, cos) = quad.rotation_radians.sin_cos();
        assert_eq!(
            player_pixel_color(&quad, 68.0, 50.0, sin, cos),
            Some(PLAYER_FACING_COLOR)
        );
        assert_eq!(
            player_pixel_color(&quad, 32.0, 50.0, sin, cos),
            Some(PLAYER_COLOR)
        );

        let west = PlayerQuad {
            rotation_radians: std::f32::consts::PI,
            ..quad
        };
        let (sin, cos) = west.rotation_radians.sin_cos();
        assert_eq!(
            player_pixel_color(&west, 32.0, 50.0, sin, cos),
            Some(PLAYER_FACING_COLOR)
        );
        assert_eq!(player_pixel_color(&west, 75.0, 50.0, sin, cos), None);
    }

    #[test]
    fn session_frame_draws_player_over_background() {
        let session = Session::new(SessionConfig::for_screen(960, 540)).expect("session");
        let viewport = Viewport {
            width: 960,
            height: 540,
        };
        let mut frame = vec![0u8; (viewport.width * viewport.height * 4) as usize];

        draw_session(&mut frame, viewport, &session);

        assert_eq!(pixel_at(&frame, 960, 5, 5), CLEAR_COLOR);
        assert_eq!(pixel_at(&frame, 960, 510, 390), PLAYER_COLOR);
        assert_eq!(pixel_at(&frame, 960, 700, 200), HOUSES_LAYER.color);
    }
}
