use raylib::prelude::*;

use crate::carousel::{CarouselState, Direction};
use crate::constants::*;
use crate::slide::Slide;

/// Draws the active slide with a direction-aware enter transition, the
/// indicator dots and the title/tag overlay. Holds one texture per slide,
/// parallel to the controller's deck. State is polled each frame; a change
/// in the (index, direction) pair restarts the transition.
pub struct Viewer {
    textures: Vec<Texture2D>,
    last: Option<(usize, Direction)>,
    enter_from: Direction,
    anim_timer: f32,
}

impl Viewer {
    pub fn new(textures: Vec<Texture2D>) -> Self {
        Self {
            textures,
            last: None,
            enter_from: Direction::Forward,
            anim_timer: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, state: &CarouselState) {
        let key = (state.active_index, state.direction);
        if self.last != Some(key) {
            // New slide (or a direction flip on the same slide): re-enter.
            self.last = Some(key);
            self.enter_from = state.direction;
            self.anim_timer = 0.0;
        } else if self.anim_timer < SLIDE_IN_DURATION {
            self.anim_timer += dt;
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle, slides: &[Slide], state: &CarouselState) {
        let screen_w = d.get_screen_width() as f32;
        let screen_h = d.get_screen_height() as f32;

        let (Some(texture), Some(slide)) = (
            self.textures.get(state.active_index),
            slides.get(state.active_index),
        ) else {
            return;
        };

        let t = ease_out_cubic((self.anim_timer / SLIDE_IN_DURATION).min(1.0));
        let offset = enter_offset(self.enter_from, t);
        let alpha = (t * 255.0) as u8;

        let tex_w = texture.width() as f32;
        let tex_h = texture.height() as f32;
        let (x, y, w, h) = fit_rect(tex_w, tex_h, screen_w, screen_h);

        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, tex_w, tex_h),
            Rectangle::new(x + offset, y, w, h),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, alpha),
        );

        self.draw_overlay(d, slide, state, screen_h);
        self.draw_indicators(d, state, screen_w, screen_h);
    }

    fn draw_overlay(
        &self,
        d: &mut RaylibDrawHandle,
        slide: &Slide,
        state: &CarouselState,
        screen_h: f32,
    ) {
        d.draw_text(
            &format!("{} / {}", state.active_index + 1, state.slide_count),
            24,
            24,
            20,
            Color::GRAY,
        );
        d.draw_text(&slide.title, 24, (screen_h - 96.0) as i32, 28, Color::WHITE);
        if !slide.tags.is_empty() {
            d.draw_text(
                &slide.tags.join("  /  "),
                24,
                (screen_h - 60.0) as i32,
                16,
                Color::SKYBLUE,
            );
        }
    }

    fn draw_indicators(
        &self,
        d: &mut RaylibDrawHandle,
        state: &CarouselState,
        screen_w: f32,
        screen_h: f32,
    ) {
        for i in 0..state.slide_count {
            let (cx, cy) = indicator_center(i, state.slide_count, screen_w, screen_h);
            let (radius, color) = if i == state.active_index {
                (INDICATOR_ACTIVE_RADIUS, Color::SKYBLUE)
            } else {
                (INDICATOR_RADIUS, Color::DARKGRAY)
            };
            d.draw_circle_v(Vector2::new(cx, cy), radius, color);
        }
    }
}

fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Horizontal displacement of the entering slide at eased progress `t`:
/// starts one slide-distance off toward the side it enters from, lands at 0.
fn enter_offset(enter_from: Direction, t: f32) -> f32 {
    let remaining = (1.0 - t) * SLIDE_IN_DISTANCE;
    match enter_from {
        Direction::Forward => remaining,
        Direction::Backward => -remaining,
    }
}

/// Largest rectangle of the texture's aspect ratio that fits the screen,
/// centered (letterboxed). Returns (x, y, width, height).
fn fit_rect(tex_w: f32, tex_h: f32, screen_w: f32, screen_h: f32) -> (f32, f32, f32, f32) {
    let scale = (screen_w / tex_w).min(screen_h / tex_h);
    let w = tex_w * scale;
    let h = tex_h * scale;
    ((screen_w - w) * 0.5, (screen_h - h) * 0.5, w, h)
}

fn indicator_center(index: usize, count: usize, screen_w: f32, screen_h: f32) -> (f32, f32) {
    let row_width = (count.saturating_sub(1)) as f32 * INDICATOR_SPACING;
    let start_x = (screen_w - row_width) * 0.5;
    (
        start_x + index as f32 * INDICATOR_SPACING,
        screen_h - INDICATOR_MARGIN_BOTTOM,
    )
}

/// Which indicator dot, if any, sits under the given point. A little slack
/// beyond the drawn radius keeps the dots clickable.
pub fn indicator_hit(x: f32, y: f32, count: usize, screen_w: f32, screen_h: f32) -> Option<usize> {
    let reach = INDICATOR_ACTIVE_RADIUS + 4.0;
    (0..count).find(|&i| {
        let (cx, cy) = indicator_center(i, count, screen_w, screen_h);
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= reach * reach
    })
}
