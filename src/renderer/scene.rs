//! Scene tessellation
//!
//! Turns a `FrameView` into one triangle list, back to front: sky, bubbles,
//! ground, pipes, food, cat, then any menu overlay and buttons.

use glam::Vec2;

use super::shapes::{circle, gradient_rect, outline, rect, triangle};
use super::vertex::{Vertex, colors};
use crate::Rect;
use crate::session::FrameView;
use crate::sim::{GamePhase, Pipe, Player};
use crate::tuning::Tuning;
use crate::ui::Button;

/// Height of the lip drawn at the gap end of each pipe
const CAP_HEIGHT: f32 = 20.0;
/// How far the lip overhangs the pipe on each side
const CAP_OVERHANG: f32 = 5.0;
const CIRCLE_SEGMENTS: u32 = 24;

/// Build all vertices for one frame
pub fn build_scene(view: &FrameView) -> Vec<Vertex> {
    let state = view.state;
    let vp = &state.viewport;
    let mut v = Vec::with_capacity(4096);

    v.extend(gradient_rect(
        &Rect::new(0.0, 0.0, vp.width, vp.height),
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    for bubble in &state.bubbles {
        v.extend(circle(bubble.pos, bubble.radius, colors::BUBBLE, 16));
    }

    v.extend(rect(
        &Rect::new(0.0, vp.ground_y, vp.width, vp.height - vp.ground_y),
        colors::GROUND,
    ));

    // The run stays visible, frozen, under the game over overlay
    if matches!(view.phase(), GamePhase::Playing | GamePhase::GameOver) {
        for pipe in &state.pipes {
            v.extend(pipe_vertices(pipe, vp.ground_y, view.tuning));
        }
        for food in view.visible_food() {
            let size = view.tuning.food_size;
            let color = colors::FOOD[food.variant as usize % colors::FOOD.len()];
            v.extend(circle(
                food.pos + Vec2::splat(size / 2.0),
                size / 2.0,
                color,
                CIRCLE_SEGMENTS,
            ));
        }
        v.extend(cat_vertices(&state.player, view.progression.selected));
    }

    match view.phase() {
        GamePhase::Playing => {}
        GamePhase::Menu => {
            // Title cat wearing the equipped skin
            let size = state.player.size;
            let title_cat = Player {
                pos: Vec2::new((vp.width - size) / 2.0, vp.height * 0.15),
                velocity: 0.0,
                size,
            };
            v.extend(cat_vertices(&title_cat, view.progression.selected));
        }
        GamePhase::GameOver | GamePhase::Shop => {
            v.extend(rect(
                &Rect::new(0.0, 0.0, vp.width, vp.height),
                colors::OVERLAY,
            ));
        }
    }

    for (button, r) in view.buttons() {
        match button {
            Button::ShopItem(index) => v.extend(shop_item_vertices(view, index, &r)),
            _ => v.extend(rect(&r, colors::BUTTON)),
        }
    }

    v
}

fn pipe_vertices(pipe: &Pipe, ground_y: f32, tuning: &Tuning) -> Vec<Vertex> {
    let w = tuning.pipe_width;
    let gap_bottom = pipe.gap_bottom(tuning.pipe_gap);
    let mut v = Vec::with_capacity(24);
    // Upper and lower bodies
    v.extend(rect(&Rect::new(pipe.x, 0.0, w, pipe.gap_top), colors::PIPE));
    v.extend(rect(
        &Rect::new(pipe.x, gap_bottom, w, ground_y - gap_bottom),
        colors::PIPE,
    ));
    // Lips at the gap
    let cap_w = w + 2.0 * CAP_OVERHANG;
    v.extend(rect(
        &Rect::new(pipe.x - CAP_OVERHANG, pipe.gap_top - CAP_HEIGHT, cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
    v.extend(rect(
        &Rect::new(pipe.x - CAP_OVERHANG, gap_bottom, cap_w, CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
    v
}

fn cat_vertices(player: &Player, skin: usize) -> Vec<Vertex> {
    let body = colors::SKIN[skin % colors::SKIN.len()];
    let s = player.size;
    let center = player.pos + Vec2::splat(s / 2.0);
    let r = s / 2.0;

    let mut v = Vec::with_capacity(CIRCLE_SEGMENTS as usize * 3 + 30);
    // Ears
    for side in [-1.0, 1.0] {
        let base = center + Vec2::new(side * r * 0.55, -r * 0.55);
        v.extend(triangle(
            base + Vec2::new(-r * 0.3, 0.0),
            base + Vec2::new(r * 0.3, 0.0),
            base + Vec2::new(side * r * 0.2, -r * 0.65),
            body,
        ));
    }
    v.extend(circle(center, r, body, CIRCLE_SEGMENTS));
    // Eyes
    for side in [-1.0, 1.0] {
        v.extend(circle(
            center + Vec2::new(side * r * 0.35, -r * 0.15),
            r * 0.12,
            colors::EYE,
            8,
        ));
    }
    v
}

fn shop_item_vertices(view: &FrameView, index: usize, r: &Rect) -> Vec<Vertex> {
    let items = view.shop_items();
    let Some(item) = items.get(index) else {
        return Vec::new();
    };
    let fill = if item.unlocked {
        colors::BUTTON
    } else if item.affordable {
        colors::SHOP_LOCKED
    } else {
        colors::SHOP_UNAFFORDABLE
    };

    let mut v = rect(r, fill);
    if item.selected {
        v.extend(outline(r, 4.0, colors::SHOP_SELECTED));
    }
    // Skin swatch on the left of the row
    let swatch = r.height() * 0.35;
    v.extend(circle(
        Vec2::new(r.left() + r.height() * 0.6, (r.top() + r.bottom()) / 2.0),
        swatch,
        colors::SKIN[index % colors::SKIN.len()],
        CIRCLE_SEGMENTS,
    ));
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use crate::persistence::MemoryStore;
    use crate::sim::SequenceRandom;

    fn session() -> Session<MemoryStore, SequenceRandom> {
        Session::new(
            400.0,
            Tuning::default(),
            MemoryStore::new(),
            SequenceRandom::new(vec![0.5, 0.1, 0.2, 0.3, 0.0]),
        )
        .unwrap()
    }

    #[test]
    fn test_menu_scene_has_start_button() {
        let s = session();
        let view = s.view();
        let vertices = build_scene(&view);
        assert!(!vertices.is_empty());
        assert!(vertices.iter().any(|v| v.color == colors::BUTTON));
        assert!(!vertices.iter().any(|v| v.color == colors::PIPE));
    }

    #[test]
    fn test_playing_scene_draws_pipes() {
        let mut s = session();
        s.press(Button::Start);
        let view = s.frame();
        assert!(!view.state.pipes.is_empty());
        let vertices = build_scene(&view);
        assert!(vertices.iter().any(|v| v.color == colors::PIPE));
        assert!(!vertices.iter().any(|v| v.color == colors::OVERLAY));
    }
}
