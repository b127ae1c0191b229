//! HUD text
//!
//! The GPU pass draws shapes only; every string on screen is described here
//! and placed by the platform layer (DOM on the web, log lines natively).

use glam::Vec2;

use super::Button;
use crate::session::FrameView;
use crate::shop::PurchaseOutcome;
use crate::sim::GamePhase;

/// A line of text centred on `pos`, `size` is the font size in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
}

impl HudText {
    fn new(text: impl Into<String>, pos: Vec2, size: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            size,
        }
    }
}

/// All text for the current frame
pub fn hud_texts(view: &FrameView) -> Vec<HudText> {
    let vp = &view.state.viewport;
    let at = |y_frac: f32| Vec2::new(vp.width * 0.5, vp.height * y_frac);
    let big = vp.width * 0.1;
    let small = vp.width * 0.05;
    let progression = view.progression;

    let mut texts = Vec::new();
    match view.phase() {
        GamePhase::Playing => {
            texts.push(HudText::new(
                format!("Score: {}", view.state.score),
                Vec2::new(vp.width * 0.5, 34.0),
                28.0,
            ));
            texts.push(HudText::new(
                format!("🪙 {}", progression.coins),
                Vec2::new(vp.width * 0.85, 34.0),
                20.0,
            ));
        }
        GamePhase::Menu => {
            texts.push(HudText::new("Flappy Cat", at(0.3), big));
            texts.push(HudText::new(
                format!("High Score: {}", progression.high_score),
                at(0.45),
                small,
            ));
            texts.push(HudText::new(
                format!("🪙 {}", progression.coins),
                at(0.5),
                small,
            ));
        }
        GamePhase::GameOver => {
            texts.push(HudText::new("Game Over", at(0.3), big));
            texts.push(HudText::new(
                format!("Score: {}", view.state.score),
                at(0.45),
                small,
            ));
            let best = if view.new_high_score {
                format!("New High Score: {}!", progression.high_score)
            } else {
                format!("High Score: {}", progression.high_score)
            };
            texts.push(HudText::new(best, at(0.55), small));
        }
        GamePhase::Shop => {
            texts.push(HudText::new("Cat Shop", at(0.08), big));
            texts.push(HudText::new(
                format!("🪙 {}", progression.coins),
                at(0.14),
                small,
            ));
            if let Some(PurchaseOutcome::Rejected { cost, balance }) = view.last_purchase {
                texts.push(HudText::new(
                    format!("Need {} more coins", cost - balance),
                    at(0.78),
                    small * 0.8,
                ));
            }
        }
    }

    let items = view.shop_items();
    for (button, rect) in view.buttons() {
        let center = (rect.min + rect.max) / 2.0;
        let text = match button {
            Button::ShopItem(i) => match items.get(i) {
                Some(item) if item.selected => format!("{}  Equipped", item.skin.glyph),
                Some(item) if item.unlocked => format!("{}  Owned", item.skin.glyph),
                Some(item) => format!("{}  🪙 {}", item.skin.glyph, item.skin.cost),
                None => continue,
            },
            _ => button.label().to_string(),
        };
        texts.push(HudText::new(text, center, small));
    }
    texts
}
