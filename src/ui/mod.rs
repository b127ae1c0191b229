//! Canvas-space UI layout
//!
//! Buttons are positioned as fractions of the viewport so that hit testing
//! and drawing agree at any canvas size.

pub mod hud;

pub use hud::{HudText, hud_texts};

use glam::Vec2;

use crate::Rect;
use crate::shop::SKINS;
use crate::sim::{GamePhase, Viewport};

/// Regular button size, as fractions of viewport width/height
const BUTTON_W: f32 = 0.4;
const BUTTON_H: f32 = 0.1;

/// Button centre heights, as fractions of viewport height
const START_Y: f32 = 0.6;
const RETRY_Y: f32 = 0.7;
const SHOP_Y: f32 = 0.82;
const BACK_Y: f32 = 0.88;

/// Shop rows
const ITEM_W: f32 = 0.8;
const ITEM_H: f32 = 0.09;
const ITEM_FIRST_Y: f32 = 0.22;
const ITEM_PITCH: f32 = 0.11;

/// A tappable control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Start,
    Retry,
    Shop,
    Back,
    /// Shop row for `SKINS[index]`
    ShopItem(usize),
}

impl Button {
    pub fn label(&self) -> &'static str {
        match self {
            Button::Start => "Start Game",
            Button::Retry => "Try Again",
            Button::Shop => "Cat Shop",
            Button::Back => "Back",
            Button::ShopItem(i) => SKINS.get(*i).map(|s| s.glyph).unwrap_or(""),
        }
    }
}

/// Button placement for one viewport
#[derive(Debug, Clone, Copy)]
pub struct UiLayout {
    width: f32,
    height: f32,
}

impl UiLayout {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
        }
    }

    fn centered(&self, y_frac: f32, w_frac: f32, h_frac: f32) -> Rect {
        Rect::centered(
            Vec2::new(self.width * 0.5, self.height * y_frac),
            self.width * w_frac,
            self.height * h_frac,
        )
    }

    pub fn rect(&self, button: Button) -> Rect {
        match button {
            Button::Start => self.centered(START_Y, BUTTON_W, BUTTON_H),
            Button::Retry => self.centered(RETRY_Y, BUTTON_W, BUTTON_H),
            Button::Shop => self.centered(SHOP_Y, BUTTON_W, BUTTON_H),
            Button::Back => self.centered(BACK_Y, BUTTON_W, BUTTON_H),
            Button::ShopItem(i) => {
                self.centered(ITEM_FIRST_Y + i as f32 * ITEM_PITCH, ITEM_W, ITEM_H)
            }
        }
    }

    /// Buttons shown in `phase`
    pub fn buttons(phase: GamePhase) -> Vec<Button> {
        match phase {
            GamePhase::Menu => vec![Button::Start],
            GamePhase::Playing => Vec::new(),
            GamePhase::GameOver => vec![Button::Retry, Button::Shop],
            GamePhase::Shop => (0..SKINS.len())
                .map(Button::ShopItem)
                .chain(std::iter::once(Button::Back))
                .collect(),
        }
    }

    /// Button under `point` in `phase`, if any
    pub fn hit(&self, phase: GamePhase, point: Vec2) -> Option<Button> {
        Self::buttons(phase)
            .into_iter()
            .find(|b| self.rect(*b).contains(point))
    }
}
