//! Platform abstraction layer
//!
//! Browser listeners (and the native driver) translate raw events into
//! `InputEvent`s. Events are queued between frames and applied in order
//! before the next tick.

use std::collections::VecDeque;

use glam::Vec2;

/// Input delivered to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Click or touch-start at canvas coordinates
    Primary { pos: Vec2 },
    /// Keyboard jump (Space / ArrowUp / W)
    Jump,
    /// Canvas container resized to `width` CSS pixels
    Resize { width: f32 },
}

impl InputEvent {
    pub fn primary(x: f32, y: f32) -> Self {
        InputEvent::Primary {
            pos: Vec2::new(x, y),
        }
    }

    /// Map a keyboard `key` value to an event
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "ArrowUp" | "w" | "W" => Some(InputEvent::Jump),
            _ => None,
        }
    }
}

/// FIFO of events waiting for the next frame
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
