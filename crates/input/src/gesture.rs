//! Swipe recognition.
//!
//! Axis-dominant: the larger of |dx| and |dy| picks the axis, then the
//! displacement must reach the threshold. The anchor moves to every sample,
//! so each intent needs a fresh threshold's worth of travel.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{Intent, SWIPE_THRESHOLD_PX};

/// Approximate pixels per terminal cell on both axes
pub const MOUSE_CELL_PX: f32 = 32.0;

/// Classify one displacement. Screen coordinates: +y is down.
///
/// ```
/// use blockfall_input::classify_swipe;
/// use blockfall_input::types::Intent;
///
/// assert_eq!(classify_swipe(30.0, 0.0, 30.0), Some(Intent::MoveRight));
/// assert_eq!(classify_swipe(0.0, -45.0, 30.0), Some(Intent::Rotate));
/// assert_eq!(classify_swipe(29.0, 5.0, 30.0), None);
/// ```
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Intent> {
    if dx.abs() > dy.abs() {
        if dx >= threshold {
            Some(Intent::MoveRight)
        } else if dx <= -threshold {
            Some(Intent::MoveLeft)
        } else {
            None
        }
    } else if dy >= threshold {
        Some(Intent::SoftDrop)
    } else if dy <= -threshold {
        Some(Intent::Rotate)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeTracker {
    threshold: f32,
    anchor: Option<(f32, f32)>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SWIPE_THRESHOLD_PX)
    }
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            anchor: None,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn begin(&mut self, x: f32, y: f32) {
        self.anchor = Some((x, y));
    }

    /// Feed a move sample. Re-anchors at the sample whether or not it
    /// produced an intent.
    pub fn sample(&mut self, x: f32, y: f32) -> Option<Intent> {
        let (ax, ay) = self.anchor?;
        self.anchor = Some((x, y));
        classify_swipe(x - ax, y - ay, self.threshold)
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}

/// Feeds left-button mouse drags into a [`SwipeTracker`].
#[derive(Debug, Clone, PartialEq)]
pub struct MouseSwipe {
    tracker: SwipeTracker,
    cell_px: f32,
}

impl Default for MouseSwipe {
    fn default() -> Self {
        Self {
            tracker: SwipeTracker::default(),
            cell_px: MOUSE_CELL_PX,
        }
    }
}

impl MouseSwipe {
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Intent> {
        let x = f32::from(event.column) * self.cell_px;
        let y = f32::from(event.row) * self.cell_px;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.tracker.begin(x, y);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => self.tracker.sample(x, y),
            MouseEventKind::Up(MouseButton::Left) => {
                self.tracker.end();
                None
            }
            _ => None,
        }
    }
}
