//! Drag gesture tracking.
//!
//! A gesture is press -> hold -> release. Releasing launches a new bola at
//! the release point, slingshot-style: the velocity is the vector from the
//! release point back to where the drag started.

use crate::protocol::{Point, Velocity};

/// A completed drag, ready to be sent as a `NewBola` intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Launch {
    pub center: Point,
    pub velocity: Velocity,
}

/// In-progress drag state. Exists only between press and release.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gesture {
    start: Option<Point>,
    hold: Option<Point>,
}

impl Gesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag. Any hold point left over from an earlier gesture is
    /// dropped so the preview line cannot mix two gestures.
    pub fn press_start(&mut self, p: Point) {
        self.start = Some(p);
        self.hold = None;
    }

    /// Record the current drag position.
    ///
    /// Accepted even with no start recorded: some platforms deliver moves
    /// before the first press. A release is only meaningful once a start
    /// exists, so a stray hold on its own never launches anything.
    pub fn press_move(&mut self, p: Point) {
        self.hold = Some(p);
    }

    /// End the drag. Returns the launch intent, or `None` for a stray
    /// release with no recorded start.
    pub fn press_end(&mut self, p: Point) -> Option<Launch> {
        let start = self.start.take()?;
        self.hold = None;
        Some(Launch {
            center: p,
            velocity: Velocity {
                vel_x: start.x - p.x,
                vel_y: start.y - p.y,
            },
        })
    }

    /// Endpoints of the drag preview line, once both are known.
    pub fn line(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.hold?))
    }

    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }
}
