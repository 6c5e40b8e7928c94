//! Bolas Arena - drag-to-launch balls on a server-synchronized canvas
//!
//! Core modules:
//! - `arena`: Single-threaded event loop state tying the pieces together
//! - `channel`: Duplex transport to the simulation service
//! - `gesture`: Drag gesture tracking (press, hold, release)
//! - `protocol`: JSON wire protocol shared with the service
//! - `render`: Repaint engine over an abstract drawing surface
//! - `scheduler`: Resize debouncing for the frame loop
//! - `settings`: Color palette, persisted in the browser
//! - `snapshot`: Latest authoritative ball set
//!
//! The physics simulation is not part of this crate: a remote service owns
//! it and periodically broadcasts the full ball set. The client's job is to
//! turn drags into launch intents and paint whatever the service last said
//! the arena looks like.

pub mod arena;
pub mod channel;
pub mod gesture;
pub mod protocol;
pub mod render;
pub mod scheduler;
pub mod settings;
pub mod snapshot;

pub use arena::{Arena, ArenaEvent};
pub use protocol::{Bola, ClientMessage, Point, Snapshot, Velocity};
pub use settings::Palette;

/// Client tuning constants
pub mod consts {
    /// Radius of a rendered bola, in canvas pixels
    pub const BOLA_RADIUS: f64 = 20.0;

    /// Quiet period a resize burst must observe before a single
    /// `SetCanvasDimensions` is sent to the service
    pub const RESIZE_DEBOUNCE_MS: f64 = 50.0;

    /// Canvas background
    pub const DEFAULT_BACKGROUND_COLOR: &str = "#046a38";
    /// Drag preview line
    pub const DEFAULT_LINE_COLOR: &str = "#ffe900";
    /// Bola at rest
    pub const DEFAULT_BOLA_COLOR: &str = "#da291c";
    /// Bola the service reports as mid-collision
    pub const DEFAULT_BOLA_COLLISION_COLOR: &str = "#ffffff";
}
