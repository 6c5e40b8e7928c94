//! Single-threaded arena state.
//!
//! Browser callbacks never touch state directly: pointer, socket, and
//! resize callbacks enqueue [`ArenaEvent`]s, and the scheduled tick
//! drains the queue, applies the events, and paints exactly one frame.
//! Everything runs to completion on one thread, so a frame can never
//! observe a half-applied event and no locking exists anywhere.

use std::collections::VecDeque;

use crate::channel::Channel;
use crate::gesture::Gesture;
use crate::protocol::{Bola, ClientMessage, Point};
use crate::render::{RenderState, Surface, render_frame};
use crate::scheduler::ResizeDebounce;
use crate::settings::Palette;
use crate::snapshot::SnapshotStore;

/// Everything that can happen between two ticks.
#[derive(Debug, Clone, PartialEq)]
pub enum ArenaEvent {
    PressStart(Point),
    PressMove(Point),
    PressEnd(Point),
    /// A full snapshot arrived from the service.
    Snapshot(Vec<Bola>),
    /// The viewport changed to the given size.
    Resized { width: i32, height: i32 },
    /// The connection closed or errored; no further sends, rendering
    /// freezes on the last snapshot.
    ChannelClosed,
}

/// Client-side arena: gesture, snapshot, and render bookkeeping behind a
/// single event queue.
pub struct Arena {
    events: VecDeque<ArenaEvent>,
    gesture: Gesture,
    store: SnapshotStore,
    render_state: RenderState,
    debounce: ResizeDebounce,
    palette: Palette,
    viewport: (i32, i32),
    closed: bool,
}

impl Arena {
    pub fn new(width: i32, height: i32, palette: Palette) -> Self {
        Self {
            events: VecDeque::new(),
            gesture: Gesture::new(),
            store: SnapshotStore::new(),
            render_state: RenderState::new(),
            debounce: ResizeDebounce::default(),
            palette,
            viewport: (width, height),
            closed: false,
        }
    }

    /// Queue an event for the next tick. Callable from any callback.
    pub fn push(&mut self, event: ArenaEvent) {
        self.events.push_back(event);
    }

    /// Handshake: the channel just opened; advertise the viewport so the
    /// service never simulates against undefined dimensions.
    pub fn handle_open<C: Channel>(&mut self, width: i32, height: i32, channel: &mut C) {
        self.viewport = (width, height);
        log::info!("Connected; viewport {width}x{height}");
        self.send(
            channel,
            &ClientMessage::SetCanvasDimensions { height, width },
        );
    }

    /// One scheduled tick: drain the queue, flush any due viewport
    /// update, paint one frame.
    pub fn tick<C: Channel, S: Surface>(&mut self, now_ms: f64, channel: &mut C, surface: &mut S) {
        while let Some(event) = self.events.pop_front() {
            self.apply(event, now_ms, channel);
        }

        if self.debounce.poll(now_ms) {
            let (width, height) = self.viewport;
            // Resizing blanks the backing store, so repaint everything
            surface.resize(width, height);
            self.store.mark_updated();
            self.send(
                channel,
                &ClientMessage::SetCanvasDimensions { height, width },
            );
        }

        render_frame(
            surface,
            &self.gesture,
            &mut self.store,
            &mut self.render_state,
            &self.palette,
        );
    }

    fn apply<C: Channel>(&mut self, event: ArenaEvent, now_ms: f64, channel: &mut C) {
        match event {
            ArenaEvent::PressStart(p) => self.gesture.press_start(p),
            ArenaEvent::PressMove(p) => self.gesture.press_move(p),
            ArenaEvent::PressEnd(p) => {
                if let Some(launch) = self.gesture.press_end(p) {
                    log::debug!(
                        "Launching bola at ({}, {}) with velocity ({}, {})",
                        launch.center.x,
                        launch.center.y,
                        launch.velocity.vel_x,
                        launch.velocity.vel_y
                    );
                    self.send(
                        channel,
                        &ClientMessage::NewBola {
                            c: launch.center,
                            v: launch.velocity,
                        },
                    );
                }
            }
            ArenaEvent::Snapshot(bolas) => self.store.replace(bolas),
            ArenaEvent::Resized { width, height } => {
                self.viewport = (width, height);
                self.debounce.record(now_ms);
            }
            ArenaEvent::ChannelClosed => {
                log::info!("Connection closed; freezing on the last snapshot");
                self.closed = true;
            }
        }
    }

    fn send<C: Channel>(&mut self, channel: &mut C, message: &ClientMessage) {
        if self.closed {
            log::debug!("Dropping {message:?}: connection closed");
            return;
        }
        if let Err(e) = channel.send(message) {
            log::error!("Failed to send {message:?}: {e}");
        }
    }
}
