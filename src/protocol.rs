//! JSON wire protocol shared with the simulation service.
//!
//! Every outbound message is a single JSON object with exactly one
//! recognized top-level key (`NewBola` or `SetCanvasDimensions`); every
//! inbound message is a full snapshot under the `bolas` key. The service
//! integrates in whole canvas pixels, so all coordinates are integers.

use serde::{Deserialize, Serialize};

/// Canvas-space coordinate, in integer pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Signed per-tick displacement. The unit matches the service's
/// integration step and is opaque to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Velocity {
    pub vel_x: i32,
    pub vel_y: i32,
}

/// A simulated ball as reported by the service.
///
/// Bolas carry no identity across snapshots; every snapshot is a brand-new
/// set and the previous one is discarded wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Bola {
    /// Center position
    pub c: Point,
    /// Collision frames remaining. The decay schedule is owned by the
    /// service; the client only tests for "currently colliding".
    #[serde(default)]
    pub t: u32,
}

impl Bola {
    /// Whether the service currently considers this bola to be colliding.
    pub fn collided(&self) -> bool {
        self.t > 0
    }
}

/// Full authoritative snapshot of the arena at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Snapshot {
    pub bolas: Vec<Bola>,
}

impl Snapshot {
    /// Parse an inbound frame. A malformed payload (missing `bolas`,
    /// non-array value, junk) is a protocol error the caller logs and
    /// discards; the previous snapshot stays authoritative.
    pub fn decode(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Client -> service intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClientMessage {
    /// Launch a new bola at `c` with velocity `v`.
    NewBola { c: Point, v: Velocity },
    /// Advertise the client's current viewport. Sent once on connect and
    /// again after each debounced resize.
    SetCanvasDimensions { height: i32, width: i32 },
}

impl ClientMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bola_wire_shape() {
        let msg = ClientMessage::NewBola {
            c: Point { x: 60, y: 140 },
            v: Velocity { vel_x: 40, vel_y: -40 },
        };
        assert_eq!(
            msg.encode().unwrap(),
            r#"{"NewBola":{"c":{"x":60,"y":140},"v":{"vel_x":40,"vel_y":-40}}}"#
        );
    }

    #[test]
    fn set_canvas_dimensions_wire_shape() {
        let msg = ClientMessage::SetCanvasDimensions {
            height: 768,
            width: 1024,
        };
        assert_eq!(
            msg.encode().unwrap(),
            r#"{"SetCanvasDimensions":{"height":768,"width":1024}}"#
        );
    }

    #[test]
    fn decode_snapshot() {
        let snapshot =
            Snapshot::decode(r#"{"bolas":[{"c":{"x":10,"y":20},"t":0},{"c":{"x":30,"y":40},"t":5}]}"#)
                .unwrap();
        assert_eq!(snapshot.bolas.len(), 2);
        assert_eq!(snapshot.bolas[0].c, Point { x: 10, y: 20 });
        assert!(!snapshot.bolas[0].collided());
        assert!(snapshot.bolas[1].collided());
    }

    #[test]
    fn decode_snapshot_missing_t_defaults_to_zero() {
        let snapshot = Snapshot::decode(r#"{"bolas":[{"c":{"x":1,"y":2}}]}"#).unwrap();
        assert_eq!(snapshot.bolas[0].t, 0);
        assert!(!snapshot.bolas[0].collided());
    }

    #[test]
    fn decode_empty_snapshot() {
        let snapshot = Snapshot::decode(r#"{"bolas":[]}"#).unwrap();
        assert!(snapshot.bolas.is_empty());
    }

    #[test]
    fn decode_rejects_missing_bolas() {
        assert!(Snapshot::decode(r#"{"balls":[]}"#).is_err());
    }

    #[test]
    fn decode_rejects_non_array_bolas() {
        assert!(Snapshot::decode(r#"{"bolas":7}"#).is_err());
    }

    #[test]
    fn decode_rejects_junk() {
        assert!(Snapshot::decode("not json at all").is_err());
    }
}
