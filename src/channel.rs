//! Duplex transport to the simulation service.
//!
//! The outbound half is the [`Channel`] trait so the core stays testable
//! off-browser; the real implementation wraps a browser WebSocket.
//! Inbound snapshots and lifecycle transitions are delivered through
//! callbacks registered at connect time.

use std::fmt;

use crate::protocol::ClientMessage;

/// Errors surfaced by a transport channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel is not (or no longer) open; the intent was dropped.
    /// Sends never queue - callers send only after the open handshake.
    NotOpen,
    /// The underlying transport rejected the send.
    Transport(String),
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::NotOpen => write!(f, "channel is not open"),
            ChannelError::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

impl std::error::Error for ChannelError {}

/// Outbound half of the connection. `send` must not block; it fails fast
/// when the connection is not open rather than queueing.
pub trait Channel {
    fn send(&mut self, message: &ClientMessage) -> Result<(), ChannelError>;
}

#[cfg(target_arch = "wasm32")]
pub use ws::{WsChannel, service_url};

#[cfg(target_arch = "wasm32")]
mod ws {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CloseEvent, MessageEvent, WebSocket};

    use super::{Channel, ChannelError};
    use crate::protocol::{ClientMessage, Snapshot};

    /// Derive the service endpoint from the page origin
    /// (`http(s)://host` -> `ws(s)://host/ws`).
    pub fn service_url(location: &web_sys::Location) -> Result<String, JsValue> {
        let origin = location.origin()?;
        let ws_origin = if let Some(rest) = origin.strip_prefix("https") {
            format!("wss{rest}")
        } else if let Some(rest) = origin.strip_prefix("http") {
            format!("ws{rest}")
        } else {
            origin
        };
        Ok(format!("{ws_origin}/ws"))
    }

    /// WebSocket-backed channel.
    ///
    /// Callback closures are handed to the browser and intentionally
    /// leaked (`Closure::forget`); they live exactly as long as the page,
    /// which is the socket's lifetime too - there is no reconnect.
    pub struct WsChannel {
        socket: WebSocket,
    }

    impl WsChannel {
        /// Open the connection eagerly. The channel is usable only once
        /// the `on_open` callback fires.
        pub fn connect(url: &str) -> Result<Self, JsValue> {
            let socket = WebSocket::new(url)?;
            Ok(Self { socket })
        }

        pub fn set_on_open(&self, mut callback: impl FnMut() + 'static) {
            let closure = Closure::<dyn FnMut()>::new(move || callback());
            self.socket
                .set_onopen(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        /// Register the snapshot-arrival callback. Malformed payloads are
        /// logged and dropped here; the callback only ever sees a parsed
        /// snapshot.
        pub fn set_on_snapshot(&self, mut callback: impl FnMut(Snapshot) + 'static) {
            let closure = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Ok(text) = event.data().dyn_into::<js_sys::JsString>() else {
                    log::error!("Service sent a non-text frame; ignoring");
                    return;
                };
                let text: String = text.into();
                match Snapshot::decode(&text) {
                    Ok(snapshot) => callback(snapshot),
                    Err(e) => log::error!("Dropping malformed snapshot: {e}"),
                }
            });
            self.socket
                .set_onmessage(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        pub fn set_on_close(&self, mut callback: impl FnMut() + 'static) {
            let closure = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
                log::info!("Socket closed (code {})", event.code());
                callback();
            });
            self.socket
                .set_onclose(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        pub fn set_on_error(&self, mut callback: impl FnMut() + 'static) {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
                log::error!("Socket errored");
                callback();
            });
            self.socket
                .set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
    }

    impl Channel for WsChannel {
        fn send(&mut self, message: &ClientMessage) -> Result<(), ChannelError> {
            if self.socket.ready_state() != WebSocket::OPEN {
                return Err(ChannelError::NotOpen);
            }
            let text = message
                .encode()
                .map_err(|e| ChannelError::Transport(e.to_string()))?;
            self.socket
                .send_with_str(&text)
                .map_err(|e| ChannelError::Transport(format!("{e:?}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_describe_themselves() {
        assert_eq!(ChannelError::NotOpen.to_string(), "channel is not open");
        assert_eq!(
            ChannelError::Transport("boom".to_string()).to_string(),
            "transport error: boom"
        );
    }
}
