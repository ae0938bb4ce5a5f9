//! Events flowing outward from the terminal core.
//!
//! The `EventListener` trait decouples `History<T>` from the host: tests
//! use `VoidListener`, a real host routes titles to its window and
//! `PtyWrite` bytes back to the child process.

use std::fmt;

/// Outward-bound terminal events.
#[derive(Clone, PartialEq, Eq)]
pub enum Event {
    /// Window title changed (OSC 0/2).
    Title(String),
    /// Response bytes for the child process (DSR reports).
    PtyWrite(Vec<u8>),
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title(title) => write!(f, "Title({title})"),
            Self::PtyWrite(bytes) => write!(f, "PtyWrite({})", String::from_utf8_lossy(bytes)),
        }
    }
}

/// Receives events from `History<T>`.
///
/// The default implementation is a no-op so `VoidListener` needs no body.
/// Bound `Send + 'static` because hosts commonly drive the core from a pty
/// reader thread.
pub trait EventListener: Send + 'static {
    /// Handle a terminal event. Default: no-op.
    fn send_event(&self, _event: Event) {}
}

/// No-op listener for tests and headless operation.
pub struct VoidListener;

impl EventListener for VoidListener {}

#[cfg(test)]
mod tests {
    use super::{Event, EventListener, VoidListener};

    #[test]
    fn void_listener_swallows_events() {
        let listener = VoidListener;
        listener.send_event(Event::Title("ignored".into()));
    }

    #[test]
    fn debug_formats_payloads() {
        assert_eq!(format!("{:?}", Event::Title("hi".into())), "Title(hi)");
        assert_eq!(
            format!("{:?}", Event::PtyWrite(b"\x1b[1;1R".to_vec())),
            "PtyWrite(\u{1b}[1;1R)"
        );
    }
}
