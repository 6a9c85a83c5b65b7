//! Terms-and-conditions overlay state and its inter-frame close signal.
//!
//! The overlay tracks a visible flag and an accessibility hidden flag that
//! move in lockstep, never one without the other. It is dismissed either by
//! a click landing exactly on the backdrop (not the inner dialog) or by a
//! message from the embedded terms document whose payload is the close
//! sentinel. Every other message payload is ignored.

use tokio::sync::mpsc;

/// Payload the embedded terms document posts to ask its host to close the
/// overlay. Any other payload is not actionable.
pub const CLOSE_TERMS_SENTINEL: &str = "closeTC";

/// Where inside the overlay a dismissal click landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayClick {
    /// The click hit the overlay backdrop itself.
    Backdrop,
    /// The click hit the inner dialog (or anything inside it).
    Dialog,
}

/// Terms overlay visibility state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermsOverlay {
    visible: bool,
    aria_hidden: bool,
}

impl TermsOverlay {
    /// Creates the overlay in its hidden state.
    pub fn new() -> Self {
        Self {
            visible: false,
            aria_hidden: true,
        }
    }

    /// Shows the overlay, updating both flags in lockstep.
    pub fn open(&mut self) {
        self.visible = true;
        self.aria_hidden = false;
    }

    /// Hides the overlay, updating both flags in lockstep.
    pub fn close(&mut self) {
        self.visible = false;
        self.aria_hidden = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn aria_hidden(&self) -> bool {
        self.aria_hidden
    }

    /// Handles a dismissal click. Only a click landing exactly on the
    /// backdrop closes the overlay.
    pub fn click(&mut self, target: OverlayClick) {
        if target == OverlayClick::Backdrop {
            self.close();
        }
    }

    /// Handles one inter-frame message payload.
    ///
    /// Closes the overlay iff the payload is [`CLOSE_TERMS_SENTINEL`];
    /// anything else leaves the overlay state unchanged.
    pub fn handle_message(&mut self, payload: &str) {
        if payload == CLOSE_TERMS_SENTINEL {
            self.close();
        } else {
            tracing::debug!(payload, "ignoring unrecognised frame message");
        }
    }
}

impl Default for TermsOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of the inter-frame message channel, held by whatever stands
/// in for the embedded terms document.
pub type FrameSender = mpsc::UnboundedSender<String>;

/// Receiving half of the inter-frame message channel, drained by the host
/// controller.
#[derive(Debug)]
pub struct FrameMessages {
    rx: mpsc::UnboundedReceiver<String>,
}

/// Creates the inter-frame message channel.
pub fn frame_message_channel() -> (FrameSender, FrameMessages) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, FrameMessages { rx })
}

impl FrameMessages {
    /// Waits for the next message from the embedded document, or `None` once
    /// every sender is gone.
    pub async fn recv(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    /// Returns the next already-delivered message without waiting.
    pub fn try_recv(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}
