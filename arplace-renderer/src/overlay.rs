//! Instruction and status text shown over the AR view

use arplace_core::config::OverlayConfig;

/// Checkpoints at which the overlay text changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMessage {
    Unsupported,
    SessionFailed,
    LoadFailed,
    Placed,
}

impl OverlayMessage {
    /// The configured copy for this checkpoint
    pub fn text<'a>(&self, config: &'a OverlayConfig) -> &'a str {
        match self {
            OverlayMessage::Unsupported => &config.unsupported_message,
            OverlayMessage::SessionFailed => &config.session_failed_message,
            OverlayMessage::LoadFailed => &config.load_failed_message,
            OverlayMessage::Placed => &config.placed_message,
        }
    }
}

/// A text sink for overlay messages
pub trait Overlay {
    fn set_text(&mut self, text: &str);
}

/// Overlay for native builds: writes messages to the log
#[derive(Debug, Default)]
pub struct LogOverlay {
    last: Option<String>,
}

impl LogOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Overlay for LogOverlay {
    fn set_text(&mut self, text: &str) {
        log::info!("overlay: {}", text);
        self.last = Some(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text() {
        let config = OverlayConfig::default();
        assert_eq!(
            OverlayMessage::Placed.text(&config),
            "Drag with one finger to rotate the model."
        );
        assert_eq!(
            OverlayMessage::LoadFailed.text(&config),
            config.load_failed_message
        );
    }

    #[test]
    fn test_log_overlay_keeps_last() {
        let mut overlay = LogOverlay::new();
        assert_eq!(overlay.last(), None);
        overlay.set_text("first");
        overlay.set_text("second");
        assert_eq!(overlay.last(), Some("second"));
    }
}
