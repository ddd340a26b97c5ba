//! Transient per-flow UI flags.
//!
//! Flags such as "secret revealed" or "picker expanded" are keyed by
//! credential key and live only as long as the flow that owns them. Nothing
//! here is ever persisted.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyFlags {
    pub picker_open: bool,
    pub secret_revealed: bool,
}

/// Flags for one open flow, dropped when the flow ends.
#[derive(Debug, Default)]
pub struct ModalState {
    flags: HashMap<String, KeyFlags>,
}

impl ModalState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn flags(&self, key: &str) -> KeyFlags {
        self.flags.get(key).copied().unwrap_or_default()
    }

    pub fn open_picker(&mut self, key: &str) {
        self.flags.entry(key.to_string()).or_default().picker_open = true;
    }

    pub fn close_picker(&mut self, key: &str) {
        self.flags.entry(key.to_string()).or_default().picker_open = false;
    }

    /// Flip the reveal flag for `key` and return the new value.
    pub fn toggle_reveal(&mut self, key: &str) -> bool {
        let flags = self.flags.entry(key.to_string()).or_default();
        flags.secret_revealed = !flags.secret_revealed;
        flags.secret_revealed
    }

    /// Tear everything down, as when the modal closes.
    pub fn reset(&mut self) {
        self.flags.clear();
    }
}
