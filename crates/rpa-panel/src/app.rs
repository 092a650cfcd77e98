//! UI-side application state.

use rpa_common::{Toast, ToastQueue};
use rpa_config::Settings;

use crate::log::EventLog;
use crate::panel::Panel;

/// How many toasts may be on screen at once.
const TOAST_CAPACITY: usize = 8;

/// Figures shown in the statistics bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub elements: usize,
    pub events: u64,
}

/// Everything the panel UI holds in memory. Only `settings` is ever
/// persisted, and only through the bridge.
#[derive(Debug)]
pub struct PanelApp {
    pub settings: Settings,
    /// Snapshot taken when the settings dialog opens.
    settings_backup: Option<Settings>,
    pub panel: Panel,
    pub log: EventLog,
    pub toasts: ToastQueue,
}

impl PanelApp {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            settings_backup: None,
            panel: Panel::new(),
            log: EventLog::new(),
            toasts: ToastQueue::new(TOAST_CAPACITY),
        }
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            elements: self.panel.len(),
            events: self.log.event_count(),
        }
    }

    /// CSS transition length for the current animation speed.
    pub fn transition_ms(&self) -> u32 {
        self.settings.animation_speed.transition_ms()
    }

    pub fn settings_open(&self) -> bool {
        self.settings_backup.is_some()
    }

    pub(crate) fn backup_settings(&mut self) {
        self.settings_backup = Some(self.settings.clone());
    }

    pub(crate) fn take_backup(&mut self) -> Option<Settings> {
        self.settings_backup.take()
    }

    pub(crate) fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

impl Default for PanelApp {
    fn default() -> Self {
        Self::new()
    }
}
