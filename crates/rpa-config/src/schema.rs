//! The persisted preference record and its enumerations.
//!
//! Field names serialize in camelCase to match the on-disk
//! `settings.json` document. Every field has a default so a partial
//! record still yields a complete `Settings`.

use serde::{Deserialize, Serialize};

/// Color theme of the panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Speed of UI transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    None,
    Fast,
    #[default]
    Normal,
    Slow,
}

impl AnimationSpeed {
    /// CSS transition duration in milliseconds.
    pub fn transition_ms(self) -> u32 {
        match self {
            AnimationSpeed::None => 0,
            AnimationSpeed::Fast => 100,
            AnimationSpeed::Normal => 250,
            AnimationSpeed::Slow => 400,
        }
    }
}

/// User preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub button_text_add: String,
    pub button_text_input: String,
    pub button_text_input_group: String,
    pub button_text_text: String,
    pub button_text_radio: String,
    pub button_text_checkbox: String,
    pub button_text_dropdown: String,
    /// Minimum panel width in pixels.
    pub panel_width: u32,
    /// Minimum panel height in pixels.
    pub panel_height: u32,
    pub theme: Theme,
    /// Persist immediately after a theme toggle.
    pub auto_save: bool,
    /// Clear the event log once it reaches 100 entries.
    pub auto_clear_log: bool,
    pub animation_speed: AnimationSpeed,
    pub show_tooltips: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            button_text_add: "Add Button".into(),
            button_text_input: "Add Input Dialog".into(),
            button_text_input_group: "Add Input Group".into(),
            button_text_text: "Add Text".into(),
            button_text_radio: "Add Radio Button".into(),
            button_text_checkbox: "Add Checkbox".into(),
            button_text_dropdown: "Add Dropdown".into(),
            panel_width: 800,
            panel_height: 400,
            theme: Theme::Light,
            auto_save: false,
            auto_clear_log: false,
            animation_speed: AnimationSpeed::Normal,
            show_tooltips: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
