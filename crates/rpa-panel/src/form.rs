//! Submitted modal form fields.

use std::collections::HashMap;

use rpa_common::PanelError;

/// Field name to raw value, as collected from a modal on submit.
///
/// Checkbox fields carry `"true"` or `"false"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Raw value, untrimmed.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn optional_text(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Trimmed value that must be present and non-blank.
    pub fn required_text(&self, name: &'static str) -> Result<&str, PanelError> {
        self.optional_text(name).ok_or(PanelError::MissingField(name))
    }

    /// A checkbox field. Anything but `"true"` is unchecked.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name) == Some("true")
    }

    /// Option list, one per line; blank lines are dropped and entries trimmed.
    pub fn options(&self, name: &'static str) -> Result<Vec<String>, PanelError> {
        let options: Vec<String> = self
            .required_text(name)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if options.is_empty() {
            return Err(PanelError::MissingField(name));
        }
        Ok(options)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (k, v) in iter {
            form.insert(k, v);
        }
        form
    }
}
