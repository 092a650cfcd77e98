//! Value rules that serde's type checks cannot express.

use rpa_common::ConfigError;

use crate::schema::Settings;

/// Push an error if a pixel dimension is not positive.
fn validate_positive(errors: &mut Vec<String>, name: &str, value: u32) {
    if value == 0 {
        errors.push(format!("{name} = {value} must be a positive integer"));
    }
}

/// Run all validations on a settings record, collecting all errors.
pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_positive(&mut errors, "panelWidth", settings.panel_width);
    validate_positive(&mut errors, "panelHeight", settings.panel_height);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
