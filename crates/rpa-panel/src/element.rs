//! Panel element kinds, validated from modal form data.
//!
//! Each `from_form` constructor either yields a fully valid spec or a
//! [`PanelError`]; there is no partially built element.

use rpa_common::PanelError;
use rpa_config::Settings;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::form::FormData;

/// Largest number of inputs an input group may hold.
pub const MAX_GROUP_INPUTS: u32 = 20;

/// Action button text used when the form leaves it blank.
pub const DEFAULT_ACTION_TEXT: &str = "Submit";

/// The seven things the toolbar can add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Button,
    Input,
    InputGroup,
    Text,
    Radio,
    Checkbox,
    Dropdown,
}

impl ElementKind {
    /// Toolbar label for this kind under the given settings.
    pub fn toolbar_label(self, settings: &Settings) -> &str {
        match self {
            ElementKind::Button => &settings.button_text_add,
            ElementKind::Input => &settings.button_text_input,
            ElementKind::InputGroup => &settings.button_text_input_group,
            ElementKind::Text => &settings.button_text_text,
            ElementKind::Radio => &settings.button_text_radio,
            ElementKind::Checkbox => &settings.button_text_checkbox,
            ElementKind::Dropdown => &settings.button_text_dropdown,
        }
    }

    /// Title of the modal that collects this kind's fields.
    pub fn modal_title(self) -> &'static str {
        match self {
            ElementKind::Button => "Add Button",
            ElementKind::Input => "Add Input",
            ElementKind::InputGroup => "Add Input Group",
            ElementKind::Text => "Add Text",
            ElementKind::Radio => "Add Radio Button",
            ElementKind::Checkbox => "Add Checkbox",
            ElementKind::Dropdown => "Add Dropdown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    #[default]
    Success,
    Primary,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Date,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    #[default]
    Normal,
    Heading,
    Subheading,
    Caption,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextColor {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Danger,
    Secondary,
}

/// A single panel element. Input groups are separate ([`InputGroupSpec`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementSpec {
    Button {
        label: String,
        color: ButtonColor,
    },
    Input {
        label: String,
        input_type: InputType,
        required: bool,
    },
    Text {
        content: String,
        style: TextStyle,
        color: TextColor,
    },
    Radio {
        label: String,
        options: Vec<String>,
        /// 1-based; 0 selects nothing.
        default_selection: usize,
    },
    Checkbox {
        label: String,
        options: Vec<String>,
        /// 1-based indices of the options checked initially.
        default_selections: Vec<usize>,
    },
    Dropdown {
        label: String,
        options: Vec<String>,
        /// 1-based; 0 selects the empty placeholder.
        default_selection: usize,
        required: bool,
    },
}

impl ElementSpec {
    /// Validate the modal fields for `kind`.
    ///
    /// `ElementKind::InputGroup` is not an element; use
    /// [`InputGroupSpec::from_form`] for it.
    pub fn from_form(kind: ElementKind, form: &FormData) -> Result<Self, PanelError> {
        match kind {
            ElementKind::Button => Ok(ElementSpec::Button {
                label: form.required_text("buttonName")?.to_string(),
                color: parse_choice(form, "buttonColor")?,
            }),
            ElementKind::Input => Ok(ElementSpec::Input {
                label: form.required_text("inputLabel")?.to_string(),
                input_type: parse_choice(form, "inputType")?,
                required: form.flag("inputRequired"),
            }),
            ElementKind::Text => Ok(ElementSpec::Text {
                content: form.required_text("textContent")?.to_string(),
                style: parse_choice(form, "textStyle")?,
                color: parse_choice(form, "textColor")?,
            }),
            ElementKind::Radio => {
                let label = form.required_text("radioGroupName")?.to_string();
                let options = form.options("radioOptions")?;
                let default_selection = parse_selection(form, "radioDefault", options.len())?;
                Ok(ElementSpec::Radio {
                    label,
                    options,
                    default_selection,
                })
            }
            ElementKind::Checkbox => {
                let label = form.required_text("checkboxGroupName")?.to_string();
                let options = form.options("checkboxOptions")?;
                let default_selections =
                    parse_selections(form, "checkboxDefaults", options.len())?;
                Ok(ElementSpec::Checkbox {
                    label,
                    options,
                    default_selections,
                })
            }
            ElementKind::Dropdown => {
                let label = form.required_text("dropdownLabel")?.to_string();
                let options = form.options("dropdownOptions")?;
                let default_selection =
                    parse_selection(form, "dropdownDefault", options.len())?;
                Ok(ElementSpec::Dropdown {
                    label,
                    options,
                    default_selection,
                    required: form.flag("dropdownRequired"),
                })
            }
            ElementKind::InputGroup => Err(PanelError::InvalidField {
                field: "kind",
                reason: "input groups are not single elements".into(),
            }),
        }
    }

    /// Element type name, as used in the event log and exports.
    pub fn type_name(&self) -> &'static str {
        match self {
            ElementSpec::Button { .. } => "button",
            ElementSpec::Input { .. } => "input",
            ElementSpec::Text { .. } => "text",
            ElementSpec::Radio { .. } => "radio",
            ElementSpec::Checkbox { .. } => "checkbox",
            ElementSpec::Dropdown { .. } => "dropdown",
        }
    }

    /// The user-facing label (or text content).
    pub fn label(&self) -> &str {
        match self {
            ElementSpec::Button { label, .. }
            | ElementSpec::Input { label, .. }
            | ElementSpec::Radio { label, .. }
            | ElementSpec::Checkbox { label, .. }
            | ElementSpec::Dropdown { label, .. } => label,
            ElementSpec::Text { content, .. } => content,
        }
    }

    /// All visible text of the rendered element, in document order.
    pub fn text_content(&self) -> String {
        match self {
            ElementSpec::Button { label, .. } => label.clone(),
            ElementSpec::Input {
                label, required, ..
            }
            | ElementSpec::Dropdown {
                label, required, ..
            } if *required => format!("{label} *"),
            ElementSpec::Input { label, .. } | ElementSpec::Dropdown { label, .. } => {
                label.clone()
            }
            ElementSpec::Text { content, .. } => content.clone(),
            ElementSpec::Radio { label, options, .. }
            | ElementSpec::Checkbox { label, options, .. } => {
                std::iter::once(label.as_str())
                    .chain(options.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

/// An input group: N labelled text inputs and an optional action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputGroupSpec {
    pub name: String,
    pub input_count: u32,
    /// Action button text, `None` when the group has no button.
    pub action_button: Option<String>,
}

impl InputGroupSpec {
    pub fn from_form(form: &FormData) -> Result<Self, PanelError> {
        let name = form.required_text("groupName")?.to_string();
        let raw_count = form.required_text("inputCount")?;
        let input_count: u32 = raw_count.parse().map_err(|_| PanelError::InvalidField {
            field: "inputCount",
            reason: format!("{raw_count:?} is not a whole number"),
        })?;
        if !(1..=MAX_GROUP_INPUTS).contains(&input_count) {
            return Err(PanelError::InvalidField {
                field: "inputCount",
                reason: format!("must be between 1 and {MAX_GROUP_INPUTS}, got {input_count}"),
            });
        }

        let action_button = form.flag("includeActionButton").then(|| {
            form.optional_text("actionButtonText")
                .unwrap_or(DEFAULT_ACTION_TEXT)
                .to_string()
        });

        Ok(Self {
            name,
            input_count,
            action_button,
        })
    }

    /// Label of the input at 0-based `index`.
    pub fn input_label(&self, index: u32) -> String {
        format!("{} {}", self.name, index + 1)
    }
}

// =============================================================================
// FIELD PARSERS
// =============================================================================

/// Parse a select field into its enum; blank means the default choice.
fn parse_choice<T>(form: &FormData, field: &'static str) -> Result<T, PanelError>
where
    T: DeserializeOwned + Default,
{
    match form.optional_text(field) {
        None => Ok(T::default()),
        Some(raw) => serde_json::from_value(serde_json::Value::String(raw.to_string())).map_err(
            |_| PanelError::InvalidField {
                field,
                reason: format!("unknown choice {raw:?}"),
            },
        ),
    }
}

/// A 1-based selection in `0..=option_count`; blank means none (0).
fn parse_selection(
    form: &FormData,
    field: &'static str,
    option_count: usize,
) -> Result<usize, PanelError> {
    let Some(raw) = form.optional_text(field) else {
        return Ok(0);
    };
    let selection: usize = raw.parse().map_err(|_| PanelError::InvalidField {
        field,
        reason: format!("{raw:?} is not a whole number"),
    })?;
    if selection > option_count {
        return Err(PanelError::InvalidField {
            field,
            reason: format!("selection {selection} but only {option_count} options"),
        });
    }
    Ok(selection)
}

/// Comma-separated 1-based selections. Non-numeric entries are skipped.
fn parse_selections(
    form: &FormData,
    field: &'static str,
    option_count: usize,
) -> Result<Vec<usize>, PanelError> {
    let Some(raw) = form.optional_text(field) else {
        return Ok(Vec::new());
    };
    let mut selections = Vec::new();
    for n in raw.split(',').filter_map(|part| part.trim().parse::<usize>().ok()) {
        if n == 0 || n > option_count {
            return Err(PanelError::InvalidField {
                field,
                reason: format!("option {n} does not exist"),
            });
        }
        if !selections.contains(&n) {
            selections.push(n);
        }
    }
    Ok(selections)
}
