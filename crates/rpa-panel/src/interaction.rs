//! Simulated user interactions with added elements.

/// Something the user did to an element on the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    ButtonClicked { label: String },
    InputChanged { label: String, value: String },
    RadioSelected { label: String, option: String },
    CheckboxToggled { label: String, option: String, checked: bool },
    DropdownChanged { label: String, value: String },
    /// `index` is 0-based.
    GroupInputChanged { group: String, index: u32, value: String },
}

impl Interaction {
    /// The event log line for this interaction.
    pub fn message(&self) -> String {
        match self {
            Interaction::ButtonClicked { label } => format!("Button clicked: {label}"),
            Interaction::InputChanged { label, value } => {
                format!("Input changed: {label} = {value}")
            }
            Interaction::RadioSelected { label, option } => {
                format!("Radio selected: {label} = {option}")
            }
            Interaction::CheckboxToggled {
                label,
                option,
                checked,
            } => {
                let action = if *checked { "checked" } else { "unchecked" };
                format!("Checkbox {action}: {label} - {option}")
            }
            Interaction::DropdownChanged { label, value } => {
                format!("Dropdown changed: {label} = {value}")
            }
            Interaction::GroupInputChanged {
                group,
                index,
                value,
            } => format!("Group {group} - Input {}: {value}", index + 1),
        }
    }
}
