//! The panel under test: an ordered list of added elements and groups.
//!
//! Ids come from two per-session counters (`element-N`, `group-N`) that
//! only move forward until the panel is cleared.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::element::{ElementSpec, InputGroupSpec};

/// What a panel child holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildKind {
    Element(ElementSpec),
    Group(InputGroupSpec),
}

/// One child of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelChild {
    pub id: String,
    pub kind: ChildKind,
}

impl PanelChild {
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            ChildKind::Element(spec) => spec.type_name(),
            ChildKind::Group(_) => "group",
        }
    }

    /// CSS class of the rendered wrapper.
    pub fn class_name(&self) -> &'static str {
        match self.kind {
            ChildKind::Element(_) => "element-wrapper",
            ChildKind::Group(_) => "input-group-container card",
        }
    }

    pub fn text_content(&self) -> String {
        match &self.kind {
            ChildKind::Element(spec) => spec.text_content(),
            ChildKind::Group(group) => {
                let mut text = format!("{} {} inputs", group.name, group.input_count);
                for i in 0..group.input_count {
                    text.push(' ');
                    text.push_str(&group.input_label(i));
                    text.push(':');
                }
                if let Some(action) = &group.action_button {
                    text.push(' ');
                    text.push_str(action);
                }
                text
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Panel {
    children: Vec<PanelChild>,
    next_element: u64,
    next_group: u64,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its id.
    pub fn add_element(&mut self, spec: ElementSpec) -> String {
        let id = format!("element-{}", self.next_element);
        self.next_element += 1;
        self.children.push(PanelChild {
            id: id.clone(),
            kind: ChildKind::Element(spec),
        });
        id
    }

    /// Append an input group and return its id.
    pub fn add_group(&mut self, spec: InputGroupSpec) -> String {
        let id = format!("group-{}", self.next_group);
        self.next_group += 1;
        self.children.push(PanelChild {
            id: id.clone(),
            kind: ChildKind::Group(spec),
        });
        id
    }

    /// Remove every child and reset both id counters.
    pub fn clear(&mut self) {
        self.children.clear();
        self.next_element = 0;
        self.next_group = 0;
    }

    pub fn children(&self) -> &[PanelChild] {
        &self.children
    }

    pub fn get(&self, id: &str) -> Option<&PanelChild> {
        self.children.iter().find(|c| c.id == id)
    }

    /// The input group with `id`, if that child is a group.
    pub fn group(&self, id: &str) -> Option<&InputGroupSpec> {
        match self.get(id) {
            Some(PanelChild {
                kind: ChildKind::Group(group),
                ..
            }) => Some(group),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Snapshot of the panel layout at `at`.
    pub fn export(&self, at: DateTime<Utc>) -> PanelExport {
        PanelExport {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            element_count: self.children.len(),
            elements: self
                .children
                .iter()
                .map(|child| ExportedElement {
                    element_type: child.type_name().to_string(),
                    id: child.id.clone(),
                    content: child.text_content(),
                    class_name: child.class_name().to_string(),
                })
                .collect(),
        }
    }
}

/// File name used for panel exports.
pub const PANEL_EXPORT_FILE: &str = "panel-config.json";

/// The `panel-config.json` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelExport {
    pub timestamp: String,
    pub element_count: usize,
    pub elements: Vec<ExportedElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: String,
    pub content: String,
    pub class_name: String,
}

impl PanelExport {
    /// Pretty-printed JSON, two-space indent.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
