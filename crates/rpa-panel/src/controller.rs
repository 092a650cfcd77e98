//! Drives [`PanelApp`] in response to user actions.
//!
//! Every handler mutates local state first and only then talks to the
//! host; a failed host call becomes a toast, never an error for the UI.

use chrono::{SecondsFormat, Utc};
use rpa_bridge::{GroupActionPayload, GroupValue, HostBridge, ProcessResult, SaveResult};
use rpa_common::{PanelError, Toast};
use rpa_config::{Settings, Theme};
use tracing::{debug, info, warn};

use crate::app::PanelApp;
use crate::element::{ElementKind, ElementSpec, InputGroupSpec};
use crate::form::FormData;
use crate::interaction::Interaction;
use crate::log::LogOutcome;
use crate::modal::{ModalOutcome, ModalPrompt};

pub struct PanelController<B: HostBridge> {
    bridge: B,
    app: PanelApp,
}

impl<B: HostBridge> PanelController<B> {
    pub fn new(bridge: B) -> Self {
        Self {
            bridge,
            app: PanelApp::new(),
        }
    }

    pub fn app(&self) -> &PanelApp {
        &self.app
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Load settings from the host and announce readiness.
    pub async fn initialize(&mut self) {
        self.app.settings = self.bridge.load_settings().await;
        info!(theme = %self.app.settings.theme, "panel initialized");
        self.app.toast(Toast::success("Application initialized successfully"));
        self.log_event("UI RPA Testing Panel initialized");
    }

    /// Append to the event log, honouring auto-clear.
    pub fn log_event(&mut self, message: impl Into<String>) {
        let outcome = self.app.log.log(message, self.app.settings.auto_clear_log);
        if outcome == LogOutcome::AutoCleared {
            debug!("event log auto-cleared");
            self.app.toast(Toast::info("Event log cleared"));
        }
    }

    // -------------------------------------------------------------------------
    // Panel construction
    // -------------------------------------------------------------------------

    /// Wait for the dialog and add what it describes.
    pub async fn add_via_modal(&mut self, prompt: ModalPrompt) -> Result<String, PanelError> {
        let kind = prompt.kind();
        match prompt.await {
            ModalOutcome::Submitted(form) => self.add(kind, &form),
            ModalOutcome::Cancelled => {
                debug!(?kind, "add dialog cancelled");
                Err(PanelError::Cancelled)
            }
        }
    }

    /// Validate `form` for `kind` and add the element or group.
    ///
    /// Returns the new child's id. Invalid input adds nothing.
    pub fn add(&mut self, kind: ElementKind, form: &FormData) -> Result<String, PanelError> {
        let result = match kind {
            ElementKind::InputGroup => {
                InputGroupSpec::from_form(form).map(|spec| self.add_group(spec))
            }
            _ => ElementSpec::from_form(kind, form).map(|spec| self.add_element(spec)),
        };
        if let Err(e) = &result {
            warn!(?kind, error = %e, "element not added");
            self.app.toast(Toast::warning(format!("Element not added: {e}")));
        }
        result
    }

    fn add_element(&mut self, spec: ElementSpec) -> String {
        let message = format!("Added {}: {}", spec.type_name(), spec.label());
        let id = self.app.panel.add_element(spec);
        self.log_event(message);
        id
    }

    fn add_group(&mut self, spec: InputGroupSpec) -> String {
        let message = format!(
            "Added input group: {} with {} inputs{}",
            spec.name,
            spec.input_count,
            if spec.action_button.is_some() {
                " and action button"
            } else {
                ""
            }
        );
        let id = self.app.panel.add_group(spec);
        self.log_event(message);
        id
    }

    /// Log a simulated interaction with an element.
    pub fn record(&mut self, interaction: &Interaction) {
        self.log_event(interaction.message());
    }

    pub fn clear_panel(&mut self) {
        self.app.panel.clear();
        self.log_event("Panel cleared - all elements removed");
        self.app.toast(Toast::info("Panel cleared"));
    }

    pub fn clear_log(&mut self) {
        self.app.log.clear();
        self.app.toast(Toast::info("Event log cleared"));
    }

    // -------------------------------------------------------------------------
    // Exports
    // -------------------------------------------------------------------------

    /// The event log as text, for `event-log.txt`.
    pub fn export_log(&mut self) -> Result<String, PanelError> {
        match self.app.log.export_text() {
            Ok(text) => {
                self.app.toast(Toast::success("Event log exported"));
                self.log_event("Event log exported");
                Ok(text)
            }
            Err(e) => {
                self.app.toast(Toast::warning("No events to export"));
                Err(e)
            }
        }
    }

    /// The panel layout as JSON, for `panel-config.json`.
    pub fn export_panel(&mut self) -> rpa_common::Result<String> {
        let json = self.app.panel.export(Utc::now()).to_json()?;
        self.app.toast(Toast::success("Panel configuration exported"));
        self.log_event("Panel configuration exported");
        Ok(json)
    }

    // -------------------------------------------------------------------------
    // Theme and settings
    // -------------------------------------------------------------------------

    /// Flip light/dark. Persists right away when auto-save is on.
    pub async fn toggle_theme(&mut self) -> Theme {
        let theme = self.app.settings.theme.toggled();
        self.app.settings.theme = theme;
        if self.app.settings.auto_save {
            self.persist().await;
        }
        self.app.toast(Toast::info(format!("Switched to {theme} theme")));
        self.log_event(format!("Theme changed to {theme}"));
        theme
    }

    /// Open the settings dialog, remembering the current values.
    pub fn open_settings(&mut self) {
        self.app.backup_settings();
    }

    /// Close the dialog keeping whatever is currently applied.
    pub fn close_settings(&mut self) {
        self.app.take_backup();
    }

    /// Close the dialog and restore the values it opened with.
    pub fn cancel_settings(&mut self) {
        if let Some(backup) = self.app.take_backup() {
            self.app.settings = backup;
        }
        self.app.toast(Toast::info("Settings changes cancelled"));
    }

    /// Apply and persist the settings collected from the dialog.
    pub async fn save_settings(&mut self, updated: Settings) -> SaveResult {
        if let Err(e) = rpa_config::validation::validate(&updated) {
            warn!(error = %e, "settings rejected");
            self.app.toast(Toast::error("Failed to save settings"));
            return SaveResult::failure(e.to_string());
        }

        self.app.settings = updated;
        self.app.take_backup();
        let result = self.persist().await;
        if result.success {
            self.app.toast(Toast::success("Settings saved successfully"));
            self.log_event("Settings saved");
        }
        result
    }

    /// Restore defaults in the UI. Nothing is written until the next save.
    pub fn reset_settings(&mut self) {
        self.app.settings = Settings::default();
        self.app.toast(Toast::info("Settings reset to default"));
        self.log_event("Settings reset to default");
    }

    async fn persist(&mut self) -> SaveResult {
        let result = self.bridge.save_settings(&self.app.settings).await;
        if !result.success {
            warn!(error = result.error.as_deref().unwrap_or(""), "settings not saved");
            self.app.toast(Toast::error("Failed to save settings"));
        }
        result
    }

    // -------------------------------------------------------------------------
    // Input groups
    // -------------------------------------------------------------------------

    /// Press the action button of input group `group_id` with the current
    /// input `values`, in order, and forward them to the host.
    pub async fn group_action(
        &mut self,
        group_id: &str,
        values: &[String],
    ) -> Result<ProcessResult, PanelError> {
        let group = self
            .app
            .panel
            .group(group_id)
            .cloned()
            .ok_or_else(|| PanelError::InvalidField {
                field: "groupId",
                reason: format!("no input group {group_id:?}"),
            })?;
        if group.action_button.is_none() {
            return Err(PanelError::InvalidField {
                field: "groupId",
                reason: format!("group {group_id:?} has no action button"),
            });
        }
        if values.len() != group.input_count as usize {
            return Err(PanelError::InvalidField {
                field: "values",
                reason: format!("expected {} values, got {}", group.input_count, values.len()),
            });
        }

        let payload = GroupActionPayload {
            group_name: group.name.clone(),
            group_id: Some(group_id.to_string()),
            values: values
                .iter()
                .zip(0u32..)
                .map(|(value, index)| GroupValue {
                    index,
                    value: value.clone(),
                })
                .collect(),
            timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        };

        let raw_values = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
        self.log_event(format!(
            "Action button clicked for group \"{}\": {raw_values}",
            group.name
        ));
        let formatted = payload
            .values
            .iter()
            .map(|v| format!("{} {}: {}", group.name, v.index + 1, v.value))
            .collect::<Vec<_>>()
            .join(", ");
        self.log_event(format!("Processed: {formatted}"));
        self.app.toast(Toast::success(format!("Group \"{}\" processed", group.name)));

        let result = self.bridge.process_group_data(&payload).await;
        if !result.success {
            warn!(
                group = %group.name,
                error = result.error.as_deref().unwrap_or(""),
                "host did not process group data"
            );
            self.app.toast(Toast::error(format!("Group \"{}\" not processed", group.name)));
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rpa_common::ToastLevel;
    use std::sync::Mutex;

    /// Records every call; answers from canned values.
    #[derive(Default)]
    struct FakeBridge {
        stored: Mutex<Option<Settings>>,
        saves: Mutex<Vec<Settings>>,
        processed: Mutex<Vec<GroupActionPayload>>,
        fail_saves: bool,
    }

    #[async_trait]
    impl HostBridge for FakeBridge {
        async fn save_settings(&self, settings: &Settings) -> SaveResult {
            if self.fail_saves {
                return SaveResult::failure("disk full");
            }
            self.saves.lock().unwrap().push(settings.clone());
            *self.stored.lock().unwrap() = Some(settings.clone());
            SaveResult::ok()
        }

        async fn load_settings(&self) -> Settings {
            self.stored.lock().unwrap().clone().unwrap_or_default()
        }

        async fn process_group_data(&self, payload: &GroupActionPayload) -> ProcessResult {
            self.processed.lock().unwrap().push(payload.clone());
            ProcessResult::acknowledged(serde_json::to_value(payload).unwrap())
        }
    }

    fn controller() -> PanelController<FakeBridge> {
        PanelController::new(FakeBridge::default())
    }

    fn last_log(c: &PanelController<FakeBridge>) -> String {
        c.app().log.latest().map(|e| e.message.clone()).unwrap_or_default()
    }

    fn group_form(name: &str, count: &str) -> FormData {
        FormData::new()
            .with("groupName", name)
            .with("inputCount", count)
            .with("actionButtonText", "Send")
            .with("includeActionButton", "true")
    }

    #[tokio::test]
    async fn initialize_loads_stored_settings() {
        let bridge = FakeBridge::default();
        *bridge.stored.lock().unwrap() = Some(Settings {
            theme: Theme::Dark,
            ..Default::default()
        });
        let mut c = PanelController::new(bridge);
        c.initialize().await;

        assert_eq!(c.app().settings.theme, Theme::Dark);
        assert_eq!(last_log(&c), "UI RPA Testing Panel initialized");
        assert_eq!(c.app().toasts.last().unwrap().level, ToastLevel::Success);
    }

    #[tokio::test]
    async fn add_logs_and_assigns_ids() {
        let mut c = controller();
        let id = c
            .add(ElementKind::Button, &FormData::new().with("buttonName", "Go"))
            .unwrap();
        assert_eq!(id, "element-0");
        assert_eq!(last_log(&c), "Added button: Go");

        let gid = c.add(ElementKind::InputGroup, &group_form("Addr", "2")).unwrap();
        assert_eq!(gid, "group-0");
        assert_eq!(
            last_log(&c),
            "Added input group: Addr with 2 inputs and action button"
        );
        assert_eq!(c.app().statistics().elements, 2);
    }

    #[tokio::test]
    async fn invalid_form_adds_nothing_and_warns() {
        let mut c = controller();
        let err = c
            .add(ElementKind::Radio, &FormData::new().with("radioGroupName", "R"))
            .unwrap_err();
        assert!(matches!(err, PanelError::MissingField("radioOptions")));
        assert!(c.app().panel.is_empty());
        assert!(c.app().log.is_empty());
        assert_eq!(c.app().toasts.last().unwrap().level, ToastLevel::Warning);
    }

    #[tokio::test]
    async fn cancelled_modal_adds_nothing() {
        let mut c = controller();
        let (prompt, responder) = ModalPrompt::request(ElementKind::Text);
        responder.cancel();
        assert!(matches!(
            c.add_via_modal(prompt).await,
            Err(PanelError::Cancelled)
        ));
        assert!(c.app().panel.is_empty());
    }

    #[tokio::test]
    async fn submitted_modal_adds_element() {
        let mut c = controller();
        let (prompt, responder) = ModalPrompt::request(ElementKind::Text);
        responder.submit(FormData::new().with("textContent", "Hello"));
        assert_eq!(c.add_via_modal(prompt).await.unwrap(), "element-0");
        assert_eq!(last_log(&c), "Added text: Hello");
    }

    #[tokio::test]
    async fn theme_toggle_without_auto_save_does_not_persist() {
        let mut c = controller();
        assert_eq!(c.toggle_theme().await, Theme::Dark);
        assert!(c.bridge().saves.lock().unwrap().is_empty());
        assert_eq!(last_log(&c), "Theme changed to dark");
    }

    #[tokio::test]
    async fn theme_toggle_with_auto_save_persists() {
        let mut c = controller();
        c.app.settings.auto_save = true;
        c.toggle_theme().await;
        c.toggle_theme().await;

        let saves = c.bridge().saves.lock().unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].theme, Theme::Dark);
        assert_eq!(saves[1].theme, Theme::Light);
    }

    #[tokio::test]
    async fn cancel_restores_backup() {
        let mut c = controller();
        c.open_settings();
        c.app.settings.panel_width = 1234;
        c.cancel_settings();
        assert_eq!(c.app().settings, Settings::default());
        assert!(!c.app().settings_open());
    }

    #[tokio::test]
    async fn save_settings_persists_and_logs() {
        let mut c = controller();
        c.open_settings();
        let updated = Settings {
            button_text_add: "New".into(),
            ..Default::default()
        };
        let result = c.save_settings(updated.clone()).await;
        assert!(result.success);
        assert_eq!(c.app().settings, updated);
        assert!(!c.app().settings_open());
        assert_eq!(c.bridge().saves.lock().unwrap().as_slice(), &[updated]);
        assert_eq!(last_log(&c), "Settings saved");
    }

    #[tokio::test]
    async fn save_settings_rejects_invalid_values() {
        let mut c = controller();
        let result = c
            .save_settings(Settings {
                panel_width: 0,
                ..Default::default()
            })
            .await;
        assert!(!result.success);
        assert_eq!(c.app().settings, Settings::default());
        assert!(c.bridge().saves.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_save_becomes_error_toast() {
        let mut c = PanelController::new(FakeBridge {
            fail_saves: true,
            ..Default::default()
        });
        let result = c.save_settings(Settings::default()).await;
        assert_eq!(result.error.as_deref(), Some("disk full"));
        assert_eq!(c.app().toasts.last().unwrap().level, ToastLevel::Error);
        assert!(c.app().log.is_empty());
    }

    #[tokio::test]
    async fn reset_does_not_persist() {
        let mut c = controller();
        c.app.settings.theme = Theme::Dark;
        c.reset_settings();
        assert_eq!(c.app().settings, Settings::default());
        assert!(c.bridge().saves.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn group_action_forwards_payload() {
        let mut c = controller();
        let gid = c.add(ElementKind::InputGroup, &group_form("Addr", "2")).unwrap();

        let values = vec!["Main St".to_string(), "42".to_string()];
        let result = c.group_action(&gid, &values).await.unwrap();
        assert!(result.success);

        let processed = c.bridge().processed.lock().unwrap();
        let payload = &processed[0];
        assert_eq!(payload.group_name, "Addr");
        assert_eq!(payload.group_id.as_deref(), Some("group-0"));
        assert_eq!(payload.values[1], GroupValue { index: 1, value: "42".into() });
        assert!(payload.timestamp.is_some());
        drop(processed);

        assert_eq!(last_log(&c), "Processed: Addr 1: Main St, Addr 2: 42");
    }

    #[tokio::test]
    async fn group_action_validates_target() {
        let mut c = controller();
        let eid = c
            .add(ElementKind::Button, &FormData::new().with("buttonName", "b"))
            .unwrap();
        assert!(c.group_action(&eid, &[]).await.is_err());

        let no_button = FormData::new()
            .with("groupName", "G")
            .with("inputCount", "1");
        let gid = c.add(ElementKind::InputGroup, &no_button).unwrap();
        assert!(c.group_action(&gid, &["x".to_string()]).await.is_err());

        let gid = c.add(ElementKind::InputGroup, &group_form("H", "2")).unwrap();
        assert!(c.group_action(&gid, &["only one".to_string()]).await.is_err());
        assert!(c.bridge().processed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn auto_clear_applies_through_controller() {
        let mut c = controller();
        c.app.settings.auto_clear_log = true;
        for i in 0..99 {
            c.record(&Interaction::ButtonClicked {
                label: format!("b{i}"),
            });
        }
        assert_eq!(c.app().statistics().events, 99);
        c.record(&Interaction::ButtonClicked { label: "last".into() });
        assert_eq!(c.app().statistics().events, 0);
        assert_eq!(c.app().toasts.last().unwrap().message, "Event log cleared");
    }

    #[tokio::test]
    async fn exports() {
        let mut c = controller();
        assert!(matches!(c.export_log(), Err(PanelError::NothingToExport)));

        c.add(ElementKind::Button, &FormData::new().with("buttonName", "Go"))
            .unwrap();
        let text = c.export_log().unwrap();
        assert!(text.ends_with("] Added button: Go"));

        let json = c.export_panel().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["elementCount"], 1);
        assert_eq!(doc["elements"][0]["id"], "element-0");
    }

    #[tokio::test]
    async fn clear_panel_resets_ids() {
        let mut c = controller();
        c.add(ElementKind::Button, &FormData::new().with("buttonName", "a"))
            .unwrap();
        c.clear_panel();
        assert_eq!(c.app().statistics().elements, 0);
        let id = c
            .add(ElementKind::Button, &FormData::new().with("buttonName", "b"))
            .unwrap();
        assert_eq!(id, "element-0");
    }
}
