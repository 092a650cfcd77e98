//! A full panel session against a real host over the bridge.

use std::sync::Arc;

use rpa_bridge::{BridgeClient, BridgeHost};
use rpa_config::{SettingsStore, Theme};
use rpa_panel::{ElementKind, FormData, ModalPrompt, PanelController};
use tempfile::TempDir;

fn connect(dir: &TempDir) -> (Arc<BridgeHost>, PanelController<BridgeClient>) {
    let host = Arc::new(BridgeHost::new(SettingsStore::new(
        dir.path().join("settings.json"),
    )));
    let client = BridgeClient::connect(Arc::clone(&host));
    (host, PanelController::new(client))
}

#[tokio::test]
async fn theme_toggle_with_auto_save_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let (_host, mut panel) = connect(&dir);
        panel.initialize().await;
        assert_eq!(panel.app().settings.theme, Theme::Light);

        let mut settings = panel.app().settings.clone();
        settings.auto_save = true;
        assert!(panel.save_settings(settings).await.success);
        panel.toggle_theme().await;
    }

    let (_host, mut panel) = connect(&dir);
    panel.initialize().await;
    assert_eq!(panel.app().settings.theme, Theme::Dark);
    assert!(panel.app().settings.auto_save);
}

#[tokio::test]
async fn settings_file_is_pretty_camel_case() {
    let dir = TempDir::new().unwrap();
    let (host, mut panel) = connect(&dir);
    panel.initialize().await;

    let mut settings = panel.app().settings.clone();
    settings.panel_width = 1000;
    assert!(panel.save_settings(settings).await.success);

    let text = std::fs::read_to_string(host.store().path()).unwrap();
    assert!(text.contains("\n  \"panelWidth\": 1000"));
}

#[tokio::test]
async fn damaged_file_loads_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{not valid json").unwrap();

    let (_host, mut panel) = connect(&dir);
    panel.initialize().await;
    assert_eq!(panel.app().settings, rpa_config::Settings::default());
}

#[tokio::test]
async fn group_action_is_acknowledged_by_host() {
    let dir = TempDir::new().unwrap();
    let (_host, mut panel) = connect(&dir);
    panel.initialize().await;

    let (prompt, responder) = ModalPrompt::request(ElementKind::InputGroup);
    responder.submit(
        FormData::new()
            .with("groupName", "Login")
            .with("inputCount", "2")
            .with("actionButtonText", "")
            .with("includeActionButton", "true"),
    );
    let gid = panel.add_via_modal(prompt).await.unwrap();

    let result = panel
        .group_action(&gid, &["alice".to_string(), "hunter2".to_string()])
        .await
        .unwrap();
    assert!(result.success);
    let processed = result.processed.unwrap();
    assert_eq!(processed["groupName"], "Login");
    assert_eq!(processed["values"].as_array().unwrap().len(), 2);
    assert_eq!(processed["values"][0]["value"], "alice");
}

#[tokio::test]
async fn panel_contents_are_not_persisted() {
    let dir = TempDir::new().unwrap();
    let (host, mut panel) = connect(&dir);
    panel.initialize().await;
    panel
        .add(ElementKind::Button, &FormData::new().with("buttonName", "Go"))
        .unwrap();

    assert!(!host.store().path().exists());
}
