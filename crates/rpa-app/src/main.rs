mod app_state;
mod cli;

use rpa_bridge::BridgeHost;
use rpa_config::SettingsStore;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("rpa=info");
    let directive: Directive = log_directive.parse().unwrap_or_else(|_| {
        eprintln!("invalid --log-level {log_directive:?}, using rpa=info");
        "rpa=info".parse().expect("static directive parses")
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("RPA Testing Panel v{} starting...", env!("CARGO_PKG_VERSION"));

    let store = match args.settings {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using settings override");
            SettingsStore::new(path)
        }
        None => SettingsStore::at_default_location().unwrap_or_else(|e| {
            tracing::warn!("No config directory ({e}), keeping settings in the working directory");
            SettingsStore::new(rpa_config::paths::SETTINGS_FILE_NAME)
        }),
    };
    tracing::info!(path = %store.path().display(), "Settings store ready");

    let assets_dir = app_state::resolve_assets_dir(args.assets);

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::RpaApp::new(BridgeHost::new(store), assets_dir, args.devtools);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
