mod app_state;
mod cli;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use web4x_config::schema::Web4xConfig;
use web4x_config::toml_loader::default_settings_path;
use web4x_config::{JsonSettingsStore, MemorySettingsStore, SettingsStore};

const DEFAULT_LOG_DIRECTIVE: &str = "web4x=info";

fn init_logging(directive: &str) {
    let directive: Directive = directive.parse().unwrap_or_else(|_| {
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| tracing::Level::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

/// The on-disk store, or an in-memory one for `--no-restore` runs so the
/// saved session survives them.
fn open_settings_store(no_restore: bool) -> Box<dyn SettingsStore> {
    if no_restore {
        tracing::info!("session restore disabled, settings kept in memory");
        return Box::new(MemorySettingsStore::new());
    }
    match default_settings_path() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "settings store");
            Box::new(JsonSettingsStore::open(path))
        }
        Err(e) => {
            tracing::warn!("No settings location, session will not persist: {e}");
            Box::new(MemorySettingsStore::new())
        }
    }
}

fn main() {
    let args = cli::parse();

    // Config first: it carries the default log level.
    let loaded = match &args.config {
        Some(path) => web4x_config::load_config_from(path),
        None => web4x_config::load_config(),
    };
    let (mut config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Web4xConfig::default(), Some(e)),
    };

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&directive);

    tracing::info!("Web4x v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if args.no_restore {
        config.browser.restore_session = false;
    }

    let store = open_settings_store(args.no_restore);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::Web4xApp::new(config, args.urls, store);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_restore_store_starts_empty_and_stays_in_memory() {
        let mut store = open_settings_store(true);
        assert!(store.value("openTabs").is_none());
        store.set_value("openTabs", json!(["https://a.example"])).unwrap();
        assert_eq!(store.value("openTabs"), Some(json!(["https://a.example"])));
        assert!(open_settings_store(true).value("openTabs").is_none());
    }
}
