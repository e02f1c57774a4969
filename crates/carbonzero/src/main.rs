mod app;

use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use carbonzero_config::{Config, ProjectPaths, WaitlistMode};
use carbonzero_core::Size;
use carbonzero_scene::SceneSettings;
use carbonzero_waitlist::{LocalStore, RemoteCollector, WaitlistForm};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CARBONZERO_LOG";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let paths = ProjectPaths::discover()?;
    init_tracing(&paths.log_file())?;
    info!("carbonzero v{} starting", env!("CARGO_PKG_VERSION"));

    let config = carbonzero_config::load_default(&paths).unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        Config::default()
    });

    let now = Instant::now();
    let app = App::new(
        &scene_settings(&config),
        build_form(&config, &paths),
        config.animation.fps,
        now,
    );

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();

    info!("carbonzero exiting");
    result
}

/// Send logs to `log_file`; the terminal belongs to the UI.
fn init_tracing(log_file: &Path) -> color_eyre::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn scene_settings(config: &Config) -> SceneSettings {
    SceneSettings {
        sphere_enabled: config.sphere.enabled,
        sphere_size: Size::new(config.sphere.width, config.sphere.height),
        pixel_ratio: config.sphere.pixel_ratio,
        particles_enabled: config.particles.enabled,
        particle_count: config.particles.count,
        cell_px: (config.particles.cell_width_px, config.particles.cell_height_px),
        counter_start: config.counter.start,
        counter_max_step: config.counter.max_step,
        counter_interval: Duration::from_millis(config.counter.interval_ms),
        seed: config.particles.seed,
    }
}

fn build_form(config: &Config, paths: &ProjectPaths) -> WaitlistForm {
    let waitlist = &config.waitlist;
    let reset_delay = Duration::from_millis(waitlist.reset_ms);

    match (waitlist.mode, waitlist.endpoint.as_deref()) {
        (WaitlistMode::Remote, Some(endpoint)) => {
            info!(endpoint, "waitlist signups go to remote endpoint");
            let timeout = Duration::from_secs(waitlist.timeout_secs);
            WaitlistForm::remote(RemoteCollector::over_http(endpoint, timeout), reset_delay)
        }
        _ => {
            let store = LocalStore::new(paths.waitlist_store());
            info!("waitlist signups kept in {}", store.path().display());
            WaitlistForm::local(store, reset_delay)
        }
    }
}
