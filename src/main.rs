//! keyfob-lights main entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  UdpSource         HardwareAdapter   LogEventSink            │
//! │  (DatagramSource)  (OutputPort)      (EventSink)             │
//! │  DecoderProcess (rtl_433 child)                              │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  payload::extract · resolver::ButtonMap · OutputState  │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

mod cli;

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Context, Result};
use log::{error, info, warn};

use keyfob_lights::adapters::decoder::DecoderProcess;
use keyfob_lights::adapters::hardware::HardwareAdapter;
use keyfob_lights::adapters::log_sink::LogEventSink;
use keyfob_lights::adapters::udp::UdpSource;
use keyfob_lights::app::service::AppService;
use keyfob_lights::config::SystemConfig;
use keyfob_lights::resolver::ButtonMap;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Logging + arguments ────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::parse_args()?;

    info!("keyfob-lights v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (file, then CLI overrides) ──────────────────
    // Fail fast on ambiguous button codes before touching hardware.
    let (config, button_map) = load_config(&args).context("invalid configuration")?;
    info!(
        "Buttons {:?} -> GPIO {:?}",
        button_map.codes(),
        config.gpio.output_pins
    );

    // ── 3. Socket + signal handler ────────────────────────────
    let mut source = UdpSource::bind(config.network.socket_addr())
        .with_context(|| format!("binding udp://{}", config.network.socket_addr()))?;

    // Installed before any pin is exported so a signal always reaches
    // the teardown below.
    let shutdown = source.shutdown_handle();
    {
        let handle = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Received shutdown signal");
            if let Err(e) = handle.trigger() {
                error!("Could not wake event loop: {}", e);
            }
        })
        .context("installing signal handler")?;
    }

    // ── 4. Outputs + decoder ──────────────────────────────────
    let mut hw = HardwareAdapter::acquire(&config.gpio).context("acquiring output pins")?;

    // Spawned after the bind so no early datagram is lost.
    let mut decoder = if config.decoder.enabled {
        let child = DecoderProcess::spawn(&config.decoder, source.local_addr())
            .with_context(|| format!("launching decoder `{}`", config.decoder.program))?;
        Some(child)
    } else {
        info!("Decoder launch disabled; waiting for external sender");
        None
    };

    // ── 5. Event loop ─────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut app = AppService::new(button_map);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering event loop.");
    let result = app.run(&mut source, &mut hw, &mut sink, shutdown.flag());

    // ── 6. Teardown ───────────────────────────────────────────
    if let Some(child) = decoder.as_mut() {
        if let Ok(Some(status)) = child.try_wait() {
            warn!("Decoder (pid {}) had exited early ({})", child.id(), status);
        }
    }
    drop(decoder);
    drop(hw);

    result.context("event loop stopped")?;
    info!("Shutdown complete");
    Ok(())
}

/// Load the config file (if any), apply CLI overrides, and validate the
/// button mapping.
fn load_config(args: &cli::AppArgs) -> keyfob_lights::error::Result<(SystemConfig, ButtonMap)> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Using config: {}", path.display());
            SystemConfig::load(path)?
        }
        None => SystemConfig::default(),
    };
    args.apply(&mut config);
    let button_map = config.button_map()?;
    Ok((config, button_map))
}
