//! Command handlers for the CLI application.
//!
//! - `run`: the light-guide session (default command)
//! - `sweep`: device test pattern
//! - `utility`: listings (ports, devices, profiles)

pub mod run;
pub mod sweep;
pub mod utility;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use kontrol_transport::{BoxedSink, DeviceSink, HidDiscovery, MonitorSink};
use synthesia_kontrol::config::prompt_profile;
use synthesia_kontrol::{HardwareProfile, KontrolError, ProfileRegistry};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Settings merged from the config file and the command line
pub struct SessionOptions {
    pub registry: ProfileRegistry,
    pub keyboard: Option<String>,
    pub midi_port: String,
    pub monitor: bool,
}

impl SessionOptions {
    /// Resolve the keyboard to drive, asking on the terminal if none was given
    pub fn profile(&self) -> Result<HardwareProfile, KontrolError> {
        match self.keyboard.as_deref() {
            Some(answer) => self
                .registry
                .resolve_selection(answer)
                .cloned()
                .ok_or_else(|| KontrolError::UnknownProfile(answer.to_string())),
            None => prompt_profile(&self.registry, io::stdin().lock(), io::stdout()),
        }
    }
}

/// Open the keyboard's light guide, wrapped with report logging if requested
pub fn open_sink(profile: &HardwareProfile, monitor: bool) -> Result<BoxedSink, KontrolError> {
    info!("Connecting to {}", profile.display_name());
    let (vid, pid) = profile.device_address();
    let device = HidDiscovery::new()?.open(vid, pid)?;
    if let Some(info) = device.device_info() {
        info!(
            "Light guide ready: {} (serial {})",
            info.product_name.as_deref().unwrap_or(profile.display_name()),
            info.serial.as_deref().unwrap_or("unknown")
        );
    }

    if monitor {
        Ok(Arc::new(MonitorSink::wrap(device)))
    } else {
        Ok(Arc::new(device))
    }
}

/// Setup Ctrl+C handler and return the running flag
pub fn setup_interrupt_handler() -> Arc<AtomicBool> {
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .ok();

    running
}
