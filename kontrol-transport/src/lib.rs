//! Transport layer for Komplete Kontrol light-guide communication
//!
//! The keyboard's light guide is write-only from our side: the host sends a
//! one-byte handshake to switch it into lighting-control mode, then a full
//! frame per update. This crate provides:
//!
//! - the `DeviceSink` trait every backend implements
//! - `HidLightTransport` over hidapi (direct USB connection)
//! - `HidDiscovery` for finding Native Instruments keyboards
//! - `MonitorSink`, a middleware that logs every report passing through

pub mod device_registry;
pub mod error;
pub mod monitor;
pub mod types;

mod discovery;
mod hid_output;

pub use device_registry::{is_light_guide_pid, VENDOR_ID};
pub use discovery::HidDiscovery;
pub use error::TransportError;
pub use hid_output::HidLightTransport;
pub use monitor::MonitorSink;
pub use types::{DiscoveredDevice, TransportDeviceInfo};

use std::sync::Arc;

/// Write-only sink for light-guide reports
///
/// A report is always written as one unit; implementations must not split
/// it across several transfers.
pub trait DeviceSink: Send + Sync {
    /// Write one complete report (first byte is the report/command byte)
    fn write_report(&self, report: &[u8]) -> Result<(), TransportError>;

    /// Get device information, if the sink is backed by a real device
    fn device_info(&self) -> Option<&TransportDeviceInfo> {
        None
    }
}

/// Type alias for a shared sink
pub type BoxedSink = Arc<dyn DeviceSink>;

impl<S: DeviceSink + ?Sized> DeviceSink for Arc<S> {
    fn write_report(&self, report: &[u8]) -> Result<(), TransportError> {
        (**self).write_report(report)
    }

    fn device_info(&self) -> Option<&TransportDeviceInfo> {
        (**self).device_info()
    }
}
