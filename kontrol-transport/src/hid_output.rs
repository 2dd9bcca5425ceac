//! HID transport for the keyboard's light guide (USB output reports)

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::DeviceSink;

/// HID transport for a wired Komplete Kontrol keyboard
///
/// Reports are sent as HID output reports; the first byte of every report
/// doubles as the report ID, which is how the light-guide firmware tells a
/// handshake (`0xA0`) from a lighting frame (`0x81`/`0x82`).
pub struct HidLightTransport {
    device: Mutex<HidDevice>,
    info: TransportDeviceInfo,
}

impl HidLightTransport {
    /// Wrap an already opened HID device
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(device),
            info,
        }
    }
}

impl DeviceSink for HidLightTransport {
    fn write_report(&self, report: &[u8]) -> Result<(), TransportError> {
        if report.is_empty() {
            return Err(TransportError::Internal("refusing to write empty report".into()));
        }

        let device = self.device.lock();
        let written = device.write(report)?;
        debug!(
            "Wrote report 0x{:02X} ({} of {} bytes)",
            report[0],
            written,
            report.len()
        );

        if written < report.len() {
            return Err(TransportError::ShortWrite {
                expected: report.len(),
                written,
            });
        }
        Ok(())
    }

    fn device_info(&self) -> Option<&TransportDeviceInfo> {
        Some(&self.info)
    }
}

impl Drop for HidLightTransport {
    fn drop(&mut self) {
        debug!(
            "HidLightTransport dropped ({:04X}:{:04X})",
            self.info.vid, self.info.pid
        );
    }
}
