//! Device discovery for Native Instruments keyboards

use hidapi::HidApi;
use tracing::{debug, info};

use crate::device_registry;
use crate::error::TransportError;
use crate::hid_output::HidLightTransport;
use crate::types::{DiscoveredDevice, TransportDeviceInfo};

/// HID device discovery for light-guide keyboards
pub struct HidDiscovery {
    api: HidApi,
}

impl HidDiscovery {
    /// Initialize hidapi and take a snapshot of connected devices
    pub fn new() -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        Ok(Self { api })
    }

    /// List connected devices from the Native Instruments vendor
    ///
    /// Every interface of a device is reported by hidapi; only the first
    /// interface per product is kept.
    pub fn list_devices(&self) -> Vec<DiscoveredDevice> {
        let mut devices: Vec<DiscoveredDevice> = Vec::new();

        for device_info in self.api.device_list() {
            let vid = device_info.vendor_id();
            let pid = device_info.product_id();

            if vid != device_registry::VENDOR_ID {
                continue;
            }
            if devices.iter().any(|d| d.info.pid == pid) {
                continue;
            }

            let path = device_info.path().to_string_lossy().to_string();
            debug!("Found device: VID={:04X} PID={:04X} path={}", vid, pid, path);

            devices.push(DiscoveredDevice {
                info: TransportDeviceInfo {
                    vid,
                    pid,
                    device_path: path,
                    serial: device_info.serial_number().map(|s| s.to_string()),
                    product_name: device_info.product_string().map(|s| s.to_string()),
                },
            });
        }

        devices
    }

    /// Open the light guide of the keyboard with the given VID/PID
    pub fn open(&self, vid: u16, pid: u16) -> Result<HidLightTransport, TransportError> {
        let device = self.api.open(vid, pid).map_err(|e| match TransportError::from(e) {
            TransportError::HidError(msg) => {
                TransportError::DeviceNotFound(format!("{vid:04X}:{pid:04X} ({msg})"))
            }
            other => other,
        })?;

        let info = TransportDeviceInfo {
            vid,
            pid,
            device_path: String::new(),
            serial: device.get_serial_number_string().ok().flatten(),
            product_name: device.get_product_string().ok().flatten(),
        };
        info!(
            "Opened {} ({:04X}:{:04X})",
            info.product_name.as_deref().unwrap_or("keyboard"),
            vid,
            pid
        );

        Ok(HidLightTransport::new(device, info))
    }
}
