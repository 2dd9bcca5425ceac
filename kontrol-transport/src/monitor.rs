//! Monitoring middleware for light-guide reports
//!
//! Wraps any `DeviceSink` and logs every report passing through it, so the
//! frames sent to the keyboard can be inspected without a USB sniffer.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::{DeviceSink, TransportDeviceInfo, TransportError};

/// Format bytes as a space-separated hex dump
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sink middleware that logs every report before forwarding it
pub struct MonitorSink<S> {
    inner: S,
    sent: AtomicU64,
}

impl<S: DeviceSink> MonitorSink<S> {
    /// Wrap a sink with the logging middleware
    pub fn wrap(inner: S) -> Self {
        Self {
            inner,
            sent: AtomicU64::new(0),
        }
    }

    /// Number of reports forwarded so far
    pub fn reports_sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Get the wrapped sink
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: DeviceSink> DeviceSink for MonitorSink<S> {
    fn write_report(&self, report: &[u8]) -> Result<(), TransportError> {
        let seq = self.sent.fetch_add(1, Ordering::Relaxed);
        // Trailing zero padding is noise in the log.
        let used = report
            .iter()
            .rposition(|&b| b != 0)
            .map(|i| i + 1)
            .unwrap_or(1);
        info!(
            "[#{seq}] report 0x{:02X} len={} : {}",
            report.first().copied().unwrap_or(0),
            report.len(),
            hex_dump(&report[..used.min(report.len())])
        );
        self.inner.write_report(report)
    }

    fn device_info(&self) -> Option<&TransportDeviceInfo> {
        self.inner.device_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<Vec<u8>>>);

    impl DeviceSink for Collect {
        fn write_report(&self, report: &[u8]) -> Result<(), TransportError> {
            self.0.lock().push(report.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_hex_dump() {
        assert_eq!(hex_dump(&[0x81, 0x00, 0x2F]), "81 00 2F");
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn test_forwards_reports_unchanged() {
        let sink = MonitorSink::wrap(Collect::default());
        sink.write_report(&[0xA0]).unwrap();
        sink.write_report(&[0x81, 0x00, 0x2D, 0x00]).unwrap();

        assert_eq!(sink.reports_sent(), 2);
        let seen = sink.inner().0.lock();
        assert_eq!(seen[0], vec![0xA0]);
        assert_eq!(seen[1], vec![0x81, 0x00, 0x2D, 0x00]);
    }

    struct Opened(TransportDeviceInfo);

    impl DeviceSink for Opened {
        fn write_report(&self, _report: &[u8]) -> Result<(), TransportError> {
            Ok(())
        }

        fn device_info(&self) -> Option<&TransportDeviceInfo> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_device_info_passes_through() {
        let opened = Opened(TransportDeviceInfo {
            vid: 0x17CC,
            pid: 0x1620,
            device_path: "/dev/hidraw3".into(),
            serial: Some("ABC123".into()),
            product_name: Some("Komplete Kontrol S61 MK2".into()),
        });
        let sink = MonitorSink::wrap(std::sync::Arc::new(opened));

        let info = sink.device_info().unwrap();
        assert_eq!((info.vid, info.pid), (0x17CC, 0x1620));
        assert_eq!(info.serial.as_deref(), Some("ABC123"));
        assert!(MonitorSink::wrap(Collect::default()).device_info().is_none());
    }
}
