//! MIDI input (the event source) over midir.
//!
//! midir delivers raw messages on its own callback thread. The callback only
//! parses and forwards them over a channel; all processing happens on the
//! consuming thread, which pulls messages through the `Iterator` impl.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use midir::{Ignore, MidiInput, MidiInputConnection};
use tracing::{debug, info};

use crate::error::KontrolError;

/// Client name announced to the MIDI backend
const CLIENT_NAME: &str = "synthesia-kontrol";

/// How often a blocked `next()` re-checks the running flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Incoming MIDI channel message
///
/// Channels are zero-based (0-15), as carried in the status byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Any other complete message (program change, pitch bend, sysex, ...)
    Other,
}

impl MidiMessage {
    /// Parse one raw message. Returns `None` for empty or truncated input.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status < 0x80 {
            // Running status is resolved by the backend; a bare data byte is noise
            return None;
        }
        let channel = status & 0x0F;

        match status & 0xF0 {
            0x80 => {
                let [note, velocity] = data2(data)?;
                Some(Self::NoteOff {
                    channel,
                    note,
                    velocity,
                })
            }
            0x90 => {
                let [note, velocity] = data2(data)?;
                Some(Self::NoteOn {
                    channel,
                    note,
                    velocity,
                })
            }
            0xB0 => {
                let [controller, value] = data2(data)?;
                Some(Self::ControlChange {
                    channel,
                    controller,
                    value,
                })
            }
            _ => Some(Self::Other),
        }
    }
}

fn data2(data: &[u8]) -> Option<[u8; 2]> {
    match data {
        [a, b, ..] => Some([a & 0x7F, b & 0x7F]),
        _ => None,
    }
}

/// Names of all MIDI input ports, in backend order
pub fn list_ports() -> Result<Vec<String>, KontrolError> {
    let midi_in = MidiInput::new(CLIENT_NAME)
        .map_err(|e| KontrolError::SourceUnavailable(format!("MIDI backend: {e}")))?;

    Ok(midi_in
        .ports()
        .iter()
        .enumerate()
        .map(|(i, port)| {
            midi_in
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown port {i}"))
        })
        .collect())
}

/// A connected MIDI input port, consumed as a blocking iterator
pub struct MidiInputSource {
    port_name: String,
    rx: Receiver<MidiMessage>,
    running: Arc<AtomicBool>,
    // Dropping the connection closes the port
    _connection: MidiInputConnection<()>,
}

impl MidiInputSource {
    /// Connect to the first input port whose name contains `pattern`
    /// (case-insensitive).
    ///
    /// `running` is polled while waiting for messages; clearing it ends the
    /// iteration.
    pub fn connect(pattern: &str, running: Arc<AtomicBool>) -> Result<Self, KontrolError> {
        let mut midi_in = MidiInput::new(CLIENT_NAME)
            .map_err(|e| KontrolError::SourceUnavailable(format!("MIDI backend: {e}")))?;
        midi_in.ignore(Ignore::All);

        let ports = midi_in.ports();
        let mut found = Vec::with_capacity(ports.len());
        let mut selected = None;
        let needle = pattern.to_lowercase();

        for (i, port) in ports.iter().enumerate() {
            let name = midi_in
                .port_name(port)
                .unwrap_or_else(|_| format!("Unknown port {i}"));
            info!("Found MIDI port {}", name);
            if selected.is_none() && name.to_lowercase().contains(&needle) {
                selected = Some((port.clone(), name.clone()));
            }
            found.push(name);
        }

        let (port, port_name) = selected.ok_or_else(|| {
            KontrolError::SourceUnavailable(format!(
                "no MIDI input port matching '{pattern}' (found: {})",
                if found.is_empty() {
                    "none".to_string()
                } else {
                    found.join(", ")
                }
            ))
        })?;

        let (tx, rx) = unbounded();
        let connection = midi_in
            .connect(
                &port,
                "light-guide-in",
                move |_stamp, bytes, _| {
                    if let Some(msg) = MidiMessage::parse(bytes) {
                        // Receiver gone means the session is over
                        let _ = tx.send(msg);
                    }
                },
                (),
            )
            .map_err(|e| KontrolError::SourceUnavailable(format!("{port_name}: {e}")))?;

        info!("Listening to MIDI port {}", port_name);

        Ok(Self {
            port_name,
            rx,
            running,
            _connection: connection,
        })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl Iterator for MidiInputSource {
    type Item = MidiMessage;

    fn next(&mut self) -> Option<MidiMessage> {
        loop {
            if !self.running.load(Ordering::SeqCst) {
                debug!("MIDI input stopped");
                return None;
            }
            match self.rx.recv_timeout(POLL_INTERVAL) {
                Ok(msg) => return Some(msg),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    info!("MIDI port {} closed", self.port_name);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_messages() {
        assert_eq!(
            MidiMessage::parse(&[0x91, 48, 100]),
            Some(MidiMessage::NoteOn {
                channel: 1,
                note: 48,
                velocity: 100
            })
        );
        assert_eq!(
            MidiMessage::parse(&[0x86, 60, 0]),
            Some(MidiMessage::NoteOff {
                channel: 6,
                note: 60,
                velocity: 0
            })
        );
    }

    #[test]
    fn test_parse_control_change() {
        assert_eq!(
            MidiMessage::parse(&[0xB0, 16, 5]),
            Some(MidiMessage::ControlChange {
                channel: 0,
                controller: 16,
                value: 5
            })
        );
    }

    #[test]
    fn test_parse_other_and_invalid() {
        assert_eq!(MidiMessage::parse(&[0xC3, 7]), Some(MidiMessage::Other));
        assert_eq!(MidiMessage::parse(&[0xE0, 0, 64]), Some(MidiMessage::Other));
        assert_eq!(MidiMessage::parse(&[]), None);
        assert_eq!(MidiMessage::parse(&[0x90, 48]), None);
        assert_eq!(MidiMessage::parse(&[0x30, 48, 1]), None);
    }

    #[test]
    fn test_data_bytes_are_masked() {
        assert_eq!(
            MidiMessage::parse(&[0xB0, 0x90, 0x85]),
            Some(MidiMessage::ControlChange {
                channel: 0,
                controller: 16,
                value: 5
            })
        );
    }
}
