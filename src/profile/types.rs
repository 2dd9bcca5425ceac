// Hardware profile types
// Device generation and the immutable per-session keyboard description

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KontrolError;

/// Fixed light-guide payload length of MK2 frames, independent of key count.
pub const MK2_PAYLOAD_LEN: usize = 249;

/// Smallest MK1 payload; 88-key RGB layouts grow past it.
pub const MK1_MIN_PAYLOAD_LEN: usize = 249;

/// Light-guide protocol generation
///
/// The two generations are not compatible: MK2 addresses a fixed indexed
/// palette with one byte per key, MK1 takes a raw RGB triplet per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Komplete Kontrol MK2: one palette index per key, report 0x81
    Mk2,
    /// Komplete Kontrol MK1: RGB triplet per key, report 0x82
    Mk1,
}

impl Generation {
    /// Report ID that starts every lighting frame
    pub const fn header(self) -> u8 {
        match self {
            Self::Mk2 => 0x81,
            Self::Mk1 => 0x82,
        }
    }

    /// Bytes occupied by one key in the light buffer
    pub const fn bytes_per_key(self) -> usize {
        match self {
            Self::Mk2 => 1,
            Self::Mk1 => 3,
        }
    }

    /// Payload length (without header) the firmware expects for `key_count` keys
    pub fn payload_len(self, key_count: usize) -> usize {
        match self {
            Self::Mk2 => MK2_PAYLOAD_LEN,
            Self::Mk1 => (key_count * 3).max(MK1_MIN_PAYLOAD_LEN),
        }
    }

    /// Total frame length including the header byte
    pub fn frame_len(self, key_count: usize) -> usize {
        1 + self.payload_len(key_count)
    }

    /// Check that `key_count` keys fit in this generation's payload
    pub fn fits(self, key_count: usize) -> bool {
        key_count
            .checked_mul(self.bytes_per_key())
            .is_some_and(|len| len <= self.payload_len(key_count))
    }

    /// Lowercase name as used in configuration files
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mk2 => "mk2",
            Self::Mk1 => "mk1",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generation {
    type Err = KontrolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mk2" => Ok(Self::Mk2),
            "mk1" => Ok(Self::Mk1),
            other => Err(KontrolError::UnsupportedGeneration(other.to_string())),
        }
    }
}

/// Immutable description of the keyboard driven in this session
///
/// Only [`HardwareProfile::new`] builds one, so every profile has a layout
/// its generation can encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareProfile {
    /// Internal name (e.g., "s61-mk2")
    name: String,
    /// User-facing name (e.g., "Komplete Kontrol S61 MK2")
    display_name: String,
    generation: Generation,
    vendor_id: u16,
    product_id: u16,
    /// Number of physical keys with a light
    key_count: usize,
    /// Added to a MIDI note number to get the zero-based key index
    note_offset: i32,
}

impl HardwareProfile {
    /// Build a profile, rejecting layouts the generation cannot encode
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        generation: Generation,
        device_address: (u16, u16),
        key_count: usize,
        note_offset: i32,
    ) -> Result<Self, KontrolError> {
        let name = name.into();
        if key_count == 0 {
            return Err(KontrolError::Config(format!(
                "profile '{name}': key_count must be positive"
            )));
        }
        if !generation.fits(key_count) {
            return Err(KontrolError::Config(format!(
                "profile '{name}': {key_count} keys do not fit a {generation} frame"
            )));
        }

        Ok(Self {
            name,
            display_name: display_name.into(),
            generation,
            vendor_id: device_address.0,
            product_id: device_address.1,
            key_count,
            note_offset,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// USB Vendor ID
    pub fn vendor_id(&self) -> u16 {
        self.vendor_id
    }

    /// USB Product ID
    pub fn product_id(&self) -> u16 {
        self.product_id
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }

    pub fn note_offset(&self) -> i32 {
        self.note_offset
    }

    /// Transport address of the keyboard: (VID, PID)
    pub fn device_address(&self) -> (u16, u16) {
        (self.vendor_id, self.product_id)
    }

    /// Frame length sent to this keyboard, header included
    pub fn frame_len(&self) -> usize {
        self.generation.frame_len(self.key_count)
    }
}
