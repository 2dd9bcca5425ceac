//! Per-key light buffer of the session.
//!
//! The buffer is laid out exactly as the light guide reads it: one palette
//! byte per key on MK2, an RGB triplet per key on MK1. A key is either all
//! zero (off) or holds one of the palette colors of the active generation.

use tracing::warn;

use crate::color::LedColor;
use crate::error::KontrolError;
use crate::profile::{Generation, HardwareProfile};

/// Light state of every key, owned by the translator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingState {
    generation: Generation,
    key_count: usize,
    entries: Vec<u8>,
}

impl LightingState {
    /// Create an all-off buffer sized for `key_count` keys, rejecting
    /// layouts that do not fit the generation's frame
    pub fn new(generation: Generation, key_count: usize) -> Result<Self, KontrolError> {
        if !generation.fits(key_count) {
            return Err(KontrolError::Config(format!(
                "{key_count} keys do not fit a {generation} frame"
            )));
        }
        Ok(Self::blank(generation, key_count))
    }

    /// All-off buffer for a profile; profiles are validated on construction
    pub fn for_profile(profile: &HardwareProfile) -> Self {
        Self::blank(profile.generation(), profile.key_count())
    }

    fn blank(generation: Generation, key_count: usize) -> Self {
        Self {
            generation,
            key_count,
            entries: vec![0; key_count * generation.bytes_per_key()],
        }
    }

    /// Light one key. Returns false (and leaves the buffer untouched) if the
    /// key does not exist or the color belongs to the other generation.
    pub fn set(&mut self, key: usize, color: LedColor) -> bool {
        if color.generation() != self.generation {
            warn!(
                "Ignoring {:?}: buffer encodes {} colors",
                color, self.generation
            );
            return false;
        }
        match self.slot_mut(key) {
            Some(slot) => {
                color.write_into(slot);
                true
            }
            None => false,
        }
    }

    /// Switch one key off. Returns false if the key does not exist.
    pub fn clear(&mut self, key: usize) -> bool {
        match self.slot_mut(key) {
            Some(slot) => {
                slot.fill(0);
                true
            }
            None => false,
        }
    }

    /// Switch every key off
    pub fn clear_all(&mut self) {
        self.entries.fill(0);
    }

    /// Encoded value of one key (1 or 3 bytes)
    pub fn key(&self, key: usize) -> Option<&[u8]> {
        let width = self.generation.bytes_per_key();
        let start = key.checked_mul(width)?;
        self.entries.get(start..start.checked_add(width)?)
    }

    pub fn is_lit(&self, key: usize) -> bool {
        self.key(key)
            .map(|slot| slot.iter().any(|&b| b != 0))
            .unwrap_or(false)
    }

    /// Number of keys currently lit
    pub fn lit_count(&self) -> usize {
        (0..self.key_count).filter(|&k| self.is_lit(k)).count()
    }

    /// Raw buffer bytes, `key_count * bytes_per_key` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.entries
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }

    fn slot_mut(&mut self, key: usize) -> Option<&mut [u8]> {
        if key >= self.key_count {
            return None;
        }
        let width = self.generation.bytes_per_key();
        let start = key * width;
        self.entries.get_mut(start..start + width)
    }
}
