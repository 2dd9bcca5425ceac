// Builtin hardware profiles
// Hardcoded profiles for the known light-guide keyboards, in menu order

use kontrol_transport::device_registry::{
    PID_S61_MK1, PID_S61_MK2, PID_S88_MK1, PID_S88_MK2, VENDOR_ID,
};

use super::types::{Generation, HardwareProfile};
use crate::error::KontrolError;

/// Static description of a builtin keyboard
pub struct BuiltinProfile {
    pub name: &'static str,
    pub display_name: &'static str,
    pub generation: Generation,
    pub product_id: u16,
    pub key_count: usize,
    pub note_offset: i32,
}

impl BuiltinProfile {
    /// Materialize into a session profile
    pub fn to_profile(&self) -> Result<HardwareProfile, KontrolError> {
        HardwareProfile::new(
            self.name,
            self.display_name,
            self.generation,
            (VENDOR_ID, self.product_id),
            self.key_count,
            self.note_offset,
        )
    }
}

/// 61-key models start at C2 (MIDI 36), 88-key models at A0 (MIDI 21).
pub const BUILTIN_PROFILES: [BuiltinProfile; 4] = [
    BuiltinProfile {
        name: "s61-mk2",
        display_name: "Komplete Kontrol S61 MK2",
        generation: Generation::Mk2,
        product_id: PID_S61_MK2,
        key_count: 61,
        note_offset: -36,
    },
    BuiltinProfile {
        name: "s88-mk2",
        display_name: "Komplete Kontrol S88 MK2",
        generation: Generation::Mk2,
        product_id: PID_S88_MK2,
        key_count: 88,
        note_offset: -21,
    },
    BuiltinProfile {
        name: "s61-mk1",
        display_name: "Komplete Kontrol S61 MK1",
        generation: Generation::Mk1,
        product_id: PID_S61_MK1,
        key_count: 61,
        note_offset: -36,
    },
    BuiltinProfile {
        name: "s88-mk1",
        display_name: "Komplete Kontrol S88 MK1",
        generation: Generation::Mk1,
        product_id: PID_S88_MK1,
        key_count: 88,
        note_offset: -21,
    },
];
