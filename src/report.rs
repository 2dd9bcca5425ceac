//! Light-guide report framing.
//!
//! Every update is a full frame: the device has no partial-update command.
//! A frame is the generation's header byte followed by the light buffer,
//! zero padded to the fixed payload length the firmware reads.

use crate::lighting::LightingState;
use crate::profile::Generation;

/// Switches the keyboard into host-controlled lighting mode; sent once
/// before the first frame.
pub const INIT_LIGHTS_COMMAND: u8 = 0xA0;

/// Handshake report
pub const HANDSHAKE: [u8; 1] = [INIT_LIGHTS_COMMAND];

/// Total frame length for a layout, header included
pub fn frame_len(generation: Generation, key_count: usize) -> usize {
    generation.frame_len(key_count)
}

/// Serialize the light buffer into one complete frame
pub fn encode(state: &LightingState) -> Vec<u8> {
    let generation = state.generation();
    let mut frame = vec![0u8; frame_len(generation, state.key_count())];
    frame[0] = generation.header();

    // LightingState only exists for layouts that fit the payload
    let bytes = state.as_bytes();
    frame[1..1 + bytes.len()].copy_from_slice(bytes);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{mk1, mk2, LedColor};

    #[test]
    fn test_mk2_frame_layout() {
        let mut state = LightingState::new(Generation::Mk2, 61).unwrap();
        state.set(12, LedColor::Indexed(mk2::LEFT_THUMB));

        let frame = encode(&state);
        assert_eq!(frame.len(), 250);
        assert_eq!(frame[0], 0x81);
        assert_eq!(frame[13], mk2::LEFT_THUMB);
        assert_eq!(frame.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_mk2_frame_length_ignores_key_count() {
        assert_eq!(encode(&LightingState::new(Generation::Mk2, 61).unwrap()).len(), 250);
        assert_eq!(encode(&LightingState::new(Generation::Mk2, 88).unwrap()).len(), 250);
    }

    #[test]
    fn test_mk1_frame_layout() {
        let mut state = LightingState::new(Generation::Mk1, 88).unwrap();
        state.set(87, LedColor::Rgb(mk1::LEFT));

        let frame = encode(&state);
        assert_eq!(frame.len(), 1 + 264);
        assert_eq!(frame[0], 0x82);
        assert_eq!(&frame[1 + 261..], &[0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_mk1_small_keyboard_is_padded() {
        let frame = encode(&LightingState::new(Generation::Mk1, 61).unwrap());
        assert_eq!(frame.len(), 250);
        assert_eq!(frame[0], 0x82);
        assert!(frame[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_largest_mk2_layout_fills_frame() {
        let mut state = LightingState::new(Generation::Mk2, 249).unwrap();
        state.set(248, LedColor::Indexed(mk2::RIGHT));

        let frame = encode(&state);
        assert_eq!(frame.len(), 250);
        assert_eq!(frame[249], mk2::RIGHT);
    }

    #[test]
    fn test_oversized_profile_never_reaches_encoder() {
        let err = crate::profile::HardwareProfile::new(
            "s300",
            "S300",
            Generation::Mk2,
            (0x17CC, 0x1620),
            300,
            -21,
        );
        assert!(err.is_err());
        assert!(LightingState::new(Generation::Mk2, 300).is_err());
    }

    #[test]
    fn test_encode_does_not_modify_state() {
        let mut state = LightingState::new(Generation::Mk2, 61).unwrap();
        state.set(3, LedColor::Indexed(mk2::RIGHT));
        let before = state.clone();
        let _ = encode(&state);
        assert_eq!(state, before);
    }
}
