//! MIDI note → light-guide key index.
//!
//! Key 0 is the leftmost key of the keyboard; the profile's note offset
//! shifts MIDI note numbers onto that range. Notes that land outside the
//! keyboard are dropped, which is routine for a 61-key model fed a piece
//! written for 88 keys.

use crate::profile::HardwareProfile;

/// Key mapper fixed to one keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMapper {
    note_offset: i32,
    key_count: usize,
}

impl KeyMapper {
    pub fn new(note_offset: i32, key_count: usize) -> Self {
        Self {
            note_offset,
            key_count,
        }
    }

    pub fn for_profile(profile: &HardwareProfile) -> Self {
        Self::new(profile.note_offset(), profile.key_count())
    }

    /// Key index for a note, or `None` if the note is not on this keyboard
    pub fn map(&self, note: i32) -> Option<usize> {
        let key = note.checked_add(self.note_offset)?;
        let key = usize::try_from(key).ok()?;
        (key < self.key_count).then_some(key)
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }
}

/// Map a note against a profile (see [`KeyMapper::map`])
pub fn map_note(note: i32, profile: &HardwareProfile) -> Option<usize> {
    KeyMapper::for_profile(profile).map(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_matches_definition() {
        for (offset, key_count) in [(-36, 61usize), (-21, 88), (0, 128), (5, 10)] {
            let mapper = KeyMapper::new(offset, key_count);
            for note in -10..140 {
                let k = note + offset;
                let expected = (k >= 0 && (k as usize) < key_count).then(|| k as usize);
                assert_eq!(mapper.map(note), expected, "note={note} offset={offset}");
            }
        }
    }

    #[test]
    fn test_s61_range() {
        let mapper = KeyMapper::new(-36, 61);
        assert_eq!(mapper.map(35), None);
        assert_eq!(mapper.map(36), Some(0));
        assert_eq!(mapper.map(48), Some(12));
        assert_eq!(mapper.map(96), Some(60));
        assert_eq!(mapper.map(97), None);
        assert_eq!(mapper.map(0), None);
    }

    #[test]
    fn test_s88_range() {
        let mapper = KeyMapper::new(-21, 88);
        assert_eq!(mapper.map(20), None);
        assert_eq!(mapper.map(21), Some(0));
        assert_eq!(mapper.map(108), Some(87));
        assert_eq!(mapper.map(109), None);
    }

    #[test]
    fn test_extreme_notes_do_not_overflow() {
        let mapper = KeyMapper::new(-36, 61);
        assert_eq!(mapper.map(i32::MIN), None);
        assert_eq!(KeyMapper::new(10, 61).map(i32::MAX), None);
    }
}
