//! Finger/hand color policy for Synthesia's channel convention.
//!
//! Synthesia encodes who plays a note in the MIDI channel: 1-5 are the left
//! hand thumb through pinky, 6-10 the right hand, 11/12 a left/right note
//! with unknown finger, 0 "unknown". The light guide shows four colors:
//! blue for the left hand, green for the right, a lighter shade for thumbs.

use crate::profile::Generation;

/// Classification of a note's MIDI channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FingerClass {
    /// Channel 0 and anything outside the convention
    Unknown,
    LeftThumb,
    /// Left index through pinky
    LeftOther,
    RightThumb,
    /// Right index through pinky
    RightOther,
    LeftUnknownFinger,
    RightUnknownFinger,
}

impl FingerClass {
    /// Classify a MIDI channel (0-15)
    pub fn classify(channel: u8) -> Self {
        match channel {
            1 => Self::LeftThumb,
            2..=5 => Self::LeftOther,
            6 => Self::RightThumb,
            7..=10 => Self::RightOther,
            11 => Self::LeftUnknownFinger,
            12 => Self::RightUnknownFinger,
            _ => Self::Unknown,
        }
    }

    /// Which of the four light colors this class uses
    pub fn role(self) -> ColorRole {
        match self {
            Self::LeftThumb => ColorRole::LeftThumb,
            Self::LeftOther | Self::LeftUnknownFinger => ColorRole::Left,
            Self::RightThumb => ColorRole::RightThumb,
            // Unknown notes still light up, as a generic right-hand note
            Self::RightOther | Self::RightUnknownFinger | Self::Unknown => ColorRole::Right,
        }
    }
}

/// The four distinct light colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Left,
    LeftThumb,
    Right,
    RightThumb,
}

impl ColorRole {
    pub const ALL: [ColorRole; 4] = [
        ColorRole::Left,
        ColorRole::LeftThumb,
        ColorRole::Right,
        ColorRole::RightThumb,
    ];
}

/// RGB triplet as sent to MK1 keyboards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One key's light value in the encoding of a generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedColor {
    /// MK2 palette index
    Indexed(u8),
    /// MK1 raw color
    Rgb(RgbColor),
}

impl LedColor {
    /// Generation whose buffer layout this value belongs to
    pub fn generation(&self) -> Generation {
        match self {
            Self::Indexed(_) => Generation::Mk2,
            Self::Rgb(_) => Generation::Mk1,
        }
    }

    /// Write the encoded value into a key slot (1 or 3 bytes)
    pub fn write_into(&self, slot: &mut [u8]) {
        match *self {
            Self::Indexed(index) => slot[0] = index,
            Self::Rgb(RgbColor { r, g, b }) => slot.copy_from_slice(&[r, g, b]),
        }
    }

    /// Check if this is the all-zero "off" value
    pub fn is_off(&self) -> bool {
        match *self {
            Self::Indexed(index) => index == 0,
            Self::Rgb(rgb) => rgb == RgbColor::default(),
        }
    }
}

/// MK2 palette indices
pub mod mk2 {
    /// Blue
    pub const LEFT: u8 = 0x2D;
    /// Lighter blue
    pub const LEFT_THUMB: u8 = 0x2F;
    /// Green
    pub const RIGHT: u8 = 0x1D;
    /// Lighter green
    pub const RIGHT_THUMB: u8 = 0x1F;
}

/// MK1 RGB values
pub mod mk1 {
    use super::RgbColor;

    /// Blue
    pub const LEFT: RgbColor = RgbColor::new(0x00, 0x00, 0xFF);
    /// Lighter blue
    pub const LEFT_THUMB: RgbColor = RgbColor::new(0x00, 0x00, 0x80);
    /// Green
    pub const RIGHT: RgbColor = RgbColor::new(0x00, 0xFF, 0x00);
    /// Lighter green
    pub const RIGHT_THUMB: RgbColor = RgbColor::new(0x00, 0x80, 0x00);
}

/// Color for a role in a given generation's encoding
pub fn role_color(role: ColorRole, generation: Generation) -> LedColor {
    match generation {
        Generation::Mk2 => LedColor::Indexed(match role {
            ColorRole::Left => mk2::LEFT,
            ColorRole::LeftThumb => mk2::LEFT_THUMB,
            ColorRole::Right => mk2::RIGHT,
            ColorRole::RightThumb => mk2::RIGHT_THUMB,
        }),
        Generation::Mk1 => LedColor::Rgb(match role {
            ColorRole::Left => mk1::LEFT,
            ColorRole::LeftThumb => mk1::LEFT_THUMB,
            ColorRole::Right => mk1::RIGHT,
            ColorRole::RightThumb => mk1::RIGHT_THUMB,
        }),
    }
}

/// Color for a finger class in a given generation's encoding
pub fn color_for(class: FingerClass, generation: Generation) -> LedColor {
    role_color(class.role(), generation)
}

/// Palette resolved once for the session's generation
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    left: LedColor,
    left_thumb: LedColor,
    right: LedColor,
    right_thumb: LedColor,
}

impl Palette {
    pub fn for_generation(generation: Generation) -> Self {
        Self {
            left: role_color(ColorRole::Left, generation),
            left_thumb: role_color(ColorRole::LeftThumb, generation),
            right: role_color(ColorRole::Right, generation),
            right_thumb: role_color(ColorRole::RightThumb, generation),
        }
    }

    pub fn role(&self, role: ColorRole) -> LedColor {
        match role {
            ColorRole::Left => self.left,
            ColorRole::LeftThumb => self.left_thumb,
            ColorRole::Right => self.right,
            ColorRole::RightThumb => self.right_thumb,
        }
    }

    /// Color for a note played on `channel`
    pub fn for_channel(&self, channel: u8) -> LedColor {
        self.role(FingerClass::classify(channel).role())
    }
}
