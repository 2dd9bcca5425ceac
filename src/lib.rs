//! Synthesia Kontrol
//!
//! Lights the keys of a Native Instruments Komplete Kontrol keyboard while
//! Synthesia plays, using Synthesia's finger-per-channel MIDI output:
//!
//! MIDI source → [`filter`] → [`translator`] → {[`keymap`], [`color`]}
//! → [`lighting`] → [`report`] → HID sink (`kontrol_transport`)

pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod keymap;
pub mod lighting;
pub mod midi;
pub mod profile;
pub mod report;
pub mod translator;

pub use color::{FingerClass, LedColor, Palette, RgbColor};
pub use error::KontrolError;
pub use filter::{filter_events, EventFilter, FilteredEvent, HandStatus, NoteEvent};
pub use keymap::{map_note, KeyMapper};
pub use lighting::LightingState;
pub use midi::{MidiInputSource, MidiMessage};
pub use profile::{Generation, HardwareProfile, ProfileRegistry};
pub use translator::Translator;
