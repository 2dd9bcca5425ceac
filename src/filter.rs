//! Event filter between the MIDI source and the translator.
//!
//! Only note-on/note-off messages pass through. Synthesia additionally sends
//! a control change on channel 0, controller 16, whose value is a bitmask of
//! which hands are being played; it marks a reset of the light guide and is
//! turned into a [`HandStatus`] event instead of a note.

use tracing::trace;

use crate::midi::MidiMessage;

/// Channel of Synthesia's hand-status control message
pub const HAND_STATUS_CHANNEL: u8 = 0;

/// Controller number of Synthesia's hand-status control message
pub const HAND_STATUS_CONTROLLER: u8 = 16;

const RIGHT_HAND_BIT: u8 = 0x01;
const LEFT_HAND_BIT: u8 = 0x02;
const PLAYING_BIT: u8 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    On,
    Off,
}

/// A note message accepted by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub kind: NoteKind,
    pub channel: u8,
    pub note: u8,
    pub velocity: u8,
}

impl NoteEvent {
    pub fn on(channel: u8, note: u8, velocity: u8) -> Self {
        Self {
            kind: NoteKind::On,
            channel,
            note,
            velocity,
        }
    }

    pub fn off(channel: u8, note: u8) -> Self {
        Self {
            kind: NoteKind::Off,
            channel,
            note,
            velocity: 0,
        }
    }

    /// True if this event lights its key. A note-on with velocity 0 is a
    /// note-off.
    pub fn is_on(&self) -> bool {
        self.kind == NoteKind::On && self.velocity != 0
    }
}

/// Decoded hand-status bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandStatus {
    pub right: bool,
    pub left: bool,
    pub playing: bool,
}

impl HandStatus {
    pub fn from_value(value: u8) -> Self {
        Self {
            right: value & RIGHT_HAND_BIT != 0,
            left: value & LEFT_HAND_BIT != 0,
            playing: value & PLAYING_BIT != 0,
        }
    }
}

/// Output of the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilteredEvent {
    Note(NoteEvent),
    /// Reset signal; clears every key regardless of the bitmask
    HandStatus(HandStatus),
}

/// Classify one message; `None` means it is dropped
pub fn filter_message(msg: &MidiMessage) -> Option<FilteredEvent> {
    match *msg {
        MidiMessage::NoteOn {
            channel,
            note,
            velocity,
        } => Some(FilteredEvent::Note(NoteEvent::on(channel, note, velocity))),
        MidiMessage::NoteOff {
            channel,
            note,
            velocity,
        } => Some(FilteredEvent::Note(NoteEvent {
            kind: NoteKind::Off,
            channel,
            note,
            velocity,
        })),
        MidiMessage::ControlChange {
            channel: HAND_STATUS_CHANNEL,
            controller: HAND_STATUS_CONTROLLER,
            value,
        } => Some(FilteredEvent::HandStatus(HandStatus::from_value(value))),
        other => {
            trace!("Dropping {:?}", other);
            None
        }
    }
}

/// Lazy filter over a message stream, preserving receipt order
pub struct EventFilter<I> {
    inner: I,
}

impl<I> EventFilter<I>
where
    I: Iterator<Item = MidiMessage>,
{
    pub fn new(inner: I) -> Self {
        Self { inner }
    }
}

impl<I> Iterator for EventFilter<I>
where
    I: Iterator<Item = MidiMessage>,
{
    type Item = FilteredEvent;

    fn next(&mut self) -> Option<FilteredEvent> {
        loop {
            let msg = self.inner.next()?;
            if let Some(event) = filter_message(&msg) {
                return Some(event);
            }
        }
    }
}

/// Wrap any message source in an [`EventFilter`]
pub fn filter_events<I>(messages: I) -> EventFilter<I::IntoIter>
where
    I: IntoIterator<Item = MidiMessage>,
{
    EventFilter::new(messages.into_iter())
}
