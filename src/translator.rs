//! Translator: filtered events in, light-guide frames out.
//!
//! The translator is the single owner of the light buffer and the only
//! writer to the device sink. Events are handled strictly one at a time;
//! each accepted event runs mutate, encode and write to completion before
//! the next is looked at, so the sink never sees a half-updated buffer.

use kontrol_transport::DeviceSink;
use tracing::{debug, info};

use crate::color::{LedColor, Palette};
use crate::error::KontrolError;
use crate::filter::{FilteredEvent, HandStatus, NoteEvent};
use crate::keymap::KeyMapper;
use crate::lighting::LightingState;
use crate::profile::HardwareProfile;
use crate::report::{self, HANDSHAKE};

/// Session orchestrator for one keyboard
pub struct Translator<S: DeviceSink> {
    profile: HardwareProfile,
    mapper: KeyMapper,
    palette: Palette,
    state: LightingState,
    sink: S,
    frames_sent: u64,
}

impl<S: DeviceSink> Translator<S> {
    /// Create a translator with an all-off buffer. Nothing is written yet.
    pub fn new(profile: HardwareProfile, sink: S) -> Self {
        Self {
            mapper: KeyMapper::for_profile(&profile),
            palette: Palette::for_generation(profile.generation()),
            state: LightingState::for_profile(&profile),
            profile,
            sink,
            frames_sent: 0,
        }
    }

    /// Put the keyboard into lighting mode and switch every light off
    pub fn initialize(&mut self) -> Result<(), KontrolError> {
        info!(
            "Initializing light guide of {} ({})",
            self.profile.display_name(),
            self.profile.generation()
        );
        self.sink.write_report(&HANDSHAKE)?;
        self.reset()
    }

    /// Apply one note event.
    ///
    /// Returns `Ok(false)` without touching the buffer or the sink if the
    /// note is outside the keyboard.
    pub fn handle_note(&mut self, event: &NoteEvent) -> Result<bool, KontrolError> {
        let Some(key) = self.mapper.map(i32::from(event.note)) else {
            debug!("Note {} is outside the keyboard, ignored", event.note);
            return Ok(false);
        };

        if event.is_on() {
            let color = self.palette.for_channel(event.channel);
            let applied = self.state.set(key, color);
            debug_assert!(applied, "palette does not match the light buffer");
            debug!(
                "Key {} on (note {}, channel {}, velocity {})",
                key, event.note, event.channel, event.velocity
            );
        } else {
            self.state.clear(key);
            debug!("Key {} off (note {}, channel {})", key, event.note, event.channel);
        }

        self.send_frame()?;
        Ok(true)
    }

    /// Apply Synthesia's hand-status signal: log it, then clear every key
    pub fn handle_hand_status(&mut self, status: HandStatus) -> Result<(), KontrolError> {
        if status.playing {
            info!("User is playing");
        }
        if status.right {
            info!("Playing right hand");
        }
        if status.left {
            info!("Playing left hand");
        }
        self.reset()
    }

    pub fn handle(&mut self, event: FilteredEvent) -> Result<(), KontrolError> {
        match event {
            FilteredEvent::Note(note) => self.handle_note(&note).map(|_| ()),
            FilteredEvent::HandStatus(status) => self.handle_hand_status(status),
        }
    }

    /// Consume events until the stream ends. The first failed write ends
    /// the session with that error.
    ///
    /// Returns the number of events handled.
    pub fn run<I>(&mut self, events: I) -> Result<u64, KontrolError>
    where
        I: IntoIterator<Item = FilteredEvent>,
    {
        let mut handled = 0u64;
        for event in events {
            self.handle(event)?;
            handled += 1;
        }
        debug!("Event stream ended after {} events", handled);
        Ok(handled)
    }

    /// Switch every light off and send the blank frame
    pub fn reset(&mut self) -> Result<(), KontrolError> {
        info!("Turning off lights for all notes");
        self.state.clear_all();
        self.send_frame()
    }

    /// Light one key directly, bypassing the MIDI mapping
    pub fn light_key(&mut self, key: usize, color: LedColor) -> Result<bool, KontrolError> {
        if !self.state.set(key, color) {
            return Ok(false);
        }
        self.send_frame()?;
        Ok(true)
    }

    pub fn state(&self) -> &LightingState {
        &self.state
    }

    pub fn profile(&self) -> &HardwareProfile {
        &self.profile
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Frames written since creation (handshake not counted)
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    fn send_frame(&mut self) -> Result<(), KontrolError> {
        let frame = report::encode(&self.state);
        self.sink.write_report(&frame)?;
        self.frames_sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileRegistry;
    use kontrol_transport::TransportError;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Collector {
        reports: Mutex<Vec<Vec<u8>>>,
    }

    impl DeviceSink for Collector {
        fn write_report(&self, report: &[u8]) -> Result<(), TransportError> {
            self.reports.lock().push(report.to_vec());
            Ok(())
        }
    }

    struct Unplugged;

    impl DeviceSink for Unplugged {
        fn write_report(&self, _report: &[u8]) -> Result<(), TransportError> {
            Err(TransportError::Disconnected)
        }
    }

    fn s61_mk2() -> HardwareProfile {
        ProfileRegistry::with_builtins()
            .find_by_name("s61-mk2")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_initialize_sends_handshake_then_blank_frame() {
        let mut t = Translator::new(s61_mk2(), Collector::default());
        t.initialize().unwrap();

        let reports = t.sink().reports.lock();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], vec![0xA0]);
        assert_eq!(reports[1].len(), 250);
        assert_eq!(reports[1][0], 0x81);
        assert!(reports[1][1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_repeated_note_resends_frame() {
        let mut t = Translator::new(s61_mk2(), Collector::default());
        let on = NoteEvent::on(7, 60, 80);
        assert!(t.handle_note(&on).unwrap());
        assert!(t.handle_note(&on).unwrap());

        let reports = t.sink().reports.lock();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], reports[1]);
        assert_eq!(t.frames_sent(), 2);
    }

    #[test]
    fn test_out_of_range_sends_nothing() {
        let mut t = Translator::new(s61_mk2(), Collector::default());
        assert!(!t.handle_note(&NoteEvent::on(1, 97, 100)).unwrap());
        assert!(t.sink().reports.lock().is_empty());
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let mut t = Translator::new(s61_mk2(), Unplugged);
        let events = vec![
            FilteredEvent::Note(NoteEvent::on(1, 48, 100)),
            FilteredEvent::Note(NoteEvent::off(1, 48)),
        ];
        let err = t.run(events).unwrap_err();
        assert!(matches!(
            err,
            KontrolError::DeviceUnavailable(TransportError::Disconnected)
        ));
        assert_eq!(t.frames_sent(), 0);
    }

    #[test]
    fn test_light_key_rejects_missing_key() {
        let mut t = Translator::new(s61_mk2(), Collector::default());
        let color = t.palette().for_channel(1);
        assert!(t.light_key(60, color).unwrap());
        assert!(!t.light_key(61, color).unwrap());
        assert_eq!(t.sink().reports.lock().len(), 1);
    }
}
