//! The light-guide session: MIDI in, key lights out.

use synthesia_kontrol::midi::MidiInputSource;
use synthesia_kontrol::{filter_events, Translator};
use tracing::{info, warn};

use super::{open_sink, setup_interrupt_handler, CommandResult, SessionOptions};

/// Run until the MIDI port closes, Ctrl+C, or the keyboard fails
pub fn run(options: &SessionOptions) -> CommandResult {
    let profile = options.profile()?;
    let sink = open_sink(&profile, options.monitor)?;

    let mut translator = Translator::new(profile, sink);
    translator.initialize()?;

    let running = setup_interrupt_handler();
    info!("Opening MIDI input matching '{}'", options.midi_port);
    let source = MidiInputSource::connect(&options.midi_port, running)?;

    println!(
        "Listening on {} (Ctrl+C to stop)...",
        source.port_name()
    );
    let result = translator.run(filter_events(source));

    if let Err(e) = translator.reset() {
        warn!("Could not switch the lights off: {}", e);
    }

    let handled = result?;
    info!(
        "Session ended: {} events, {} frames sent",
        handled,
        translator.frames_sent()
    );
    Ok(())
}
