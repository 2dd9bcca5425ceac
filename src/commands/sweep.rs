//! Test pattern: fill the keyboard with each of the four hand colors.

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use synthesia_kontrol::color::ColorRole;
use synthesia_kontrol::Translator;

use super::{open_sink, setup_interrupt_handler, CommandResult, SessionOptions};

pub fn sweep(options: &SessionOptions, delay_ms: u64) -> CommandResult {
    let profile = options.profile()?;
    let sink = open_sink(&profile, options.monitor)?;
    let key_count = profile.key_count();

    let mut translator = Translator::new(profile, sink);
    translator.initialize()?;

    let delay = Duration::from_millis(delay_ms);
    let running = setup_interrupt_handler();
    println!(
        "Sweeping {} keys, {} ms per key (Ctrl+C to stop)",
        key_count, delay_ms
    );

    'colors: for role in ColorRole::ALL {
        let color = translator.palette().role(role);
        println!("  {:?}", role);
        for key in 0..key_count {
            if !running.load(Ordering::SeqCst) {
                break 'colors;
            }
            translator.light_key(key, color)?;
            thread::sleep(delay);
        }
        translator.reset()?;
    }

    translator.reset()?;
    println!("Done.");
    Ok(())
}
