//! Listing commands

use kontrol_transport::{is_light_guide_pid, HidDiscovery};
use synthesia_kontrol::midi;
use synthesia_kontrol::ProfileRegistry;

use super::CommandResult;

/// List MIDI input ports
pub fn ports(midi_port: &str) -> CommandResult {
    let ports = midi::list_ports()?;
    if ports.is_empty() {
        println!("No MIDI input ports found");
        return Ok(());
    }

    let needle = midi_port.to_lowercase();
    println!("MIDI input ports:");
    for (i, name) in ports.iter().enumerate() {
        let marker = if name.to_lowercase().contains(&needle) {
            " <- selected"
        } else {
            ""
        };
        println!("  {i}: {name}{marker}");
    }
    Ok(())
}

/// List connected Native Instruments HID devices
pub fn devices(registry: &ProfileRegistry) -> CommandResult {
    let discovery = HidDiscovery::new()?;
    let devices = discovery.list_devices();
    if devices.is_empty() {
        println!("No Native Instruments devices found");
        return Ok(());
    }

    println!("Native Instruments devices:");
    for device in &devices {
        let info = &device.info;
        let profile = registry
            .find_by_vid_pid(info.vid, info.pid)
            .map(|p| p.name())
            .unwrap_or(if is_light_guide_pid(info.pid) {
                "light guide"
            } else {
                "unsupported"
            });
        println!(
            "  VID={:04X} PID={:04X} {} serial={} [{}]",
            info.vid,
            info.pid,
            info.product_name.as_deref().unwrap_or("Unknown"),
            info.serial.as_deref().unwrap_or("-"),
            profile
        );
        println!("    path={}", info.device_path);
    }
    Ok(())
}

/// List keyboard profiles in menu order
pub fn profiles(registry: &ProfileRegistry) -> CommandResult {
    println!("Keyboard profiles:");
    for (i, p) in registry.all_profiles().iter().enumerate() {
        println!(
            "  {}: {:<10} {:<28} {} {:04X}:{:04X} keys={} offset={} frame={}",
            i + 1,
            p.name(),
            p.display_name(),
            p.generation(),
            p.vendor_id(),
            p.product_id(),
            p.key_count(),
            p.note_offset(),
            p.frame_len()
        );
    }
    Ok(())
}
