// CLI definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "synthesia-kontrol")]
#[command(author, version, about = "Light the keys of a Komplete Kontrol keyboard from Synthesia")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/synthesia-kontrol/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Keyboard profile: name (s61-mk2) or menu number (1-4)
    #[arg(short, long, global = true)]
    pub keyboard: Option<String>,

    /// MIDI input port to listen on (substring of the port name)
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Log every report sent to the keyboard
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drive the light guide from MIDI input (default)
    Run,

    /// List MIDI input ports
    #[command(visible_alias = "midi")]
    Ports,

    /// List connected Native Instruments HID devices
    #[command(visible_aliases = ["list", "ls"])]
    Devices,

    /// List known keyboard profiles
    Profiles,

    /// Light every key in turn to check the wiring
    #[command(visible_alias = "test")]
    Sweep {
        /// Time each key stays lit, in milliseconds
        #[arg(long, default_value = "40")]
        delay_ms: u64,
    },
}
