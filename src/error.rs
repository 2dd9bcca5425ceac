//! Application error types

use kontrol_transport::TransportError;
use thiserror::Error;

/// Fatal errors of a lighting session
///
/// A note outside the keyboard's range is not an error; the key mapper
/// reports it as `None` and the event is dropped.
#[derive(Error, Debug)]
pub enum KontrolError {
    /// Configuration names a device generation we cannot encode
    #[error("Unsupported device generation: {0} (expected mk1 or mk2)")]
    UnsupportedGeneration(String),

    /// No hardware profile with this name or menu number
    #[error("Unknown keyboard profile: {0}")]
    UnknownProfile(String),

    /// Opening or writing to the keyboard failed
    #[error("Keyboard unavailable: {0}")]
    DeviceUnavailable(#[from] TransportError),

    /// The MIDI input port could not be located or opened
    #[error("MIDI source unavailable: {0}")]
    SourceUnavailable(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
