//! TOML configuration
//!
//! Everything is optional; a missing file means defaults. Custom hardware
//! profiles declared here are validated before the session starts, so a
//! bad generation name aborts before any MIDI event is read.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use kontrol_transport::VENDOR_ID;
use serde::{Deserialize, Serialize};

use crate::error::KontrolError;
use crate::profile::{Generation, HardwareProfile, ProfileRegistry};

/// Port name fragment of the LoopBe1 virtual MIDI cable Synthesia writes to
pub const DEFAULT_MIDI_PORT: &str = "LoopBe";

fn default_midi_port() -> String {
    DEFAULT_MIDI_PORT.to_string()
}

fn default_vendor_id() -> u16 {
    VENDOR_ID
}

/// Application configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Profile name to drive; asked interactively when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<String>,
    /// Substring of the MIDI input port name
    #[serde(default = "default_midi_port")]
    pub midi_port: String,
    /// Log every report written to the keyboard
    #[serde(default)]
    pub monitor: bool,
    /// Additional hardware profiles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<ProfileConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keyboard: None,
            midi_port: default_midi_port(),
            monitor: false,
            profiles: Vec::new(),
        }
    }
}

/// A user-declared keyboard model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// "mk1" or "mk2"
    pub generation: String,
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,
    pub product_id: u16,
    pub key_count: usize,
    pub note_offset: i32,
}

impl ProfileConfig {
    /// Validate into a hardware profile
    pub fn to_profile(&self) -> Result<HardwareProfile, KontrolError> {
        let generation: Generation = self.generation.parse()?;
        HardwareProfile::new(
            self.name.clone(),
            self.display_name.clone().unwrap_or_else(|| self.name.clone()),
            generation,
            (self.vendor_id, self.product_id),
            self.key_count,
            self.note_offset,
        )
    }
}

impl AppConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("synthesia-kontrol")
            .join("config.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Builtin profiles plus the ones declared in this file
    pub fn build_registry(&self) -> Result<ProfileRegistry, KontrolError> {
        let mut registry = ProfileRegistry::with_builtins();
        for entry in &self.profiles {
            registry.register(entry.to_profile()?);
        }
        Ok(registry)
    }
}

/// Ask for a keyboard on the terminal: print the numbered menu, read one
/// line. An empty answer picks the first entry.
pub fn prompt_profile<R, W>(
    registry: &ProfileRegistry,
    mut input: R,
    mut output: W,
) -> Result<HardwareProfile, KontrolError>
where
    R: BufRead,
    W: Write,
{
    let choices = (1..=registry.len())
        .map(|n| if n == 1 { format!("*{n}") } else { n.to_string() })
        .collect::<Vec<_>>()
        .join(",");
    writeln!(output, "Select your keyboard ({choices}):")?;
    for (i, profile) in registry.all_profiles().iter().enumerate() {
        writeln!(output, "  {}-{}", i + 1, profile.display_name())?;
    }
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    registry
        .resolve_selection(&answer)
        .cloned()
        .ok_or_else(|| KontrolError::UnknownProfile(answer.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.midi_port, "LoopBe");
        assert_eq!(config.build_registry().unwrap().len(), 4);
    }

    #[test]
    fn test_custom_profile() {
        let config: AppConfig = toml::from_str(
            r#"
            keyboard = "s49-mk2"
            midi_port = "loopMIDI"
            monitor = true

            [[profiles]]
            name = "s49-mk2"
            display_name = "Komplete Kontrol S49 MK2"
            generation = "mk2"
            product_id = 0x1610
            key_count = 49
            note_offset = -36
            "#,
        )
        .unwrap();

        assert!(config.monitor);
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 5);

        let profile = registry.find_by_name("s49-mk2").unwrap();
        assert_eq!(profile.device_address(), (0x17CC, 0x1610));
        assert_eq!(profile.generation(), Generation::Mk2);
        assert_eq!(profile.key_count(), 49);
    }

    #[test]
    fn test_custom_profile_overrides_builtin() {
        let config: AppConfig = toml::from_str(
            r#"
            [[profiles]]
            name = "s61-mk2"
            generation = "mk2"
            product_id = 0x1620
            key_count = 61
            note_offset = -24
            "#,
        )
        .unwrap();

        let registry = config.build_registry().unwrap();
        assert_eq!(registry.len(), 4);
        let profile = registry.find_by_index(1).unwrap();
        assert_eq!(profile.note_offset(), -24);
        assert_eq!(profile.display_name(), "s61-mk2");
    }

    #[test]
    fn test_unknown_generation_is_rejected() {
        let config: AppConfig = toml::from_str(
            r#"
            [[profiles]]
            name = "mystery"
            generation = "mk3"
            product_id = 1
            key_count = 49
            note_offset = -36
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.build_registry(),
            Err(KontrolError::UnsupportedGeneration(ref g)) if g == "mk3"
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("synthesia-kontrol-no-such-dir/config.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_prompt_profile() {
        let registry = ProfileRegistry::with_builtins();
        let mut shown = Vec::new();
        let profile = prompt_profile(&registry, &b"2\n"[..], &mut shown).unwrap();
        assert_eq!(profile.name(), "s88-mk2");

        let menu = String::from_utf8(shown).unwrap();
        assert!(menu.starts_with("Select your keyboard (*1,2,3,4):"));
        assert!(menu.contains("  4-Komplete Kontrol S88 MK1"));
    }

    #[test]
    fn test_prompt_profile_default_and_invalid() {
        let registry = ProfileRegistry::with_builtins();
        let profile = prompt_profile(&registry, &b"\n"[..], Vec::new()).unwrap();
        assert_eq!(profile.name(), "s61-mk2");

        let err = prompt_profile(&registry, &b"7\n"[..], Vec::new()).unwrap_err();
        assert!(matches!(err, KontrolError::UnknownProfile(ref a) if a == "7"));
    }
}
