// Profile registry
// Central registry for looking up hardware profiles by name or menu number

use tracing::error;

use super::builtin::BUILTIN_PROFILES;
use super::types::HardwareProfile;

/// Registry of hardware profiles, kept in menu order
pub struct ProfileRegistry {
    profiles: Vec<HardwareProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    /// Create a registry with builtin profiles pre-loaded
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.load_builtins();
        registry
    }

    /// Load all builtin profiles
    pub fn load_builtins(&mut self) {
        for builtin in &BUILTIN_PROFILES {
            match builtin.to_profile() {
                Ok(profile) => self.register(profile),
                Err(e) => error!("Skipping builtin profile {}: {}", builtin.name, e),
            }
        }
    }

    /// Register a profile; a profile with the same name is replaced in place
    pub fn register(&mut self, profile: HardwareProfile) {
        match self
            .profiles
            .iter_mut()
            .find(|p| p.name().eq_ignore_ascii_case(profile.name()))
        {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Find profile by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&HardwareProfile> {
        self.profiles
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Find profile by its 1-based menu number
    pub fn find_by_index(&self, number: usize) -> Option<&HardwareProfile> {
        number.checked_sub(1).and_then(|i| self.profiles.get(i))
    }

    /// Find the first profile addressing this VID/PID
    pub fn find_by_vid_pid(&self, vid: u16, pid: u16) -> Option<&HardwareProfile> {
        self.profiles
            .iter()
            .find(|p| p.device_address() == (vid, pid))
    }

    /// Resolve a menu answer: empty picks the first entry, digits pick by
    /// number, anything else is looked up by name
    pub fn resolve_selection(&self, answer: &str) -> Option<&HardwareProfile> {
        let answer = answer.trim();
        if answer.is_empty() {
            return self.find_by_index(1);
        }
        match answer.parse::<usize>() {
            Ok(number) => self.find_by_index(number),
            Err(_) => self.find_by_name(answer),
        }
    }

    /// Get all registered profiles in menu order
    pub fn all_profiles(&self) -> &[HardwareProfile] {
        &self.profiles
    }

    /// Get the number of registered profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Generation;

    #[test]
    fn test_registry_with_builtins() {
        let registry = ProfileRegistry::with_builtins();
        assert_eq!(registry.len(), 4);

        let profile = registry.find_by_name("s61-mk2").unwrap();
        assert_eq!(profile.display_name(), "Komplete Kontrol S61 MK2");
        assert_eq!(profile.generation(), Generation::Mk2);
        assert_eq!(profile.key_count(), 61);
        assert_eq!(profile.note_offset(), -36);
    }

    #[test]
    fn test_menu_order_matches_numbers() {
        let registry = ProfileRegistry::with_builtins();
        let names: Vec<&str> = registry
            .all_profiles()
            .iter()
            .map(|p| p.name())
            .collect();
        assert_eq!(names, ["s61-mk2", "s88-mk2", "s61-mk1", "s88-mk1"]);
        assert_eq!(registry.find_by_index(4).unwrap().product_id(), 0x1410);
        assert!(registry.find_by_index(0).is_none());
        assert!(registry.find_by_index(5).is_none());
    }

    #[test]
    fn test_resolve_selection() {
        let registry = ProfileRegistry::with_builtins();
        assert_eq!(registry.resolve_selection("").unwrap().name(), "s61-mk2");
        assert_eq!(registry.resolve_selection("3\n").unwrap().name(), "s61-mk1");
        assert_eq!(registry.resolve_selection("S88-MK2").unwrap().name(), "s88-mk2");
        assert!(registry.resolve_selection("9").is_none());
        assert!(registry.resolve_selection("launchkey").is_none());
    }

    #[test]
    fn test_find_by_vid_pid() {
        let registry = ProfileRegistry::with_builtins();
        let profile = registry.find_by_vid_pid(0x17CC, 0x1630).unwrap();
        assert_eq!(profile.name(), "s88-mk2");
        assert!(registry.find_by_vid_pid(0x17CC, 0x1700).is_none());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = ProfileRegistry::with_builtins();
        let custom =
            HardwareProfile::new("S61-MK2", "Custom S61", Generation::Mk2, (0x17CC, 0x1620), 61, -48)
                .unwrap();
        registry.register(custom);

        assert_eq!(registry.len(), 4);
        assert_eq!(registry.find_by_name("s61-mk2").unwrap().note_offset(), -48);
        assert_eq!(registry.find_by_index(1).unwrap().display_name(), "Custom S61");
    }
}
