//! Device registry - known Native Instruments product ids
//!
//! Only the keyboards with a per-key light guide are listed here. The
//! application's hardware profiles decide which report layout a product
//! speaks; this module only answers "is this one of ours".

/// Native Instruments vendor ID
pub const VENDOR_ID: u16 = 0x17CC;

/// Komplete Kontrol S61 MK2
pub const PID_S61_MK2: u16 = 0x1620;
/// Komplete Kontrol S88 MK2
pub const PID_S88_MK2: u16 = 0x1630;
/// Komplete Kontrol S61 MK1
pub const PID_S61_MK1: u16 = 0x1360;
/// Komplete Kontrol S88 MK1
pub const PID_S88_MK1: u16 = 0x1410;

/// Product IDs with a light guide we know how to drive
pub const LIGHT_GUIDE_PIDS: &[u16] = &[PID_S61_MK2, PID_S88_MK2, PID_S61_MK1, PID_S88_MK1];

/// Check if PID is a known light-guide keyboard
#[inline]
pub fn is_light_guide_pid(pid: u16) -> bool {
    LIGHT_GUIDE_PIDS.contains(&pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pids() {
        assert!(is_light_guide_pid(0x1620));
        assert!(is_light_guide_pid(0x1630));
        assert!(is_light_guide_pid(0x1360));
        assert!(is_light_guide_pid(0x1410));
    }

    #[test]
    fn test_unknown_pids() {
        assert!(!is_light_guide_pid(0x1700)); // Maschine Mikro MK3
        assert!(!is_light_guide_pid(0x0000));
    }
}
