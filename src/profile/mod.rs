// Hardware profile module
// Fixed per-session description of the connected keyboard model

pub mod builtin;
pub mod registry;
pub mod types;

pub use builtin::BUILTIN_PROFILES;
pub use registry::ProfileRegistry;
pub use types::{Generation, HardwareProfile};
