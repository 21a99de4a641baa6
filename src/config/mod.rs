//! Configuration model for the serial terminal
//!
//! - **port** / **terminal**: the two settings structures a profile carries
//! - **macros**: shortcut bindings and their flat list encoding
//! - **keys**: the key table shared by load and save
//! - **section**: a named profile and its mapping onto the key file

pub mod keys;
pub mod macros;
pub mod port;
pub mod section;
pub mod terminal;

// Re-export commonly used types
pub use keys::ConfigKey;
pub use macros::{Macro, MacroTable};
pub use port::{FlowControl, Parity, PortConfig};
pub use section::{Section, ZeroPolicy};
pub use terminal::TerminalConfig;
