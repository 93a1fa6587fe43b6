//! Interactive console front end for the inventory manager.
//!
//! Everything here is presentation: prompting, parsing operator text,
//! rendering menus and tables. Business rules live in `ims-inventory`.

pub mod config;
pub mod format;
pub mod input;
pub mod menu;
pub mod session;

pub use config::{ConfigError, ConsoleConfig};
pub use input::{Console, InputError};
pub use menu::MenuChoice;
pub use session::Session;
