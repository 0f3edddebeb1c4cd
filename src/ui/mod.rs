//! Terminal user interface.
//!
//! # Module Structure
//!
//! - `loop_runner` - main event loop and terminal management
//! - `input` - key handling for browse, detail and search modes
//! - `events` - applies background invocation results
//! - `helpers` - spawning invocations with panic capture
//! - `render` - layout and view dispatch
//! - `cards`, `sidebar`, `detail`, `status`, `help` - widgets
//! - `plain` - non-interactive text rendering for `--print`

mod cards;
mod detail;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod plain;
mod render;
mod sidebar;
mod status;

pub use loop_runner::{run, Action};
pub use plain::render_plain;
