//! Text helpers shared by the terminal and plain renderers.
//!
//! - **Sanitizing**: feed text is untrusted, so control characters and ANSI
//!   escape sequences are stripped before anything reaches the terminal
//! - **Width-aware truncation**: titles are fitted to column widths with
//!   Unicode-aware measurement
//!
//! # Examples
//!
//! ```
//! use newsdesk::util::{display_width, single_line, truncate_to_width};
//!
//! assert_eq!(display_width("Hello"), 5);
//! assert_eq!(truncate_to_width("Long article title", 10), "Long ar...");
//! assert_eq!(single_line("two\nlines"), "two lines");
//! ```

mod text;

pub use text::{display_width, single_line, strip_control_chars, truncate_to_width};

/// Maximum accepted search term length (UI layer validation)
pub const MAX_SEARCH_TERM_LENGTH: usize = 256;
