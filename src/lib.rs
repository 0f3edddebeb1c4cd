//! newsdesk: a terminal article browser.
//!
//! A static article feed is loaded, filtered by title search and category,
//! sorted by views or date, and presented as a featured highlight plus a list
//! of cards. See [`pipeline`] for the data flow and [`ui`] for the front ends.

pub mod app;
pub mod config;
pub mod feed;
pub mod keybindings;
pub mod pipeline;
pub mod preferences;
pub mod theme;
pub mod ui;
pub mod util;
