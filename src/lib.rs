//! sectile: select or copy a markdown section from its heading.
//!
//! The library holds everything except the terminal plumbing, so section resolution, affordance
//! placement and the clipboard bridge can be driven without a terminal.

pub mod actions;
pub mod app_state;
pub mod buffer;
pub mod clipboard;
pub mod config;
pub mod editor_view;
pub mod error;
pub mod formats;
pub mod input;
pub mod logging;
pub mod notice;
pub mod reading_view;
pub mod section;
pub mod settings;
pub mod surface;
pub mod ui;
