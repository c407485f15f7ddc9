//! Terminal browser for a Stack Overflow user's questions: fetch by user ID,
//! sort by creation date, answer count, or view count, and open a selected
//! question in an embedded page viewer.

pub mod api;
pub mod app;
pub mod error;
pub mod models;
pub mod state;
pub mod ui;
pub mod utils;
