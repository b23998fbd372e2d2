//! Sproutland as a library.
//!
//! `main.rs` owns the window and the plugin wiring. Integration tests in
//! `tests/` link against this crate instead, so every domain module is public
//! and can be driven headless.

pub mod shared;
pub mod input;
pub mod calendar;
pub mod player;
pub mod farming;
pub mod world;
pub mod economy;
pub mod ui;
pub mod data;
