//! Library entry for Eight Characters exposing the client core for the binary and
//! integration tests.

pub mod app;
pub mod config;
pub mod events;
pub mod i18n;
pub mod logic;
pub mod net;
pub mod state;
pub mod theme;
pub mod ui;
