//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the toolbar, the browser controller and the
//! tokio runtime the bridge capabilities run on.

mod core;
mod event_handler;
mod init;
mod keys;
mod polling;
mod shutdown;
mod title;
mod types;

pub use core::Web4xApp;
