//! Dream service - turns a text prompt into a generated image
//!
//! A browser form (or the bundled Rust client) posts a prompt to `/dream`;
//! the service forwards it to an image-generation provider and relays the
//! returned image reference.

pub mod ai;
pub mod app;
pub mod client;
pub mod error;
pub mod models;
pub mod server;
pub mod ui;

pub use error::{Error, Result};
