//! Zyntra: a digital forest that grows with your wellness habits.
//!
//! The crate holds the local activity store, the mapping from wellness
//! numbers to a procedural forest scene, the forest spirit chat and a
//! client for the wellness backend.

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod scene;
pub mod store;

pub use error::{Result, ZyntraError};
