pub mod admin;
pub mod auth;
pub mod forest;
pub mod gait;
pub mod insights;
pub mod posture;
pub mod session;

pub use auth::{login, logout, register, status};
