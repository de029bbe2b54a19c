pub mod api;
pub mod auth;
mod endpoints;
pub mod jobs;
pub mod tokens;

pub use api::WellnessClient;
pub use auth::AuthClient;
pub use jobs::{analyze_gait_video, poll_job, JobStatusSource, PollConfig, StatusCheck};
pub use tokens::AuthSession;
