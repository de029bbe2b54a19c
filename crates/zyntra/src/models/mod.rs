pub mod activity;
pub mod admin;
pub mod auth;
pub mod forest;
pub mod gait;
pub mod insights;
pub mod posture;

pub use activity::{Activity, ActivityKind, NewActivity};
pub use admin::{Employee, EmployeeDashboard, EmployeeRoster, TeamSummary};
pub use auth::{LoginRequest, RegisterRequest, UserData};
pub use forest::{ForestSnapshot, SceneFeatures, Season, TreeCounts, Weather};
pub use gait::{DownloadLink, GaitAnalysis, GaitProfile, JobState, JobStatus, ProfileStatus, UploadReceipt};
pub use insights::{AiInsights, Trend};
pub use posture::{PersonAnalysis, PostureAnalysis, Rating};
