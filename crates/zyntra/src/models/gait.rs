//! Gait recognition payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response to a video upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub log_id: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UploadReceipt {
    /// Job identifier as a path segment; the backend sends either a number or a string
    pub fn job_id(&self) -> Option<String> {
        match &self.log_id {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Lifecycle state of a processing job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Pending,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl JobState {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "pending" | "queued" | "uploaded" => JobState::Pending,
            "processing" | "running" | "in_progress" => JobState::Processing,
            "completed" | "processed" => JobState::Completed,
            "failed" | "error" => JobState::Failed,
            other => JobState::Other(other.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// Body of `GET /gait/recognition-status/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_persons_detected: Option<u32>,
    #[serde(default)]
    pub total_recognized: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobStatus {
    pub fn state(&self) -> JobState {
        JobState::parse(&self.status)
    }

    pub fn processing_seconds(&self) -> Option<i64> {
        match (self.created_at, self.completed_at) {
            (Some(start), Some(end)) => Some((end - start).num_seconds()),
            _ => None,
        }
    }
}

/// Body of `GET /gait/download-processed-video/{id}`; the URL is signed and expires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadLink {
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Outcome of a finished gait analysis
#[derive(Debug, Clone, Serialize)]
pub struct GaitAnalysis {
    pub log_id: String,
    pub persons_detected: u32,
    pub recognized: u32,
    pub processing_seconds: Option<i64>,
    pub processed_video_url: Option<String>,
}

impl GaitAnalysis {
    pub fn from_status(log_id: impl Into<String>, status: &JobStatus, url: Option<String>) -> Self {
        Self {
            log_id: log_id.into(),
            persons_detected: status.total_persons_detected.unwrap_or(0),
            recognized: status.total_recognized.unwrap_or(0),
            processing_seconds: status.processing_seconds(),
            processed_video_url: url,
        }
    }
}

/// Enrolled gait profile of the current user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitProfile {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub sample_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body of `GET /gait/profile-status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileStatus {
    #[serde(default)]
    pub has_profile: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
