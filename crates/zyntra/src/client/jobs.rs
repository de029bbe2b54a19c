//! Bounded polling for long-running video jobs
//!
//! The backend has no push channel: after an upload the client asks for the
//! job status on a fixed interval until it sees a terminal state, runs out
//! of attempts, or the caller cancels. Transient failures (transport errors,
//! non-2xx answers, HTML error pages, unparsable bodies) are retried up to
//! their own caps.

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::api::WellnessClient;
use crate::config::Settings;
use crate::error::{Result, ZyntraError};
use crate::models::{GaitAnalysis, JobState, JobStatus};

/// Polling limits
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Wait before every status check
    pub interval: Duration,
    /// Status checks before giving up with a timeout
    pub max_attempts: u32,
    /// Once past this many attempts, a non-2xx status check is fatal
    pub max_failed_checks: u32,
    /// Once past this many attempts, an HTML page instead of JSON is fatal
    pub max_non_json: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 150,
            max_failed_checks: 10,
            max_non_json: 5,
        }
    }
}

impl PollConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.poll_interval(),
            max_attempts: settings.max_poll_attempts,
            max_failed_checks: settings.max_failed_status_checks,
            max_non_json: settings.max_non_json_responses,
        }
    }
}

/// Result of a single status check
#[derive(Debug)]
pub enum StatusCheck {
    /// Parsed status body
    Status(JobStatus),
    /// Request never got an answer
    Transport(String),
    /// Non-2xx answer
    HttpFailure(u16),
    /// 2xx answer that was not JSON (body kept for diagnostics)
    NonJson(String),
    /// JSON answer that did not match the status shape
    Malformed(String),
}

/// Anything that can report the state of a job
#[async_trait]
pub trait JobStatusSource {
    async fn check_status(&self, job_id: &str) -> StatusCheck;
}

#[async_trait]
impl JobStatusSource for WellnessClient {
    async fn check_status(&self, job_id: &str) -> StatusCheck {
        let path = format!("/gait/recognition-status/{}", job_id);
        match self.get_raw(&path).await {
            Err(e) => StatusCheck::Transport(e.to_string()),
            Ok(raw) if !raw.status.is_success() => StatusCheck::HttpFailure(raw.status.as_u16()),
            Ok(raw) if !raw.is_json() => StatusCheck::NonJson(raw.body),
            Ok(raw) => match serde_json::from_str::<JobStatus>(&raw.body) {
                Ok(status) => StatusCheck::Status(status),
                Err(e) => StatusCheck::Malformed(e.to_string()),
            },
        }
    }
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(64).collect::<String>().to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Poll until the job reaches a terminal state.
///
/// `on_attempt` is called with the 1-based attempt number right before each
/// status check. Cancellation is observed at every wait.
pub async fn poll_job<S, F>(
    source: &S,
    job_id: &str,
    config: &PollConfig,
    cancel: &CancellationToken,
    mut on_attempt: F,
) -> Result<JobStatus>
where
    S: JobStatusSource + Sync + ?Sized,
    F: FnMut(u32),
{
    for attempt in 1..=config.max_attempts {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(job_id, attempt, "polling cancelled");
                return Err(ZyntraError::JobCancelled(job_id.to_string()));
            }
            _ = tokio::time::sleep(config.interval) => {}
        }

        on_attempt(attempt);
        debug!(job_id, attempt, max = config.max_attempts, "checking job status");

        match source.check_status(job_id).await {
            StatusCheck::Status(status) => match status.state() {
                JobState::Completed => {
                    info!(job_id, attempt, "job completed");
                    return Ok(status);
                }
                JobState::Failed => {
                    let message = status
                        .message
                        .clone()
                        .unwrap_or_else(|| "Video processing failed".to_string());
                    warn!(job_id, %message, "job failed");
                    return Err(ZyntraError::JobFailed {
                        job_id: job_id.to_string(),
                        message,
                    });
                }
                state => debug!(job_id, ?state, "still processing"),
            },
            StatusCheck::Transport(err) => {
                warn!(job_id, attempt, error = %err, "status check did not reach the server, retrying");
            }
            StatusCheck::HttpFailure(code) => {
                warn!(job_id, attempt, code, "status check failed");
                if attempt > config.max_failed_checks {
                    return Err(ZyntraError::Api {
                        status: code,
                        message: format!(
                            "Status check failing repeatedly. Check if job {} is valid.",
                            job_id
                        ),
                    });
                }
            }
            StatusCheck::NonJson(body) => {
                warn!(job_id, attempt, "status check returned non-JSON body");
                if attempt > config.max_non_json && looks_like_html(&body) {
                    return Err(ZyntraError::invalid_response(
                        "API is returning HTML instead of JSON. The tunnel URL might have expired or the endpoint is incorrect.",
                    ));
                }
            }
            StatusCheck::Malformed(err) => {
                warn!(job_id, attempt, error = %err, "could not parse status body, retrying");
            }
        }
    }

    Err(ZyntraError::JobTimedOut {
        job_id: job_id.to_string(),
        attempts: config.max_attempts,
    })
}

/// Upload a video, wait for recognition, then fetch the processed video link.
///
/// A missing download link is not an error: the analysis is returned with
/// `processed_video_url: None`.
pub async fn analyze_gait_video<F>(
    client: &WellnessClient,
    file: &Path,
    config: &PollConfig,
    cancel: &CancellationToken,
    on_attempt: F,
) -> Result<GaitAnalysis>
where
    F: FnMut(u32),
{
    let receipt = client.upload_gait_video(file).await?;
    let job_id = receipt.job_id().ok_or_else(|| {
        ZyntraError::invalid_response("No log_id returned from upload")
    })?;
    info!(%job_id, message = ?receipt.message, "video uploaded");

    let status = poll_job(client, &job_id, config, cancel, on_attempt).await?;

    let url = match client.download_link(&job_id).await {
        Ok(link) => link.download_url,
        Err(e) => {
            warn!(%job_id, error = %e, "could not fetch download link");
            None
        }
    };
    if url.is_none() {
        warn!(%job_id, "no download URL received, preview unavailable");
    }

    Ok(GaitAnalysis::from_status(job_id, &status, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays scripted checks, then reports `processing` forever
    struct ScriptedSource {
        script: Mutex<VecDeque<StatusCheck>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(script: Vec<StatusCheck>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobStatusSource for ScriptedSource {
        async fn check_status(&self, _job_id: &str) -> StatusCheck {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| status("processing"))
        }
    }

    fn status(s: &str) -> StatusCheck {
        StatusCheck::Status(JobStatus {
            status: s.to_string(),
            message: None,
            total_persons_detected: Some(2),
            total_recognized: Some(1),
            created_at: None,
            completed_at: None,
        })
    }

    fn fast_config() -> PollConfig {
        PollConfig {
            interval: Duration::ZERO,
            ..PollConfig::default()
        }
    }

    #[tokio::test]
    async fn test_completes_on_last_attempt() {
        let mut script: Vec<StatusCheck> = (0..149).map(|_| status("processing")).collect();
        script.push(status("completed"));
        let source = ScriptedSource::new(script);

        let result = poll_job(&source, "7", &fast_config(), &CancellationToken::new(), |_| {}).await;

        let done = result.expect("should complete");
        assert_eq!(done.state(), JobState::Completed);
        assert_eq!(source.calls(), 150);
    }

    #[tokio::test]
    async fn test_times_out_after_max_attempts() {
        let source = ScriptedSource::new(vec![]);

        let result = poll_job(&source, "7", &fast_config(), &CancellationToken::new(), |_| {}).await;

        match result {
            Err(ZyntraError::JobTimedOut { attempts, .. }) => assert_eq!(attempts, 150),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(source.calls(), 150);
    }

    #[tokio::test]
    async fn test_processed_counts_as_completed() {
        let source = ScriptedSource::new(vec![status("queued"), status("processed")]);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(result.is_ok());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_status_is_terminal() {
        let mut failed = JobStatus {
            status: "error".to_string(),
            message: Some("codec not supported".to_string()),
            total_persons_detected: None,
            total_recognized: None,
            created_at: None,
            completed_at: None,
        };
        let source = ScriptedSource::new(vec![StatusCheck::Status(failed.clone())]);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        match result {
            Err(ZyntraError::JobFailed { message, .. }) => assert_eq!(message, "codec not supported"),
            other => panic!("expected failure, got {:?}", other),
        }

        failed.message = None;
        let source = ScriptedSource::new(vec![StatusCheck::Status(failed)]);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(matches!(result, Err(ZyntraError::JobFailed { message, .. }) if message == "Video processing failed"));
    }

    #[tokio::test]
    async fn test_transient_errors_are_retried() {
        let source = ScriptedSource::new(vec![
            StatusCheck::Transport("connection reset".to_string()),
            StatusCheck::Malformed("expected value".to_string()),
            StatusCheck::HttpFailure(502),
            StatusCheck::NonJson("<!DOCTYPE html><html></html>".to_string()),
            status("completed"),
        ]);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(result.is_ok());
        assert_eq!(source.calls(), 5);
    }

    #[tokio::test]
    async fn test_repeated_http_failures_give_up() {
        let script = (0..20).map(|_| StatusCheck::HttpFailure(404)).collect();
        let source = ScriptedSource::new(script);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(matches!(result, Err(ZyntraError::Api { status: 404, .. })));
        assert_eq!(source.calls(), 11);
    }

    #[tokio::test]
    async fn test_persistent_html_gives_up() {
        let script = (0..20)
            .map(|_| StatusCheck::NonJson("<!DOCTYPE html><p>tunnel offline</p>".to_string()))
            .collect();
        let source = ScriptedSource::new(script);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(matches!(result, Err(ZyntraError::InvalidResponse(_))));
        assert_eq!(source.calls(), 6);
    }

    #[tokio::test]
    async fn test_plain_text_non_json_keeps_polling() {
        let mut script: Vec<StatusCheck> = (0..20)
            .map(|_| StatusCheck::NonJson("upstream busy".to_string()))
            .collect();
        script.push(status("completed"));
        let source = ScriptedSource::new(script);
        let result = poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |_| {}).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_cancelled_before_first_check() {
        let source = ScriptedSource::new(vec![status("completed")]);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = poll_job(&source, "9", &fast_config(), &cancel, |_| {}).await;
        assert!(matches!(result, Err(ZyntraError::JobCancelled(id)) if id == "9"));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_wait() {
        let source = ScriptedSource::new(vec![]);
        let cancel = CancellationToken::new();
        let config = PollConfig {
            interval: Duration::from_secs(3600),
            ..PollConfig::default()
        };

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let result = poll_job(&source, "9", &config, &cancel, |_| {}).await;
        assert!(matches!(result, Err(ZyntraError::JobCancelled(_))));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_progress_callback_sees_every_attempt() {
        let source = ScriptedSource::new(vec![status("processing"), status("completed")]);
        let mut seen = Vec::new();
        poll_job(&source, "1", &fast_config(), &CancellationToken::new(), |n| seen.push(n))
            .await
            .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("  <!DOCTYPE html>"));
        assert!(looks_like_html("<html><body>"));
        assert!(!looks_like_html("{\"status\": \"processing\"}"));
    }
}
