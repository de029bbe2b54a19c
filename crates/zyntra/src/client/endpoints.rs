//! Typed wrappers over the wellness backend routes

use std::collections::BTreeMap;
use std::path::Path;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::client::api::WellnessClient;
use crate::error::Result;
use crate::models::{
    AiInsights, DownloadLink, Employee, EmployeeDashboard, EmployeeRoster, ForestSnapshot,
    GaitProfile, PostureAnalysis, ProfileStatus, UploadReceipt,
};

impl WellnessClient {
    pub async fn forest(&self) -> Result<ForestSnapshot> {
        self.get_json("/wellness/forest").await
    }

    pub async fn ai_insights(&self) -> Result<AiInsights> {
        self.get_json("/wellness/ai-insights").await
    }

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let roster: EmployeeRoster = self.get_json("/api/admins/me/employees").await?;
        Ok(roster.employees)
    }

    pub async fn employee_dashboard(&self, user_id: i64) -> Result<EmployeeDashboard> {
        self.get_json(&format!("/wellness/dashboard?user_id={}", user_id))
            .await
    }

    /// Fetch every dashboard concurrently. Employees whose dashboard fails
    /// to load are left out of the map.
    pub async fn employee_dashboards(
        &self,
        employees: &[Employee],
    ) -> BTreeMap<i64, EmployeeDashboard> {
        let mut tasks = JoinSet::new();
        for employee in employees {
            let client = self.clone();
            let id = employee.id;
            tasks.spawn(async move { (id, client.employee_dashboard(id).await) });
        }

        let mut dashboards = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((id, Ok(dashboard))) => {
                    dashboards.insert(id, dashboard);
                }
                Ok((id, Err(e))) => warn!(user_id = id, error = %e, "skipping dashboard"),
                Err(e) => warn!(error = %e, "dashboard task panicked"),
            }
        }
        debug!(loaded = dashboards.len(), total = employees.len(), "dashboards loaded");
        dashboards
    }

    pub async fn analyze_posture(&self, video: &Path) -> Result<PostureAnalysis> {
        self.upload("/posture/analyze-cctv-demo", video).await
    }

    pub async fn upload_gait_video(&self, video: &Path) -> Result<UploadReceipt> {
        self.upload("/gait/upload-cctv-video", video).await
    }

    pub async fn download_link(&self, job_id: &str) -> Result<DownloadLink> {
        self.get_json(&format!("/gait/download-processed-video/{}", job_id))
            .await
    }

    pub async fn gait_profile(&self) -> Result<GaitProfile> {
        self.get_json("/gait/user-profile").await
    }

    pub async fn gait_profile_status(&self) -> Result<ProfileStatus> {
        self.get_json("/gait/profile-status").await
    }

    pub async fn delete_gait_profile(&self) -> Result<serde_json::Value> {
        self.delete("/gait/user-profile").await
    }
}
