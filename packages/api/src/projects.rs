//! Project endpoints.

use store::{ProjectData, ProjectList, ProjectResponse, SessionStore};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Navigator;

impl<S: SessionStore, N: Navigator> ApiClient<S, N> {
    pub async fn create_project(&self, data: &ProjectData) -> Result<ProjectResponse, ApiError> {
        self.post("/projects", data).await
    }

    pub async fn list_projects(&self) -> Result<ProjectList, ApiError> {
        self.get("/projects").await
    }

    pub async fn get_project(&self, id: u64) -> Result<ProjectResponse, ApiError> {
        self.get(&format!("/projects/{id}")).await
    }
}
