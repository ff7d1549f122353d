//! Task endpoints.

use store::{SessionStore, TaskData, TaskResponse};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::navigation::Navigator;

impl<S: SessionStore, N: Navigator> ApiClient<S, N> {
    pub async fn create_task(&self, data: &TaskData) -> Result<TaskResponse, ApiError> {
        self.post("/tasks", data).await
    }

    pub async fn list_tasks(&self) -> Result<Vec<TaskData>, ApiError> {
        self.get("/tasks").await
    }

    pub async fn get_task(&self, id: u64) -> Result<TaskData, ApiError> {
        self.get(&format!("/tasks/{id}")).await
    }
}
