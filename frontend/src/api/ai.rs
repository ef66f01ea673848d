//! AI generation endpoints
//!
//! Generation runs an LLM on the server and routinely takes a minute, so
//! those calls carry an explicit timeout. Import and auto-layout are fast.

use super::ApiClient;
use crate::error::ApiError;
use crate::web::{FormPart, UploadFile};
use merq_shared::{
    AutoLayoutResponse, GenerateCourseResponse, GenerateModuleContentResponse,
    GenerateNodeContentResponse, GenerateRoadmapResponse, HttpMethod, Id, ImportRoadmapRequest,
    RoadmapImport,
};
use std::time::Duration;

pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

const EMPTY_OBJECT: &str = "{}";

#[derive(Clone, Copy)]
pub struct AiApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AiApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Builds a course from an uploaded document.
    pub async fn generate_course(
        self,
        file: UploadFile,
        title: &str,
        teacher_id: Id,
    ) -> Result<GenerateCourseResponse, ApiError> {
        let form = vec![
            FormPart::file("file", file),
            FormPart::text("title", title),
            FormPart::text("teacher_id", teacher_id.to_string()),
        ];
        self.upload("/ai/generate-course", form).await
    }

    pub async fn generate_module_content(
        self,
        module_id: Id,
    ) -> Result<GenerateModuleContentResponse, ApiError> {
        self.generate(&format!("/ai/modules/{module_id}/generate-content"))
            .await
    }

    /// Builds a roadmap from an uploaded document.
    pub async fn generate_roadmap(
        self,
        file: UploadFile,
        title: &str,
        creator_id: Id,
    ) -> Result<GenerateRoadmapResponse, ApiError> {
        let form = vec![
            FormPart::file("file", file),
            FormPart::text("title", title),
            FormPart::text("creator_id", creator_id.to_string()),
        ];
        self.upload("/ai/generate-roadmap", form).await
    }

    pub async fn generate_node_content(
        self,
        node_id: Id,
    ) -> Result<GenerateNodeContentResponse, ApiError> {
        self.generate(&format!("/ai/nodes/{node_id}/generate-content"))
            .await
    }

    /// Creates a roadmap from an already structured outline.
    pub async fn import_roadmap(
        self,
        title: &str,
        creator_id: Id,
        data: RoadmapImport,
    ) -> Result<GenerateRoadmapResponse, ApiError> {
        let body = ImportRoadmapRequest {
            title: title.to_string(),
            creator_id,
            data,
        };
        self.client.post("/ai/import-roadmap", &body).await
    }

    /// Lets the server recompute node positions.
    pub async fn auto_layout(self, roadmap_id: Id) -> Result<AutoLayoutResponse, ApiError> {
        let req = self
            .client
            .request(HttpMethod::Post, &format!("/ai/{roadmap_id}/auto-layout"));
        self.client.execute(req).await
    }

    async fn upload<T: serde::de::DeserializeOwned>(
        self,
        path: &str,
        form: Vec<FormPart>,
    ) -> Result<T, ApiError> {
        let req = self
            .client
            .request(HttpMethod::Post, path)
            .with_multipart(form)
            .with_timeout(GENERATION_TIMEOUT);
        self.client.execute(req).await
    }

    async fn generate<T: serde::de::DeserializeOwned>(self, path: &str) -> Result<T, ApiError> {
        let req = self
            .client
            .request(HttpMethod::Post, path)
            .with_json(EMPTY_OBJECT.to_string())
            .with_timeout(GENERATION_TIMEOUT);
        self.client.execute(req).await
    }
}
