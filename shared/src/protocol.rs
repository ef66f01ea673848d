use crate::{Id, RoadmapImport, User};
use serde::{Deserialize, Serialize};

/// HTTP methods used by the client API modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

// =========================================================
// Errors
// =========================================================

/// Error payload returned by the backend.
///
/// `detail` is a string for domain errors and a list of field errors for
/// request validation failures, so it is kept untyped here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The human-readable detail, when the server sent a non-empty one.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()?
            .as_str()
            .filter(|detail| !detail.is_empty())
    }
}

// =========================================================
// AI generation
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateCourseResponse {
    pub course_id: Id,
    pub title: String,
    pub modules_count: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateModuleContentResponse {
    pub message: String,
    pub module_id: Id,
    #[serde(default)]
    pub lessons_count: Option<u32>,
}

/// Returned by both document-driven generation and JSON import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRoadmapResponse {
    pub roadmap_id: Id,
    pub title: String,
    pub nodes_count: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateNodeContentResponse {
    pub message: String,
    pub node_id: Id,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLayoutResponse {
    pub message: String,
    pub roadmap_id: Id,
    pub nodes_updated: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRoadmapRequest {
    pub title: String,
    pub creator_id: Id,
    pub data: RoadmapImport,
}
