use super::ApiClient;
use crate::error::ApiError;
use merq_shared::{Attempt, Id, QuestionStats, StudentStats};

/// Read-only answer history and statistics.
#[derive(Clone, Copy)]
pub struct AttemptsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AttemptsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Every answer a student has submitted, newest first.
    pub async fn by_student(self, student_id: Id) -> Result<Vec<Attempt>, ApiError> {
        self.client
            .get(&format!("/attempts/student/{student_id}"))
            .await
    }

    /// Aggregates over [`Self::by_student`].
    pub async fn student_stats(self, student_id: Id) -> Result<StudentStats, ApiError> {
        self.client
            .get(&format!("/attempts/student/{student_id}/stats"))
            .await
    }

    pub async fn question_stats(self, question_id: Id) -> Result<QuestionStats, ApiError> {
        self.client
            .get(&format!("/attempts/question/{question_id}/stats"))
            .await
    }
}
