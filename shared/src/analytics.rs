//! Read-only learning analytics. The client never mutates these.

use crate::{Id, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: Id,
    pub student_id: Id,
    pub question_id: Id,
    #[serde(default)]
    pub selected_option_id: Option<Id>,
    #[serde(default)]
    pub answer_text: Option<String>,
    pub is_correct: bool,
    #[serde(default)]
    pub response_time_seconds: Option<f64>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentStats {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub accuracy_rate: f64,
    #[serde(default)]
    pub average_response_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub success_rate: f64,
}
