//! Merq shared domain model
//!
//! Shape contracts for everything exchanged with the REST backend:
//! - `user`: accounts and roles
//! - `course`: courses, modules, lessons, questions
//! - `roadmap`: roadmaps, nodes, prerequisite connections
//! - `analytics`: read-only attempt statistics
//! - `protocol`: auth, AI generation and error payloads

mod analytics;
mod course;
mod date;
mod protocol;
mod roadmap;
mod user;

pub use analytics::*;
pub use course::*;
pub use date::Timestamp;
pub use protocol::*;
pub use roadmap::*;
pub use user::*;

// =========================================================
// Identifiers
// =========================================================

/// Backend-assigned identifier. The client never synthesizes one.
pub type Id = i64;

/// Entities cached by the client stores are matched by their backend id.
pub trait Entity {
    fn id(&self) -> Id;
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                #[inline]
                fn id(&self) -> Id {
                    self.id
                }
            }
        )*
    };
}

impl_entity!(
    User,
    Course,
    Module,
    Lesson,
    Question,
    QuestionOption,
    Roadmap,
    RoadmapNode,
    NodeConnection,
    Attempt,
);
