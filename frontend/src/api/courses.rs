use super::ApiClient;
use crate::error::ApiError;
use merq_shared::{
    Course, CourseCreate, CourseUpdate, HttpMethod, Id, Lesson, LessonCreate, LessonUpdate, Module,
    ModuleCreate, ModuleUpdate, Question, QuestionCreate, QuestionUpdate,
};

/// Courses and their nested modules, lessons and questions.
#[derive(Clone, Copy)]
pub struct CoursesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CoursesApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // ---------------------------------------------------------
    // Courses
    // ---------------------------------------------------------

    /// Every course visible to the caller, published or not.
    pub async fn get_all(self) -> Result<Vec<Course>, ApiError> {
        self.client.get("/courses/").await
    }

    /// Courses taught by `user_id`.
    pub async fn get_my_courses(self, user_id: Id) -> Result<Vec<Course>, ApiError> {
        self.client
            .get(&format!("/courses/?teacher_id={user_id}"))
            .await
    }

    pub async fn get_by_id(self, id: Id) -> Result<Course, ApiError> {
        self.client.get(&format!("/courses/{id}")).await
    }

    /// Creates a course owned by `user_id`. The server starts it unpublished.
    pub async fn create(self, user_id: Id, data: &CourseCreate) -> Result<Course, ApiError> {
        self.client
            .post(&format!("/courses/?teacher_id={user_id}"), data)
            .await
    }

    /// Partial update: only the set fields are sent.
    pub async fn update(self, id: Id, data: &CourseUpdate) -> Result<Course, ApiError> {
        self.client.patch(&format!("/courses/{id}"), data).await
    }

    /// Removes the course. The server drops its modules along with it.
    pub async fn delete(self, id: Id) -> Result<(), ApiError> {
        self.client.delete(&format!("/courses/{id}")).await
    }

    /// Makes the course visible to students. The route takes no body.
    pub async fn publish(self, id: Id) -> Result<Course, ApiError> {
        let req = self
            .client
            .request(HttpMethod::Post, &format!("/courses/{id}/publish"));
        self.client.execute(req).await
    }

    /// Hides the course again.
    pub async fn unpublish(self, id: Id) -> Result<Course, ApiError> {
        let req = self
            .client
            .request(HttpMethod::Post, &format!("/courses/{id}/unpublish"));
        self.client.execute(req).await
    }

    // ---------------------------------------------------------
    // Modules
    // ---------------------------------------------------------

    /// Modules of a course, in `position` order.
    pub async fn get_modules(self, course_id: Id) -> Result<Vec<Module>, ApiError> {
        self.client
            .get(&format!("/courses/{course_id}/modules/"))
            .await
    }

    pub async fn get_module(self, course_id: Id, module_id: Id) -> Result<Module, ApiError> {
        self.client
            .get(&format!("/courses/{course_id}/modules/{module_id}"))
            .await
    }

    /// Appends a module; the server assigns its `position`.
    pub async fn create_module(
        self,
        course_id: Id,
        data: &ModuleCreate,
    ) -> Result<Module, ApiError> {
        self.client
            .post(&format!("/courses/{course_id}/modules/"), data)
            .await
    }

    pub async fn update_module(
        self,
        course_id: Id,
        module_id: Id,
        data: &ModuleUpdate,
    ) -> Result<Module, ApiError> {
        self.client
            .patch(&format!("/courses/{course_id}/modules/{module_id}"), data)
            .await
    }

    pub async fn delete_module(self, course_id: Id, module_id: Id) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/courses/{course_id}/modules/{module_id}"))
            .await
    }

    // ---------------------------------------------------------
    // Lessons
    // ---------------------------------------------------------

    /// Lessons of a module, in `position` order.
    pub async fn get_lessons(self, module_id: Id) -> Result<Vec<Lesson>, ApiError> {
        self.client
            .get(&format!("/modules/{module_id}/lessons/"))
            .await
    }

    pub async fn get_lesson(self, module_id: Id, lesson_id: Id) -> Result<Lesson, ApiError> {
        self.client
            .get(&format!("/modules/{module_id}/lessons/{lesson_id}"))
            .await
    }

    pub async fn create_lesson(
        self,
        module_id: Id,
        data: &LessonCreate,
    ) -> Result<Lesson, ApiError> {
        self.client
            .post(&format!("/modules/{module_id}/lessons/"), data)
            .await
    }

    /// `position` in the patch reorders the lesson within its module.
    pub async fn update_lesson(
        self,
        module_id: Id,
        lesson_id: Id,
        data: &LessonUpdate,
    ) -> Result<Lesson, ApiError> {
        self.client
            .patch(&format!("/modules/{module_id}/lessons/{lesson_id}"), data)
            .await
    }

    pub async fn delete_lesson(self, module_id: Id, lesson_id: Id) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/modules/{module_id}/lessons/{lesson_id}"))
            .await
    }

    // ---------------------------------------------------------
    // Questions
    // ---------------------------------------------------------

    /// Questions attached to a lesson.
    pub async fn get_questions(self, lesson_id: Id) -> Result<Vec<Question>, ApiError> {
        self.client
            .get(&format!("/lessons/{lesson_id}/questions/"))
            .await
    }

    /// Includes the answer options.
    pub async fn get_question(self, lesson_id: Id, question_id: Id) -> Result<Question, ApiError> {
        self.client
            .get(&format!("/lessons/{lesson_id}/questions/{question_id}"))
            .await
    }

    /// Options are created together with the question.
    pub async fn create_question(
        self,
        lesson_id: Id,
        data: &QuestionCreate,
    ) -> Result<Question, ApiError> {
        self.client
            .post(&format!("/lessons/{lesson_id}/questions/"), data)
            .await
    }

    /// Only the question itself; options have their own server routes.
    pub async fn update_question(
        self,
        lesson_id: Id,
        question_id: Id,
        data: &QuestionUpdate,
    ) -> Result<Question, ApiError> {
        self.client
            .patch(&format!("/lessons/{lesson_id}/questions/{question_id}"), data)
            .await
    }

    pub async fn delete_question(self, lesson_id: Id, question_id: Id) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/lessons/{lesson_id}/questions/{question_id}"))
            .await
    }
}
