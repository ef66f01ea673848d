//! Courses store: the teacher's course tree, one level at a time.

use super::{
    Store, SubscriptionId, push_unique, remove_by_id, replace_by_id, replace_current, upsert_at,
};
use crate::api::ApiClient;
use crate::error::ApiError;
use merq_shared::{
    Course, CourseCreate, CourseUpdate, Id, Lesson, LessonCreate, LessonUpdate, Module,
    ModuleCreate, ModuleUpdate, Question, QuestionCreate, QuestionUpdate,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursesState {
    /// The signed-in teacher's courses; new ones are prepended
    pub courses: Vec<Course>,
    pub current_course: Option<Course>,
    /// Modules of the last course whose modules were fetched
    pub modules: Vec<Module>,
    pub current_module: Option<Module>,
    /// Lessons of the last fetched module
    pub lessons: Vec<Lesson>,
    pub current_lesson: Option<Lesson>,
    /// Questions of the last fetched lesson
    pub questions: Vec<Question>,
    /// Opened with its answer options
    pub current_question: Option<Question>,
}

#[derive(Clone)]
pub struct CoursesStore {
    store: Store<CoursesState>,
    api: ApiClient,
}

impl CoursesStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            store: Store::default(),
            api,
        }
    }

    pub fn state(&self) -> CoursesState {
        self.store.snapshot()
    }

    pub fn with<R>(&self, f: impl FnOnce(&CoursesState) -> R) -> R {
        self.store.with(f)
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    // ---------------------------------------------------------
    // Courses
    // ---------------------------------------------------------

    /// Replaces the course list with the courses taught by `user_id`.
    pub async fn fetch_my_courses(&self, user_id: Id) {
        self.store
            .fetch(
                "fetch_my_courses",
                "Error al cargar cursos",
                self.api.courses().get_my_courses(user_id),
                |s, courses| s.courses = courses,
            )
            .await;
    }

    /// Loads one course into `current_course`.
    pub async fn fetch_course(&self, id: Id) {
        self.store
            .fetch(
                "fetch_course",
                "Error al cargar curso",
                self.api.courses().get_by_id(id),
                |s, course| s.current_course = Some(course),
            )
            .await;
    }

    /// New courses go to the front of the list.
    pub async fn create_course(
        &self,
        user_id: Id,
        data: &CourseCreate,
    ) -> Result<Course, ApiError> {
        self.store
            .run(
                "create_course",
                "Error al crear curso",
                self.api.courses().create(user_id, data),
                |s, course| upsert_at(&mut s.courses, 0, course),
            )
            .await
    }

    /// Patches the list entry and `current_course` with the server copy.
    pub async fn update_course(&self, id: Id, data: &CourseUpdate) -> Result<Course, ApiError> {
        self.store
            .run(
                "update_course",
                "Error al actualizar curso",
                self.api.courses().update(id, data),
                |s, course| apply_course(s, id, course),
            )
            .await
    }

    /// Publishes or unpublishes, then patches like [`Self::update_course`].
    pub async fn set_published(&self, id: Id, published: bool) -> Result<Course, ApiError> {
        let courses = self.api.courses();
        let request = async move {
            if published {
                courses.publish(id).await
            } else {
                courses.unpublish(id).await
            }
        };
        self.store
            .run(
                "set_published",
                "Error al actualizar curso",
                request,
                |s, course| apply_course(s, id, course),
            )
            .await
    }

    /// Child caches (`modules`, `lessons`, `questions`) are left as they are.
    pub async fn delete_course(&self, id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_course",
                "Error al eliminar curso",
                self.api.courses().delete(id),
                |s, _| remove_by_id(&mut s.courses, id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Modules
    // ---------------------------------------------------------

    /// Replaces `modules` with the modules of `course_id`.
    pub async fn fetch_modules(&self, course_id: Id) {
        self.store
            .fetch(
                "fetch_modules",
                "Error al cargar módulos",
                self.api.courses().get_modules(course_id),
                |s, modules| s.modules = modules,
            )
            .await;
    }

    pub async fn fetch_module(&self, course_id: Id, module_id: Id) {
        self.store
            .fetch(
                "fetch_module",
                "Error al cargar módulo",
                self.api.courses().get_module(course_id, module_id),
                |s, module| s.current_module = Some(module),
            )
            .await;
    }

    /// Appends to `modules`.
    pub async fn create_module(
        &self,
        course_id: Id,
        data: &ModuleCreate,
    ) -> Result<Module, ApiError> {
        self.store
            .run(
                "create_module",
                "Error al crear módulo",
                self.api.courses().create_module(course_id, data),
                |s, module| push_unique(&mut s.modules, module),
            )
            .await
    }

    pub async fn update_module(
        &self,
        course_id: Id,
        module_id: Id,
        data: &ModuleUpdate,
    ) -> Result<Module, ApiError> {
        self.store
            .run(
                "update_module",
                "Error al actualizar módulo",
                self.api.courses().update_module(course_id, module_id, data),
                |s, module| {
                    replace_by_id(&mut s.modules, module_id, module);
                    replace_current(&mut s.current_module, module_id, module);
                },
            )
            .await
    }

    /// Lessons of the module stay cached until the next `fetch_lessons`.
    pub async fn delete_module(&self, course_id: Id, module_id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_module",
                "Error al eliminar módulo",
                self.api.courses().delete_module(course_id, module_id),
                |s, _| remove_by_id(&mut s.modules, module_id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Lessons
    // ---------------------------------------------------------

    /// Replaces `lessons` with the lessons of `module_id`.
    pub async fn fetch_lessons(&self, module_id: Id) {
        self.store
            .fetch(
                "fetch_lessons",
                "Error al cargar lecciones",
                self.api.courses().get_lessons(module_id),
                |s, lessons| s.lessons = lessons,
            )
            .await;
    }

    pub async fn fetch_lesson(&self, module_id: Id, lesson_id: Id) {
        self.store
            .fetch(
                "fetch_lesson",
                "Error al cargar lección",
                self.api.courses().get_lesson(module_id, lesson_id),
                |s, lesson| s.current_lesson = Some(lesson),
            )
            .await;
    }

    pub async fn create_lesson(
        &self,
        module_id: Id,
        data: &LessonCreate,
    ) -> Result<Lesson, ApiError> {
        self.store
            .run(
                "create_lesson",
                "Error al crear lección",
                self.api.courses().create_lesson(module_id, data),
                |s, lesson| push_unique(&mut s.lessons, lesson),
            )
            .await
    }

    pub async fn update_lesson(
        &self,
        module_id: Id,
        lesson_id: Id,
        data: &LessonUpdate,
    ) -> Result<Lesson, ApiError> {
        self.store
            .run(
                "update_lesson",
                "Error al actualizar lección",
                self.api.courses().update_lesson(module_id, lesson_id, data),
                |s, lesson| {
                    replace_by_id(&mut s.lessons, lesson_id, lesson);
                    replace_current(&mut s.current_lesson, lesson_id, lesson);
                },
            )
            .await
    }

    pub async fn delete_lesson(&self, module_id: Id, lesson_id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_lesson",
                "Error al eliminar lección",
                self.api.courses().delete_lesson(module_id, lesson_id),
                |s, _| remove_by_id(&mut s.lessons, lesson_id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Questions
    // ---------------------------------------------------------

    /// Replaces `questions` with the questions of `lesson_id`.
    pub async fn fetch_questions(&self, lesson_id: Id) {
        self.store
            .fetch(
                "fetch_questions",
                "Error al cargar preguntas",
                self.api.courses().get_questions(lesson_id),
                |s, questions| s.questions = questions,
            )
            .await;
    }

    /// Loads one question with its answer options.
    pub async fn fetch_question(&self, lesson_id: Id, question_id: Id) {
        self.store
            .fetch(
                "fetch_question",
                "Error al cargar pregunta",
                self.api.courses().get_question(lesson_id, question_id),
                |s, question| s.current_question = Some(question),
            )
            .await;
    }

    pub async fn create_question(
        &self,
        lesson_id: Id,
        data: &QuestionCreate,
    ) -> Result<Question, ApiError> {
        self.store
            .run(
                "create_question",
                "Error al crear pregunta",
                self.api.courses().create_question(lesson_id, data),
                |s, question| push_unique(&mut s.questions, question),
            )
            .await
    }

    pub async fn update_question(
        &self,
        lesson_id: Id,
        question_id: Id,
        data: &QuestionUpdate,
    ) -> Result<Question, ApiError> {
        self.store
            .run(
                "update_question",
                "Error al actualizar pregunta",
                self.api
                    .courses()
                    .update_question(lesson_id, question_id, data),
                |s, question| {
                    replace_by_id(&mut s.questions, question_id, question);
                    replace_current(&mut s.current_question, question_id, question);
                },
            )
            .await
    }

    pub async fn delete_question(&self, lesson_id: Id, question_id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_question",
                "Error al eliminar pregunta",
                self.api.courses().delete_question(lesson_id, question_id),
                |s, _| remove_by_id(&mut s.questions, question_id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Navigation resets
    // ---------------------------------------------------------

    /// Leaving a course drops everything below it.
    pub fn clear_current(&self) {
        self.store.update(|s| {
            s.current_course = None;
            s.current_module = None;
            s.current_lesson = None;
            s.current_question = None;
            s.modules.clear();
            s.lessons.clear();
            s.questions.clear();
        });
    }

    pub fn clear_module(&self) {
        self.store.update(|s| {
            s.current_module = None;
            s.current_lesson = None;
            s.current_question = None;
            s.lessons.clear();
            s.questions.clear();
        });
    }

    pub fn clear_lesson(&self) {
        self.store.update(|s| {
            s.current_lesson = None;
            s.current_question = None;
            s.questions.clear();
        });
    }
}

fn apply_course(state: &mut CoursesState, id: Id, course: &Course) {
    replace_by_id(&mut state.courses, id, course);
    replace_current(&mut state.current_course, id, course);
}

#[cfg(test)]
mod tests;
