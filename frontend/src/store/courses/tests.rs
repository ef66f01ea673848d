use super::*;
use crate::fixtures::*;
use crate::web::MockTransport;
use merq_shared::{Difficulty, HttpMethod, OptionCreate, QuestionType};
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

fn setup_env() -> (Rc<MockTransport>, CoursesStore) {
    let (mock, api) = setup_api();
    (mock, CoursesStore::new(api))
}

#[tokio::test]
async fn test_fetch_my_courses_replaces_list() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(1, "Rust", 1), make_test_course(2, "SQL", 1)]),
    );

    store.fetch_my_courses(1).await;
    let titles: Vec<String> = store.with(|s| s.courses.iter().map(|c| c.title.clone()).collect());
    assert_eq!(titles, vec!["Rust", "SQL"]);
    assert_eq!(store.error(), None);
    assert!(!store.loading());
}

#[tokio::test]
async fn test_failed_fetch_keeps_cache() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(1, "Rust", 1)]),
    );
    store.fetch_my_courses(1).await;

    mock.mock_response(HttpMethod::Get, &url("/courses/?teacher_id=1"), 500, json!({}));
    store.fetch_my_courses(1).await;

    assert_eq!(store.with(|s| s.courses.len()), 1);
    assert_eq!(store.error().as_deref(), Some("Error al cargar cursos"));
    assert!(!store.loading());
}

#[tokio::test]
async fn test_fetch_clears_previous_error() {
    let (mock, store) = setup_env();
    store.fetch_course(5).await;
    assert_eq!(store.error().as_deref(), Some("Not Found"));

    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/5"),
        200,
        make_test_course(5, "Go", 1),
    );
    store.fetch_course(5).await;
    assert_eq!(store.error(), None);
    assert_eq!(store.with(|s| s.current_course.as_ref().map(|c| c.id)), Some(5));
}

#[tokio::test]
async fn test_create_course_prepends_once() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(1, "Rust", 1)]),
    );
    mock.mock_response(
        HttpMethod::Post,
        &url("/courses/?teacher_id=1"),
        201,
        make_test_course(2, "SQL", 1),
    );
    store.fetch_my_courses(1).await;

    let data = CourseCreate {
        title: "SQL".into(),
        description: None,
    };
    let created = store.create_course(1, &data).await.unwrap();
    assert_eq!(created.id, 2);
    // a repeated create response must not duplicate the entry
    store.create_course(1, &data).await.unwrap();

    let ids: Vec<Id> = store.with(|s| s.courses.iter().map(|c| c.id).collect());
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_write_failures_reset_loading() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(1, "Rust", 1)]),
    );
    mock.mock_response(HttpMethod::Post, &url("/courses/?teacher_id=1"), 500, json!({}));
    mock.mock_error(HttpMethod::Delete, &url("/courses/1"), ApiError::Timeout);
    store.fetch_my_courses(1).await;

    let data = CourseCreate {
        title: "SQL".into(),
        description: None,
    };
    assert!(store.create_course(1, &data).await.is_err());
    assert_eq!(store.error().as_deref(), Some("Error al crear curso"));
    assert!(!store.loading());

    assert_eq!(store.delete_course(1).await.unwrap_err(), ApiError::Timeout);
    assert_eq!(store.error().as_deref(), Some("Error al eliminar curso"));
    assert!(!store.loading());
    assert_eq!(store.with(|s| s.courses.len()), 1);
}

#[tokio::test]
async fn test_set_published_patches_list_and_current() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(3, "Rust", 1)]),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/3"),
        200,
        make_test_course(3, "Rust", 1),
    );
    let mut published = make_test_course(3, "Rust", 1);
    published["is_published"] = json!(true);
    mock.mock_response(HttpMethod::Post, &url("/courses/3/publish"), 200, published);

    store.fetch_my_courses(1).await;
    store.fetch_course(3).await;
    store.set_published(3, true).await.unwrap();

    store.with(|s| {
        assert!(s.courses[0].is_published);
        assert!(s.current_course.as_ref().is_some_and(|c| c.is_published));
    });
}

#[tokio::test]
async fn test_update_module_failure_returns_detail() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Patch,
        &url("/courses/1/modules/2"),
        403,
        detail("Not allowed"),
    );

    let patch = ModuleUpdate {
        title: Some("Intro".into()),
        ..Default::default()
    };
    let err = store.update_module(1, 2, &patch).await.unwrap_err();
    assert_eq!(err.detail(), Some("Not allowed"));
    assert_eq!(store.error().as_deref(), Some("Not allowed"));
    assert!(!store.loading());
}

#[tokio::test]
async fn test_module_lifecycle() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/1/modules/"),
        200,
        json!([make_test_module(1, 1, "Basics")]),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/1/modules/1"),
        200,
        make_test_module(1, 1, "Basics"),
    );
    mock.mock_response(
        HttpMethod::Post,
        &url("/courses/1/modules/"),
        201,
        make_test_module(2, 1, "Traits"),
    );
    mock.mock_response(
        HttpMethod::Patch,
        &url("/courses/1/modules/1"),
        200,
        make_test_module(1, 1, "Fundamentals"),
    );
    mock.mock_response(
        HttpMethod::Delete,
        &url("/courses/1/modules/2"),
        204,
        serde_json::Value::Null,
    );

    store.fetch_modules(1).await;
    store.fetch_module(1, 1).await;

    let data = ModuleCreate {
        title: "Traits".into(),
        description: None,
    };
    store.create_module(1, &data).await.unwrap();
    assert_eq!(store.with(|s| s.modules.len()), 2);

    let patch = ModuleUpdate {
        title: Some("Fundamentals".into()),
        ..Default::default()
    };
    store.update_module(1, 1, &patch).await.unwrap();
    store.with(|s| {
        assert_eq!(s.modules[0].title, "Fundamentals");
        assert_eq!(
            s.current_module.as_ref().map(|m| m.title.as_str()),
            Some("Fundamentals")
        );
    });

    store.delete_module(1, 2).await.unwrap();
    let ids: Vec<Id> = store.with(|s| s.modules.iter().map(|m| m.id).collect());
    assert_eq!(ids, vec![1]);
}

#[tokio::test]
async fn test_delete_course_does_not_cascade() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/?teacher_id=1"),
        200,
        json!([make_test_course(1, "Rust", 1)]),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/courses/1/modules/"),
        200,
        json!([make_test_module(1, 1, "Basics")]),
    );
    mock.mock_response(HttpMethod::Delete, &url("/courses/1"), 204, serde_json::Value::Null);

    store.fetch_my_courses(1).await;
    store.fetch_modules(1).await;
    store.delete_course(1).await.unwrap();

    store.with(|s| {
        assert!(s.courses.is_empty());
        assert_eq!(s.modules.len(), 1);
    });
}

#[tokio::test]
async fn test_lessons_and_questions() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/modules/1/lessons/"),
        200,
        json!([make_test_lesson(1, 1, "Borrowing")]),
    );
    mock.mock_response(
        HttpMethod::Post,
        &url("/modules/1/lessons/"),
        201,
        make_test_lesson(2, 1, "Lifetimes"),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/lessons/2/questions/"),
        200,
        json!([make_test_question(1, 2, "What is 'a?")]),
    );
    let mut with_options = make_test_question(1, 2, "What is 'a?");
    with_options["options"] = json!([{"id": 1, "text": "A lifetime", "is_correct": true}]);
    mock.mock_response(HttpMethod::Get, &url("/lessons/2/questions/1"), 200, with_options);
    mock.mock_response(
        HttpMethod::Post,
        &url("/lessons/2/questions/"),
        201,
        make_test_question(2, 2, "Can 'static be borrowed?"),
    );

    store.fetch_lessons(1).await;
    let data = LessonCreate {
        title: "Lifetimes".into(),
        content: None,
    };
    store.create_lesson(1, &data).await.unwrap();
    assert_eq!(store.with(|s| s.lessons.len()), 2);

    store.fetch_questions(2).await;
    store.fetch_question(2, 1).await;
    assert_eq!(
        store.with(|s| s.current_question.as_ref().map(|q| q.options.len())),
        Some(1)
    );

    let question = QuestionCreate {
        text: "Can 'static be borrowed?".into(),
        question_type: QuestionType::TrueFalse,
        difficulty: Difficulty::Easy,
        options: Some(vec![OptionCreate {
            text: "Yes".into(),
            is_correct: true,
        }]),
    };
    store.create_question(2, &question).await.unwrap();
    assert_eq!(store.with(|s| s.questions.len()), 2);
}

#[tokio::test]
async fn test_clear_resets_children() {
    let (mock, store) = setup_env();
    mock.mock_response(
        HttpMethod::Get,
        &url("/modules/1/lessons/"),
        200,
        json!([make_test_lesson(1, 1, "Borrowing")]),
    );
    mock.mock_response(
        HttpMethod::Get,
        &url("/lessons/1/questions/"),
        200,
        json!([make_test_question(1, 1, "Why?")]),
    );
    store.fetch_lessons(1).await;
    store.fetch_questions(1).await;

    store.clear_lesson();
    store.with(|s| {
        assert!(s.questions.is_empty());
        assert_eq!(s.lessons.len(), 1);
    });

    store.clear_module();
    assert!(store.with(|s| s.lessons.is_empty()));

    store.clear_current();
    assert_eq!(store.state(), CoursesState::default());
}

#[tokio::test]
async fn test_loading_set_while_request_in_flight() {
    let (mock, store) = setup_env();
    let seen = Rc::new(Cell::new(false));
    let observed = Rc::clone(&seen);
    let probe = store.clone();
    mock.on_send(move || observed.set(probe.loading()));

    store.fetch_lessons(4).await;
    assert!(seen.get());
    assert!(!store.loading());
}
