//! Backend payloads and wiring shared by the test suites.

use crate::api::ApiClient;
use crate::web::MockTransport;
use merq_shared::Id;
use serde_json::{Value, json};
use std::rc::Rc;

pub const BASE: &str = "http://api.test";

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn setup_api() -> (Rc<MockTransport>, ApiClient) {
    let mock = Rc::new(MockTransport::new());
    let api = ApiClient::new(BASE, mock.clone());
    (mock, api)
}

pub fn make_test_user(id: Id, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{username}@merq.test"),
        "username": username,
        "full_name": username.to_uppercase(),
        "role": role,
        "is_active": true,
        "created_at": "2025-01-10T09:30:00"
    })
}

pub fn make_test_course(id: Id, title: &str, teacher_id: Id) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "is_published": false,
        "teacher_id": teacher_id,
        "created_at": "2025-01-10T09:30:00Z"
    })
}

pub fn make_test_module(id: Id, course_id: Id, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "position": id,
        "course_id": course_id,
        "created_at": "2025-01-10T09:30:00Z"
    })
}

pub fn make_test_lesson(id: Id, module_id: Id, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "",
        "position": 1,
        "module_id": module_id
    })
}

pub fn make_test_question(id: Id, lesson_id: Id, text: &str) -> Value {
    json!({
        "id": id,
        "text": text,
        "question_type": "multiple_choice",
        "difficulty": "medium",
        "lesson_id": lesson_id
    })
}

pub fn make_test_roadmap(id: Id, title: &str, creator_id: Id) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "creator_id": creator_id
    })
}

pub fn make_test_node(id: Id, roadmap_id: Id, title: &str) -> Value {
    json!({
        "id": id,
        "roadmap_id": roadmap_id,
        "title": title,
        "level": "beginner",
        "position_x": 0,
        "position_y": 0,
        "order_index": 0,
        "is_completed": false
    })
}

pub fn make_test_connection(id: Id, from: Id, to: Id) -> Value {
    json!({ "id": id, "from_node_id": from, "to_node_id": to })
}

pub fn detail(message: &str) -> Value {
    json!({ "detail": message })
}
