use super::*;
use crate::fixtures::*;
use crate::web::{FormPart, MockTransport, RequestBody, UploadFile};
use merq_shared::{LoginRequest, NodeUpdate, RoadmapImport, RoadmapUpdate};
use serde_json::json;

fn body_json(req: &HttpRequest) -> serde_json::Value {
    match &req.body {
        RequestBody::Json(text) => serde_json::from_str(text).unwrap(),
        other => panic!("expected a JSON body, got {other:?}"),
    }
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let api = ApiClient::new("http://api.test/", Rc::new(MockTransport::new()));
    assert_eq!(api.base_url(), "http://api.test");
    assert_eq!(api.url("/auth/me"), "http://api.test/auth/me");
    assert_eq!(api.url("auth/me"), "http://api.test/auth/me");
}

#[test]
fn test_bearer_header_follows_token_slot() {
    let (_, api) = setup_api();
    let anonymous = api.request(HttpMethod::Get, "/auth/me");
    assert_eq!(anonymous.header("Authorization"), None);

    api.set_token(Some("t1".into()));
    let clone = api.clone();
    let signed = clone.request(HttpMethod::Get, "/auth/me");
    assert_eq!(signed.header("authorization"), Some("Bearer t1"));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/auth/login"),
        200,
        json!({
            "access_token": "t1",
            "token_type": "bearer",
            "user": make_test_user(1, "alice", "teacher")
        }),
    );

    let credentials = LoginRequest {
        email: "a@x".into(),
        password: "p".into(),
    };
    let response = api.auth().login(&credentials).await.unwrap();
    assert_eq!(response.access_token, "t1");
    assert_eq!(response.user.username, "alice");

    let req = mock.last_request().unwrap();
    assert_eq!(body_json(&req), json!({"email": "a@x", "password": "p"}));
}

#[tokio::test]
async fn test_query_parameters_and_paths() {
    let (mock, api) = setup_api();
    mock.mock_response(HttpMethod::Get, &url("/roadmaps/?creator_id=7"), 200, json!([]));
    mock.mock_response(HttpMethod::Get, &url("/roadmaps/"), 200, json!([]));
    mock.mock_response(HttpMethod::Get, &url("/courses/?teacher_id=7"), 200, json!([]));
    mock.mock_response(HttpMethod::Get, &url("/roadmaps/3/connections"), 200, json!([]));

    assert!(api.roadmaps().get_all(Some(7)).await.unwrap().is_empty());
    assert!(api.roadmaps().get_all(None).await.unwrap().is_empty());
    assert!(api.courses().get_my_courses(7).await.unwrap().is_empty());
    assert!(api.roadmaps().get_connections(3).await.unwrap().is_empty());

    let urls: Vec<String> = mock.requests.borrow().iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            url("/roadmaps/?creator_id=7"),
            url("/roadmaps/"),
            url("/courses/?teacher_id=7"),
            url("/roadmaps/3/connections"),
        ]
    );
}

#[tokio::test]
async fn test_patch_sends_only_set_fields() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Patch,
        &url("/roadmaps/4"),
        200,
        make_test_roadmap(4, "Renamed", 1),
    );

    let patch = RoadmapUpdate {
        title: Some("Renamed".into()),
        ..Default::default()
    };
    let updated = api.roadmaps().update(4, &patch).await.unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(body_json(&mock.last_request().unwrap()), json!({"title": "Renamed"}));
}

#[tokio::test]
async fn test_toggle_node_complete_body() {
    let (mock, api) = setup_api();
    let mut node = make_test_node(9, 4, "Ownership");
    node["is_completed"] = json!(true);
    mock.mock_response(HttpMethod::Patch, &url("/roadmaps/4/nodes/9"), 200, node);

    let node = api.roadmaps().toggle_node_complete(4, 9, true).await.unwrap();
    assert!(node.is_completed);
    assert_eq!(
        body_json(&mock.last_request().unwrap()),
        serde_json::to_value(NodeUpdate::completed(true)).unwrap()
    );
}

#[tokio::test]
async fn test_create_connection_body() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/roadmaps/4/connections"),
        201,
        make_test_connection(5, 1, 2),
    );

    let connection = api.roadmaps().create_connection(4, 1, 2).await.unwrap();
    assert_eq!(connection.id, 5);
    assert_eq!(
        body_json(&mock.last_request().unwrap()),
        json!({"from_node_id": 1, "to_node_id": 2})
    );
}

#[tokio::test]
async fn test_delete_ignores_empty_body() {
    let (mock, api) = setup_api();
    mock.mock_response(HttpMethod::Delete, &url("/roadmaps/4"), 204, serde_json::Value::Null);
    api.roadmaps().delete(4).await.unwrap();
    assert_eq!(mock.request_count(), 1);
}

#[tokio::test]
async fn test_publish_has_no_body() {
    let (mock, api) = setup_api();
    let mut course = make_test_course(2, "Rust", 1);
    course["is_published"] = json!(true);
    mock.mock_response(HttpMethod::Post, &url("/courses/2/publish"), 200, course);

    let course = api.courses().publish(2).await.unwrap();
    assert!(course.is_published);
    assert_eq!(mock.last_request().unwrap().body, RequestBody::Empty);
}

#[tokio::test]
async fn test_generate_course_is_multipart_with_timeout() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/ai/generate-course"),
        200,
        json!({"course_id": 3, "title": "T", "modules_count": 4, "message": "ok"}),
    );

    let file = UploadFile::new("notes.pdf", "application/pdf", vec![1, 2, 3]);
    let response = api.ai().generate_course(file.clone(), "T", 7).await.unwrap();
    assert_eq!(response.modules_count, 4);

    let req = mock.last_request().unwrap();
    assert_eq!(req.timeout, Some(GENERATION_TIMEOUT));
    assert_eq!(
        req.body,
        RequestBody::Multipart(vec![
            FormPart::file("file", file),
            FormPart::text("title", "T"),
            FormPart::text("teacher_id", "7"),
        ])
    );
}

#[tokio::test]
async fn test_generate_roadmap_uses_creator_field() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/ai/generate-roadmap"),
        200,
        json!({"roadmap_id": 8, "title": "T", "nodes_count": 12, "message": "ok"}),
    );

    let file = UploadFile::new("notes.txt", "text/plain", b"intro".to_vec());
    api.ai().generate_roadmap(file, "T", 7).await.unwrap();

    let req = mock.last_request().unwrap();
    let RequestBody::Multipart(parts) = req.body else {
        panic!("expected multipart");
    };
    let names: Vec<&str> = parts.iter().map(FormPart::name).collect();
    assert_eq!(names, vec!["file", "title", "creator_id"]);
}

#[tokio::test]
async fn test_content_generation_sends_empty_object() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/ai/nodes/9/generate-content"),
        200,
        json!({"message": "ok", "node_id": 9}),
    );

    api.ai().generate_node_content(9).await.unwrap();
    let req = mock.last_request().unwrap();
    assert_eq!(body_json(&req), json!({}));
    assert_eq!(req.timeout, Some(GENERATION_TIMEOUT));
}

#[tokio::test]
async fn test_import_and_auto_layout_have_no_timeout() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/ai/import-roadmap"),
        200,
        json!({"roadmap_id": 8, "title": "T", "nodes_count": 0, "message": "ok"}),
    );
    mock.mock_response(
        HttpMethod::Post,
        &url("/ai/8/auto-layout"),
        200,
        json!({"message": "ok", "roadmap_id": 8, "nodes_updated": 0}),
    );

    let outline = RoadmapImport {
        description: None,
        nodes: Vec::new(),
    };
    api.ai().import_roadmap("T", 7, outline).await.unwrap();
    let import = mock.last_request().unwrap();
    assert_eq!(import.timeout, None);
    assert_eq!(
        body_json(&import),
        json!({"title": "T", "creator_id": 7, "data": {"nodes": []}})
    );

    api.ai().auto_layout(8).await.unwrap();
    assert_eq!(mock.last_request().unwrap().timeout, None);
}

#[tokio::test]
async fn test_error_detail_is_extracted() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Get,
        &url("/roadmaps/99"),
        404,
        detail("Roadmap not found"),
    );

    let err = api.roadmaps().get_by_id(99).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.detail(), Some("Roadmap not found"));
}

#[tokio::test]
async fn test_blank_error_detail_is_dropped() {
    let (mock, api) = setup_api();
    mock.mock_response(HttpMethod::Get, &url("/roadmaps/99"), 400, detail(""));

    let err = api.roadmaps().get_by_id(99).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.detail(), None);
    assert_eq!(err.message_or("Error al cargar roadmap"), "Error al cargar roadmap");
}

#[tokio::test]
async fn test_validation_error_has_no_detail() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Post,
        &url("/users/"),
        422,
        json!({"detail": [{"loc": ["body", "email"], "msg": "invalid"}]}),
    );

    let data = merq_shared::UserCreate {
        email: "bad".into(),
        username: "bob".into(),
        password: "p".into(),
        full_name: "Bob".into(),
        role: None,
    };
    let err = api.users().create(&data).await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.detail(), None);
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let (mock, api) = setup_api();
    mock.mock_response(HttpMethod::Get, &url("/auth/me"), 200, json!({"unexpected": true}));

    let err = api.auth().me().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_transport_error_passes_through() {
    let (mock, api) = setup_api();
    mock.mock_error(HttpMethod::Get, &url("/attempts/student/3/stats"), ApiError::Timeout);

    let err = api.attempts().student_stats(3).await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn test_attempt_statistics() {
    let (mock, api) = setup_api();
    mock.mock_response(
        HttpMethod::Get,
        &url("/attempts/question/5/stats"),
        200,
        json!({"total_attempts": 4, "correct_attempts": 3, "success_rate": 0.75}),
    );

    let stats = api.attempts().question_stats(5).await.unwrap();
    assert_eq!(stats.correct_attempts, 3);
}
