//! Todo API integration tests
//!
//! CRUD, partial updates, listing with pagination, search and tag filters.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use todoboard::backend::error::types::TODO_NOT_FOUND;
use todoboard::shared::todo::{
    COMPLETED_NOT_BOOLEAN, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, TITLE_EMPTY_OR_UNDEFINED,
    TITLE_REQUIRED,
};
use todoboard::shared::{DeletedTodo, Todo, TodoPage};
use uuid::Uuid;

use crate::common::{register_unique_user, TestApp, TestUser, WithToken};

async fn create(app: &TestApp, user: &TestUser, payload: serde_json::Value) -> Todo {
    let response = app
        .server
        .post("/api/todos")
        .with_token(&user.token)
        .json(&payload)
        .await;
    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "create failed: {}",
        response.text()
    );
    response.json()
}

async fn list(app: &TestApp, user: &TestUser, query: &[(&str, &str)]) -> TodoPage {
    let mut request = app.server.get("/api/todos").with_token(&user.token);
    for (key, value) in query {
        request = request.add_query_param(key, value);
    }
    let response = request.await;
    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    response.json()
}

#[tokio::test]
async fn test_create_todo_defaults() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let todo = create(&app, &user, json!({ "title": "  Buy milk  " })).await;

    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, None);
    assert!(!todo.completed);
    assert!(todo.tags.is_empty());
    assert_eq!(todo.image_path, None);
    assert_eq!(todo.file_path, None);
    assert_eq!(todo.user, user.id);
    assert_eq!(todo.created_at, todo.updated_at);
}

#[tokio::test]
async fn test_create_todo_full() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let todo = create(
        &app,
        &user,
        json!({
            "title": "Report",
            "description": "Quarterly numbers",
            "completed": "true",
            "tags": [" work ", "", "urgent", "work"]
        }),
    )
    .await;

    assert_eq!(todo.description.as_deref(), Some("Quarterly numbers"));
    assert!(todo.completed);
    assert_eq!(todo.tags, vec!["work".to_string(), "urgent".to_string()]);
}

#[tokio::test]
async fn test_create_todo_wire_format() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/todos")
        .with_token(&user.token)
        .json(&json!({ "title": "Shape", "tags": "solo" }))
        .await;

    let body: serde_json::Value = response.json();
    for key in ["id", "title", "completed", "tags", "imagePath", "filePath", "user", "createdAt", "updatedAt"] {
        assert!(body.get(key).is_some(), "missing {key} in {body}");
    }
    assert_eq!(body["tags"], json!(["solo"]));
}

#[tokio::test]
async fn test_create_todo_title_rules() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let cases = [
        (json!({}), TITLE_REQUIRED),
        (json!({ "title": "" }), TITLE_REQUIRED),
        (json!({ "title": "   " }), TITLE_EMPTY_OR_UNDEFINED),
        (json!({ "title": "undefined" }), TITLE_EMPTY_OR_UNDEFINED),
        (json!({ "title": " undefined " }), TITLE_EMPTY_OR_UNDEFINED),
    ];

    for (payload, message) in cases {
        let response = app
            .server
            .post("/api/todos")
            .with_token(&user.token)
            .json(&payload)
            .await;
        assert_error_response!(response, StatusCode::BAD_REQUEST, message);
    }

    assert_eq!(list(&app, &user, &[]).await.pagination.total_count, 0);
}

#[tokio::test]
async fn test_create_todo_bad_completed() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/todos")
        .with_token(&user.token)
        .json(&json!({ "title": "A", "completed": "maybe" }))
        .await;

    assert_error_response!(response, StatusCode::BAD_REQUEST, COMPLETED_NOT_BOOLEAN);
}

#[tokio::test]
async fn test_get_todo() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let todo = create(&app, &user, json!({ "title": "Find me" })).await;

    let response = app
        .server
        .get(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Todo>(), todo);
}

#[tokio::test]
async fn test_get_missing_todo() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let response = app
            .server
            .get(&format!("/api/todos/{id}"))
            .with_token(&user.token)
            .await;
        assert_error_response!(response, StatusCode::NOT_FOUND, TODO_NOT_FOUND);
    }
}

#[tokio::test]
async fn test_update_is_partial() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let todo = create(
        &app,
        &user,
        json!({ "title": "Original", "description": "Keep me", "tags": ["a", "b"] }),
    )
    .await;

    let response = app
        .server
        .put(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .json(&json!({ "completed": true }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK, "{}", response.text());
    let updated: Todo = response.json();
    assert!(updated.completed);
    assert_eq!(updated.title, "Original");
    assert_eq!(updated.description.as_deref(), Some("Keep me"));
    assert_eq!(updated.tags, todo.tags);
    assert_eq!(updated.created_at, todo.created_at);
    assert!(updated.updated_at >= todo.updated_at);
}

#[tokio::test]
async fn test_update_clears_tags_and_description() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let todo = create(
        &app,
        &user,
        json!({ "title": "Tagged", "description": "Something", "tags": ["a"] }),
    )
    .await;

    let response = app
        .server
        .put(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .json(&json!({ "title": "Renamed", "description": "", "tags": [] }))
        .await;

    let updated: Todo = response.json();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, None);
    assert!(updated.tags.is_empty());
}

#[tokio::test]
async fn test_update_rejects_bad_title() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let todo = create(&app, &user, json!({ "title": "Keep" })).await;

    let response = app
        .server
        .put(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .json(&json!({ "title": "undefined" }))
        .await;
    assert_error_response!(response, StatusCode::BAD_REQUEST, TITLE_EMPTY_OR_UNDEFINED);

    let response = app
        .server
        .get(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .await;
    assert_eq!(response.json::<Todo>().title, "Keep");
}

#[tokio::test]
async fn test_update_missing_todo() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .put(&format!("/api/todos/{}", Uuid::new_v4()))
        .with_token(&user.token)
        .json(&json!({ "title": "Nope" }))
        .await;

    assert_error_response!(response, StatusCode::NOT_FOUND, TODO_NOT_FOUND);
}

#[tokio::test]
async fn test_delete_todo() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let todo = create(&app, &user, json!({ "title": "Temporary" })).await;

    let response = app
        .server
        .delete(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<DeletedTodo>().id, todo.id);

    let response = app
        .server
        .get(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .await;
    assert_error_response!(response, StatusCode::NOT_FOUND, TODO_NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/api/todos/{}", todo.id))
        .with_token(&user.token)
        .await;
    assert_error_response!(response, StatusCode::NOT_FOUND, TODO_NOT_FOUND);
}

#[tokio::test]
async fn test_list_pagination() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    for n in 1..=12 {
        create(&app, &user, json!({ "title": format!("Todo {n}") })).await;
    }

    let first = list(&app, &user, &[]).await;
    assert_eq!(first.todos.len(), DEFAULT_PAGE_SIZE as usize);
    assert_eq!(first.pagination.page, 1);
    assert_eq!(first.pagination.limit, DEFAULT_PAGE_SIZE);
    assert_eq!(first.pagination.total_count, 12);
    assert_eq!(first.pagination.total_pages, 2);
    // Newest first
    assert_eq!(first.todos[0].title, "Todo 12");

    let second = list(&app, &user, &[("page", "2")]).await;
    assert_eq!(second.todos.len(), 2);
    assert_eq!(second.todos[1].title, "Todo 1");

    let beyond = list(&app, &user, &[("page", "5")]).await;
    assert!(beyond.todos.is_empty());
    assert_eq!(beyond.pagination.page, 5);
    assert_eq!(beyond.pagination.total_count, 12);

    let small = list(&app, &user, &[("page", "3"), ("limit", "5")]).await;
    assert_eq!(small.todos.len(), 2);
    assert_eq!(small.pagination.total_pages, 3);
}

#[tokio::test]
async fn test_list_lenient_query() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    create(&app, &user, json!({ "title": "Only" })).await;

    let page = list(&app, &user, &[("page", "abc"), ("limit", "0")]).await;
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, DEFAULT_PAGE_SIZE);

    let page = list(&app, &user, &[("limit", "5000")]).await;
    assert_eq!(page.pagination.limit, MAX_PAGE_SIZE);
}

#[tokio::test]
async fn test_list_empty() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let page = list(&app, &user, &[]).await;

    assert!(page.todos.is_empty());
    assert_eq!(page.pagination.total_count, 0);
    assert_eq!(page.pagination.total_pages, 0);
}

#[tokio::test]
async fn test_list_search() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    create(&app, &user, json!({ "title": "Buy MILK" })).await;
    create(&app, &user, json!({ "title": "Groceries", "description": "eggs and milk" })).await;
    create(&app, &user, json!({ "title": "100% done" })).await;
    create(&app, &user, json!({ "title": "Walk dog" })).await;
    create(&app, &user, json!({ "title": "Über Termin", "description": "im CAFÉ" })).await;

    let page = list(&app, &user, &[("search", "milk")]).await;
    assert_eq!(page.pagination.total_count, 2);

    // Case folding covers non-ASCII letters
    for term in ["über", "ÜBER", "café"] {
        let page = list(&app, &user, &[("search", term)]).await;
        assert_eq!(page.pagination.total_count, 1, "{term}");
        assert_eq!(page.todos[0].title, "Über Termin");
    }

    // LIKE wildcards in the term match literally
    let page = list(&app, &user, &[("search", "%")]).await;
    assert_eq!(page.pagination.total_count, 1);
    assert_eq!(page.todos[0].title, "100% done");

    let page = list(&app, &user, &[("search", "   ")]).await;
    assert_eq!(page.pagination.total_count, 5);
}

#[tokio::test]
async fn test_list_tag_filter() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    create(&app, &user, json!({ "title": "A", "tags": ["work", "urgent"] })).await;
    create(&app, &user, json!({ "title": "B", "tags": ["home"] })).await;
    create(&app, &user, json!({ "title": "C", "tags": ["workshop"] })).await;

    let page = list(&app, &user, &[("tag", "work")]).await;
    assert_eq!(page.pagination.total_count, 1);
    assert_eq!(page.todos[0].title, "A");

    let page = list(&app, &user, &[("tag", "work"), ("search", "b")]).await;
    assert_eq!(page.pagination.total_count, 0);
}

#[tokio::test]
async fn test_todo_routes_require_token() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let responses = [
        app.server.get("/api/todos").await,
        app.server.post("/api/todos").json(&json!({ "title": "x" })).await,
        app.server.get(&format!("/api/todos/{id}")).await,
        app.server.put(&format!("/api/todos/{id}")).json(&json!({})).await,
        app.server.delete(&format!("/api/todos/{id}")).await,
    ];

    for response in responses {
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
