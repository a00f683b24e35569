use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use clusterdash_api::{ApiError, CreateProjectRequest, HttpProjectApi, Project, ProjectApi};
use serde_json::{json, Value};

#[derive(Clone, Default)]
struct Recorded {
    auth_headers: Arc<Mutex<Vec<String>>>,
}

async fn create_project(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(request): Json<CreateProjectRequest>,
) -> Result<Json<Project>, (StatusCode, String)> {
    if let Some(auth) = headers.get("authorization") {
        recorded
            .auth_headers
            .lock()
            .unwrap()
            .push(auth.to_str().unwrap().to_string());
    }
    if request.name == "taken" {
        return Err((StatusCode::CONFLICT, "project already exists".to_string()));
    }
    Ok(Json(Project::new(42, request.name)))
}

async fn list_projects(Path(user_id): Path<i64>) -> Json<Value> {
    match user_id {
        1 => Json(json!({ "data": [{ "id": 1, "name": "abc123" }, { "id": 2, "name": "other" }] })),
        2 => Json(json!([{ "id": 5, "name": "bare" }])),
        _ => Json(json!({ "data": null })),
    }
}

async fn spawn_stub() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route("/api/projects", post(create_project))
        .route("/api/users/:id/projects", get(list_projects))
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    (addr, recorded)
}

#[tokio::test]
async fn create_project_sends_bearer_token() {
    let (addr, recorded) = spawn_stub().await;
    let api = HttpProjectApi::new(&format!("http://{}", addr), Some("secret".into())).unwrap();

    let project = api.create_project("abc123").await.unwrap();

    assert_eq!(project, Project::new(42, "abc123"));
    assert_eq!(
        recorded.auth_headers.lock().unwrap().as_slice(),
        ["Bearer secret".to_string()]
    );
}

#[tokio::test]
async fn create_project_maps_error_status() {
    let (addr, _) = spawn_stub().await;
    let api = HttpProjectApi::new(&format!("http://{}", addr), None).unwrap();

    let err = api.create_project("taken").await.unwrap_err();

    match err {
        ApiError::Status { status, ref body } => {
            assert_eq!(status, 409);
            assert_eq!(body, "project already exists");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    assert_eq!(err.status_code(), Some(409));
}

#[tokio::test]
async fn get_projects_accepts_both_response_shapes() {
    let (addr, _) = spawn_stub().await;
    let api = HttpProjectApi::new(&format!("http://{}", addr), None).unwrap();

    let wrapped = api.get_projects(1).await.unwrap();
    assert_eq!(
        wrapped.data,
        Some(vec![Project::new(1, "abc123"), Project::new(2, "other")])
    );

    let bare = api.get_projects(2).await.unwrap();
    assert_eq!(bare.data, Some(vec![Project::new(5, "bare")]));

    let missing = api.get_projects(3).await.unwrap();
    assert_eq!(missing.data, None);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpProjectApi::new(&format!("http://{}", addr), None).unwrap();
    let err = api.get_projects(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
