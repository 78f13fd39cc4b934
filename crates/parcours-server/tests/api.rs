use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app(dir: &TempDir) -> axum::Router {
    parcours_core::workspace::init_project(dir.path(), "test").unwrap();
    parcours_server::build_router(dir.path().to_path_buf())
}

#[tokio::test]
async fn create_then_fetch_case() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/cases/dupont-jean")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "draft");
    assert_eq!(json["timeline"]["kind"], "in_progress");
}

#[tokio::test]
async fn unknown_case_is_404() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/cases/nobody")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_case_is_409() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);
    let body = r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#;

    let first = app
        .clone()
        .oneshot(json_request("POST", "/api/cases", body))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(json_request("POST", "/api/cases", body))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn next_reflects_role_and_status() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/cases/dupont-jean/next?role=marcel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["actions"]["primary"]["id"], "submit_to_medical");
    assert_eq!(json["actions"]["future_steps"].as_array().unwrap().len(), 3);

    // The physician has nothing to do on a draft case.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/cases/dupont-jean/next?role=gilles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["actions"].get("primary").is_none());
}

#[tokio::test]
async fn transition_endpoint_drives_the_workflow() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/actions",
            r#"{"role":"marcel","action":"submit_to_medical"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["from"], "draft");
    assert_eq!(json["to"], "medical_review");

    // The physician approves with two surgeons from the roster.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/actions",
            r#"{"role":"gilles","action":"approve_medical","surgeons":["Doan Co-Minh","Simon Teyssedou"],"message":"Bon candidat"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["to"], "commercial_in_progress");

    // The submission notified the physician.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/notifications?role=gilles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unavailable_action_is_422() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();

    // Approving a case that was never submitted is refused.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/actions",
            r#"{"role":"gilles","action":"approve_medical","surgeons":["Doan Co-Minh"]}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_required_input_is_400() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/actions",
            r#"{"role":"marcel","action":"submit_to_medical"}"#,
        ))
        .await
        .unwrap();

    // Rejecting without a justification fails validation.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/actions",
            r#"{"role":"gilles","action":"reject_medical"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn messages_roundtrip_with_topic_filter() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/cases",
            r#"{"slug":"dupont-jean","patient_name":"Jean Dupont"}"#,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/cases/dupont-jean/messages",
            r#"{"role":"franchir","topic":"commercial","body":"Devis en préparation","author":"Franchir"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/cases/dupont-jean/messages?topic=commercial")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["body"], "Devis en préparation");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/cases/dupont-jean/messages?topic=medical")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}
