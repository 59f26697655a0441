use std::sync::Arc;

use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use tasklane::auth::token::TokenCodec;
use tasklane::auth::{AuthMiddleware, BcryptHasher, JwtCodec};
use tasklane::repository::{InMemoryTaskRepository, InMemoryUserRepository};
use tasklane::routes;
use tasklane::state::AppState;

fn test_state() -> (AppState, Arc<dyn TokenCodec>) {
    let token_codec: Arc<dyn TokenCodec> =
        Arc::new(JwtCodec::new("integration-test-secret".to_string(), 60));
    let state = AppState {
        user_repository: Arc::new(InMemoryUserRepository::new()),
        task_repository: Arc::new(InMemoryTaskRepository::new()),
        password_hasher: Arc::new(BcryptHasher),
        token_codec: token_codec.clone(),
        token_exp_minutes: 60,
    };
    (state, token_codec)
}

macro_rules! test_app {
    () => {{
        let (state, codec) = test_state();
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(AuthMiddleware::new(codec))
                .service(routes::health::health)
                .configure(routes::config),
        )
        .await
    }};
}

// Registers a user and logs them in, returning their id and bearer token.
async fn register_and_login_user(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> (Uuid, String) {
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "securepassword123"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    let user_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({
            "username": username,
            "password": "securepassword123"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    let token = body["token"].as_str().unwrap().to_string();

    (user_id, token)
}

async fn create_task<S, B>(
    app: &S,
    token: &str,
    payload: serde_json::Value,
) -> actix_web::dev::ServiceResponse<B>
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(payload)
        .to_request();
    test::call_service(app, req).await
}

#[actix_web::test]
async fn test_task_crud_flow() {
    let app = test_app!();
    let (user_id, token) = register_and_login_user(&app, "alice").await;

    // Create: the caller is auto-assigned.
    let resp = create_task(
        &app,
        &token,
        json!({"title": "Write report", "description": "Quarterly status."}),
    )
    .await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    let task_id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();

    // Get
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["data"]["title"], "Write report");
    assert_eq!(body["data"]["status"], "pending");
    assert!(body["data"]["users"]
        .as_array()
        .unwrap()
        .contains(&json!(user_id)));
    assert_eq!(
        body["data"]["links"]["self"],
        format!("/api/tasks/{}", task_id)
    );

    // Patch the title; other fields keep their value.
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"title": "Send report"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["data"]["title"], "Send report");
    assert_eq!(body["data"]["description"], "Quarterly status.");

    // Writing status=completed without a completion timestamp violates the
    // completed/completed_at consistency rule.
    let req = test::TestRequest::patch()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({"status": "completed"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    // The task is gone: get and a second delete both 404.
    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tasks/{}", task_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_task_listing_is_scoped_to_the_caller() {
    let app = test_app!();
    let (_alice_id, alice_token) = register_and_login_user(&app, "alice").await;
    let (bob_id, bob_token) = register_and_login_user(&app, "bob").await;

    for title in ["One", "Two"] {
        let resp = create_task(
            &app,
            &alice_token,
            json!({"title": title, "description": "Alice's task."}),
        )
        .await;
        assert_eq!(resp.status(), 201);
    }
    let resp = create_task(
        &app,
        &bob_token,
        json!({"title": "Three", "description": "Bob's task."}),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", alice_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["meta"]["total_tasks"], 2);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["meta"]["total_tasks"], 1);
    assert_eq!(body["data"][0]["title"], "Three");
    assert!(body["data"][0]["users"]
        .as_array()
        .unwrap()
        .contains(&json!(bob_id)));
}

#[actix_web::test]
async fn test_create_task_with_explicit_assignees() {
    let app = test_app!();
    let (_alice_id, alice_token) = register_and_login_user(&app, "alice").await;
    let (bob_id, bob_token) = register_and_login_user(&app, "bob").await;

    // Alice assigns Bob; both end up on the task.
    let resp = create_task(
        &app,
        &alice_token,
        json!({"title": "Pair up", "description": "Shared work.", "users": [bob_id]}),
    )
    .await;
    assert_eq!(resp.status(), 201);

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", format!("Bearer {}", bob_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["meta"]["total_tasks"], 1);
    assert_eq!(body["data"][0]["users"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_create_task_with_unknown_assignee_rejected() {
    let app = test_app!();
    let (_user_id, token) = register_and_login_user(&app, "alice").await;

    let resp = create_task(
        &app,
        &token,
        json!({
            "title": "Impossible",
            "description": "References a ghost.",
            "users": [Uuid::new_v4()]
        }),
    )
    .await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["error"], "One or more users do not exist in the system.");
}

#[actix_web::test]
async fn test_list_pagination_over_sorted_titles() {
    let app = test_app!();
    let (_user_id, token) = register_and_login_user(&app, "alice").await;

    for title in ["f", "a", "d", "b", "e", "c"] {
        let resp = create_task(
            &app,
            &token,
            json!({"title": title, "description": "Ordering fixture."}),
        )
        .await;
        assert_eq!(resp.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/tasks?order_by=title&page=2&size=2")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();

    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["c", "d"]);
    assert_eq!(body["meta"]["total_tasks"], 6);

    // Unsupported sort field
    let req = test::TestRequest::get()
        .uri("/api/tasks?order_by=priority")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["error"], "Invalid order_by field: priority");
}

#[actix_web::test]
async fn test_requests_without_valid_token_rejected() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/tasks").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["error"], "Missing token");

    let req = test::TestRequest::get()
        .uri("/api/tasks")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = serde_json::from_slice(&test::read_body(resp).await).unwrap();
    assert_eq!(body["error"], "Invalid token");

    // Health stays public.
    let req = test::TestRequest::get().uri("/health").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}
