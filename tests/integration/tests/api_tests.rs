//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL (or the discrete DB_* variables)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_service_banner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.expect("Request failed");
    let banner: BannerBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(banner.status, "running");
    assert!(!banner.message.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Create Tests
// ============================================================================

#[tokio::test]
async fn test_create_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();

    let response = server.post("/api/users", &request).await.unwrap();
    let envelope: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert!(envelope.success);
    assert!(envelope.data.id > 0);
    assert_eq!(envelope.data.email, request.email);
    assert_eq!(envelope.data.username, request.username);
    assert_eq!(envelope.data.password, request.password);
    assert_eq!(envelope.data.created_at, envelope.data.updated_at);
}

#[tokio::test]
async fn test_create_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = CreateUserBody::unique();
    server.post("/api/users", &first).await.unwrap();

    // Same email, different username
    let mut second = CreateUserBody::unique();
    second.email = first.email.clone();

    let response = server.post("/api/users", &second).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.error, "Email already registered");
}

#[tokio::test]
async fn test_create_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = CreateUserBody::unique();
    server.post("/api/users", &first).await.unwrap();

    // Different email, same username
    let mut second = CreateUserBody::unique();
    second.username = first.username.clone();

    let response = server.post("/api/users", &second).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error, "Username already taken");
}

#[tokio::test]
async fn test_create_email_conflict_reported_before_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = CreateUserBody::unique();
    server.post("/api/users", &first).await.unwrap();

    // Both taken: email wins
    let response = server.post("/api/users", &first).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error, "Email already registered");
}

#[tokio::test]
async fn test_create_invalid_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = CreateUserBody::unique();
    request.email = "not-an-email".to_string();

    let response = server.post("/api/users", &request).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(!envelope.success);
}

#[tokio::test]
async fn test_create_missing_fields() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/users", &serde_json::json!({"email": "a@x.com"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Read Tests
// ============================================================================

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();

    let response = server.post("/api/users", &request).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/users/{}", created.data.id))
        .await
        .unwrap();
    let fetched: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(fetched.data.id, created.data.id);
    assert_eq!(fetched.data.email, created.data.email);
    assert_eq!(fetched.data.username, created.data.username);
    assert_eq!(fetched.data.password, created.data.password);
    assert_eq!(fetched.data.created_at, created.data.created_at);
    assert_eq!(fetched.data.updated_at, created.data.updated_at);
}

#[tokio::test]
async fn test_get_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/999999999").await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert!(!envelope.success);
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/users/abc").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_list_users_ascending_by_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.post("/api/users", &CreateUserBody::unique()).await.unwrap();
    let first: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    let response = server.post("/api/users", &CreateUserBody::unique()).await.unwrap();
    let second: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server.get("/api/users").await.unwrap();
    let envelope: UserListEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(envelope.success);
    let ids: Vec<i64> = envelope.data.iter().map(|u| u.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&first.data.id));
    assert!(ids.contains(&second.data.id));
}

// ============================================================================
// Update Tests
// ============================================================================

#[tokio::test]
async fn test_partial_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();
    let response = server.post("/api/users", &request).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let new_username = format!("renamed{}", unique_suffix());
    let response = server
        .put(
            &format!("/api/users/{}", created.data.id),
            &UpdateUserBody {
                username: Some(new_username.clone()),
                ..UpdateUserBody::default()
            },
        )
        .await
        .unwrap();
    let updated: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.data.username, new_username);
    assert_eq!(updated.data.email, request.email);
    assert_eq!(updated.data.password, request.password);
    assert_eq!(updated.data.created_at, created.data.created_at);
    assert!(updated.data.updated_at > created.data.updated_at);
}

#[tokio::test]
async fn test_update_empty_string_fields_are_ignored() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();
    let response = server.post("/api/users", &request).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put(
            &format!("/api/users/{}", created.data.id),
            &UpdateUserBody {
                email: Some(String::new()),
                username: Some(String::new()),
                password: Some("rotated".to_string()),
            },
        )
        .await
        .unwrap();
    let updated: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(updated.data.email, request.email);
    assert_eq!(updated.data.username, request.username);
    assert_eq!(updated.data.password, "rotated");
}

#[tokio::test]
async fn test_update_self_collision_is_allowed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();
    let response = server.post("/api/users", &request).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Writing back the same email must not be a conflict
    let response = server
        .put(
            &format!("/api/users/{}", created.data.id),
            &UpdateUserBody {
                email: Some(request.email.clone()),
                ..UpdateUserBody::default()
            },
        )
        .await
        .unwrap();
    let updated: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.email, request.email);
}

#[tokio::test]
async fn test_update_conflict_with_other_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = CreateUserBody::unique();
    server.post("/api/users", &alice).await.unwrap();

    let bob = CreateUserBody::unique();
    let response = server.post("/api/users", &bob).await.unwrap();
    let bob_created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .put(
            &format!("/api/users/{}", bob_created.data.id),
            &UpdateUserBody {
                email: Some(alice.email.clone()),
                ..UpdateUserBody::default()
            },
        )
        .await
        .unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error, "Email already registered");
}

#[tokio::test]
async fn test_update_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .put(
            "/api/users/999999999",
            &UpdateUserBody {
                username: Some("ghost".to_string()),
                ..UpdateUserBody::default()
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
async fn test_delete_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserBody::unique();
    let response = server.post("/api/users", &request).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete(&format!("/api/users/{}", created.data.id))
        .await
        .unwrap();
    let envelope: DeleteEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.message, "User deleted successfully");

    // Delete is final: the record is gone
    let response = server
        .get(&format!("/api/users/{}", created.data.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Repeat delete reports not found
    let response = server
        .delete(&format!("/api/users/{}", created.data.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_unknown_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.delete("/api/users/999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Full Scenario
// ============================================================================

#[tokio::test]
async fn test_full_crud_scenario() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Create
    let alice = CreateUserBody::unique();
    let response = server.post("/api/users", &alice).await.unwrap();
    let created: UserEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    let id = created.data.id;

    // Create again with the same email, different username
    let mut dup = CreateUserBody::unique();
    dup.email = alice.email.clone();
    let response = server.post("/api/users", &dup).await.unwrap();
    let envelope: ErrorEnvelope = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(envelope.error, "Email already registered");

    // Get the stored record
    let response = server.get(&format!("/api/users/{id}")).await.unwrap();
    let fetched: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.data.email, alice.email);

    // Update the username only
    let renamed = format!("renamed{}", unique_suffix());
    let response = server
        .put(
            &format!("/api/users/{id}"),
            &UpdateUserBody {
                username: Some(renamed.clone()),
                ..UpdateUserBody::default()
            },
        )
        .await
        .unwrap();
    let updated: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.data.username, renamed);
    assert_eq!(updated.data.email, alice.email);

    // Delete, then the record is gone
    let response = server.delete(&format!("/api/users/{id}")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/users/{id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
