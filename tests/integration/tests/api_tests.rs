//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with the migrations applied
//! - Network access to the remote roster API
//! - Environment variables: SERVER_PORT, DATABASE_URL, GUILD_NAME, API_KEY
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

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
// Guild Roster Tests
// ============================================================================

#[tokio::test]
async fn test_guild_data() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/guild/data").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.get("info").is_some());
    assert!(body.get("vocations").is_some());
    assert!(body.get("byLevel").is_some());
}

#[tokio::test]
async fn test_guild_data_is_cached() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    server.get("/api/guild/data").await.unwrap();
    server.get("/api/guild/data").await.unwrap();

    let response = server.get("/api/guild/health").await.unwrap();
    let stats: Vec<CacheTierStats> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(stats.len(), 4);
    let analysis = stats
        .iter()
        .find(|s| s.name == "analysis")
        .expect("analysis tier missing");
    assert!(analysis.hits >= 1, "second read should hit the cache");
}

#[tokio::test]
async fn test_force_refresh() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/guild/force-refresh").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.get("info").is_some());
}

#[tokio::test]
async fn test_mark_exited_requires_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_empty("/api/guild/mark-exited/Somebody")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
    assert_eq!(body.error.code, "MISSING_API_KEY");
}

#[tokio::test]
async fn test_mark_exited_rejects_wrong_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_with_key("/api/guild/mark-exited/Somebody", "not-the-key")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "INVALID_API_KEY");
}

#[tokio::test]
async fn test_mark_exited_unknown_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let suffix = unique_suffix();
    let response = server
        .post_empty_keyed(&format!("/api/guild/mark-exited/zz-missing-{suffix}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Member Message Tests
// ============================================================================

#[tokio::test]
async fn test_messages_unknown_member() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let suffix = unique_suffix();
    let response = server
        .get(&format!("/api/guild/members/zz-missing-{suffix}/messages"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_add_message_requires_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/api/guild/members/Somebody/messages", &MessageRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_message_rejects_long_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = MessageRequest::of(&"x".repeat(51));
    let response = server
        .post_keyed("/api/guild/members/Somebody/messages", &body)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_add_and_list_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Populate the roster, then pick any member from the analysis
    let response = server.get("/api/guild/data").await.unwrap();
    let analysis: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let Some(member) = analysis["sorted"]
        .as_array()
        .and_then(|m| m.first())
        .and_then(|m| m["name"].as_str())
        .map(String::from)
    else {
        eprintln!("Skipping test: guild has no members");
        return;
    };

    let message = MessageRequest::unique();
    let response = server
        .post_keyed(&format!("/api/guild/members/{member}/messages"), &message)
        .await
        .unwrap();
    let created: serde_json::Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created["memberName"].as_str(), Some(member.as_str()));

    let response = server
        .get(&format!("/api/guild/members/{member}/messages"))
        .await
        .unwrap();
    let listed: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    let messages = listed["messages"].as_array().expect("messages array");
    assert!(messages
        .iter()
        .any(|m| m["message"].as_str() == Some(message.message.as_str())));
}

// ============================================================================
// External Character Tests
// ============================================================================

#[tokio::test]
async fn test_list_characters_requires_api_key() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/external/characters").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_characters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_keyed("/api/external/characters").await.unwrap();
    let _characters: Vec<serde_json::Value> =
        assert_json(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_track_character_rejects_empty_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_keyed("/api/external/characters", &TrackRequest::named(""))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_track_unknown_character() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post_keyed("/api/external/characters", &TrackRequest::nonexistent())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_untrack_unknown_character() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let suffix = unique_suffix();
    let response = server
        .delete_keyed(&format!("/api/external/characters/zz-missing-{suffix}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_sync_with_nothing_tracked() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.post_empty_keyed("/api/external/sync").await.unwrap();
    let outcome: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(outcome.get("synced").is_some());
    assert!(outcome.get("failed").is_some());
}

#[tokio::test]
async fn test_combined_data() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_keyed("/api/external/combined-data").await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.get("guild").is_some());
    assert!(body.get("externalCharacters").is_some());
    assert!(body.get("totals").is_some());
}
