//! RestStore against an in-process PostgREST stand-in.
//!
//! The stand-in checks the auth headers and filter encoding the hosted store
//! expects, answers 406 for single-object misses and 500 for the prompts table.
//!
//! Run with: `cargo test --test rest_store_test`

use std::collections::HashMap;

use avatar_studio_core::{
    fetch_studio_data, FieldOutcome, Order, Query, QueryError, RestStore, StudioSource,
};
use axum::extract::{Path, Query as QueryParams};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use reqwest::Url;
use serde_json::json;

const KEY: &str = "service-key";

async fn table_handler(
    Path(table): Path<String>,
    QueryParams(params): QueryParams<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let authorized = headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(KEY)
        && headers.get("authorization").and_then(|v| v.to_str().ok())
            == Some(&format!("Bearer {}", KEY)[..]);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    let single = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("vnd.pgrst.object+json"))
        .unwrap_or(false);

    match table.as_str() {
        "ai_providers" => {
            assert_eq!(params.get("is_active").map(String::as_str), Some("eq.true"));
            assert_eq!(params.get("order").map(String::as_str), Some("name.asc"));
            Json(json!([
                {"id": "p1", "name": "Alpha", "is_active": true},
                {"id": "p2", "name": "Beta", "is_active": true, "description": "fast"}
            ]))
            .into_response()
        }
        "prompts" => (StatusCode::INTERNAL_SERVER_ERROR, "prompts unavailable").into_response(),
        "avatars" => {
            if single && params.get("id").map(String::as_str) == Some("eq.avatar-1") {
                Json(json!({"id": "avatar-1", "name": "Nova", "image_path": "u1/nova.png"}))
                    .into_response()
            } else {
                (
                    StatusCode::NOT_ACCEPTABLE,
                    Json(json!({"code": "PGRST116", "message": "0 rows"})),
                )
                    .into_response()
            }
        }
        "avatar_references" => {
            assert_eq!(params.get("avatar_id").map(String::as_str), Some("eq.avatar-1"));
            Json(json!([
                {"id": "r1", "avatar_id": "avatar-1", "image_path": "u1/r1.png"},
                {"id": "r2", "avatar_id": "avatar-1"}
            ]))
            .into_response()
        }
        "broken" => "not json".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_stand_in() -> Url {
    let app = Router::new().route("/rest/v1/:table", get(table_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn providers_are_filtered_and_decoded() {
    let store = RestStore::new(spawn_stand_in().await, KEY);
    let providers = store.active_providers().await.unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[1].description.as_deref(), Some("fast"));
}

#[tokio::test]
async fn single_row_miss_is_a_query_error() {
    let store = RestStore::new(spawn_stand_in().await, KEY);
    let err = store.avatar("missing").await.unwrap_err();
    assert!(matches!(err, QueryError::NotSingleRow { .. }));
    assert_eq!(err.table(), "avatars");
}

#[tokio::test]
async fn http_errors_and_bad_bodies_are_query_errors() {
    let store = RestStore::new(spawn_stand_in().await, KEY);

    let err = store.prompts_for_owner("user-1").await.unwrap_err();
    assert!(matches!(err, QueryError::Status { status: 500, .. }));

    let err = store
        .select::<serde_json::Value>(&Query::table("broken").order("id", Order::Ascending))
        .await
        .unwrap_err();
    assert!(matches!(err, QueryError::Decode { .. }));
}

#[tokio::test]
async fn wrong_key_is_rejected_by_the_store() {
    let store = RestStore::new(spawn_stand_in().await, "anon");
    let err = store.active_providers().await.unwrap_err();
    assert!(matches!(err, QueryError::Status { status: 401, .. }));
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestStore::new(Url::parse(&format!("http://{}", addr)).unwrap(), KEY);
    let err = store.active_providers().await.unwrap_err();
    assert!(matches!(err, QueryError::Transport { .. }));
}

#[tokio::test]
async fn studio_fetch_over_http_degrades_only_prompts() {
    let store = RestStore::new(spawn_stand_in().await, KEY);
    let data = fetch_studio_data(&store, Some("avatar-1"), Some("user-1")).await;

    assert_eq!(data.providers.len(), 2);
    assert_eq!(data.avatar.as_ref().map(|a| a.id.as_str()), Some("avatar-1"));
    assert_eq!(data.references.len(), 2);
    assert!(data.prompts.is_empty());
    assert!(data.outcomes.prompts.is_degraded());
    assert_eq!(data.outcomes.references, FieldOutcome::Loaded);
}
