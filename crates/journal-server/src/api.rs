use axum::{
    body::Bytes,
    extract::{Path, State},
    handler::HandlerWithoutStateExt,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use journal::services::{EntryPatch, NewEntry, ServiceError};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Naming used by one family of routes.
///
/// `/reflections` and `/api/entries` share every handler and differ only in
/// the keys and messages of their responses.
#[derive(Debug, Clone, Copy)]
enum Vocabulary {
    Reflection,
    Entry,
}

impl Vocabulary {
    fn singular(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "reflection",
            Vocabulary::Entry => "entry",
        }
    }

    fn plural(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "reflections",
            Vocabulary::Entry => "entries",
        }
    }

    fn total_key(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "totalReflections",
            Vocabulary::Entry => "totalEntries",
        }
    }

    fn created_message(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "Reflection added successfully",
            Vocabulary::Entry => "Entry saved successfully",
        }
    }

    fn updated_message(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "Reflection updated successfully",
            Vocabulary::Entry => "Entry updated successfully",
        }
    }

    fn deleted_message(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "Reflection deleted successfully",
            Vocabulary::Entry => "Entry deleted successfully",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            Vocabulary::Reflection => "Reflection not found",
            Vocabulary::Entry => "Entry not found",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        success: false,
        error: message.to_string(),
    };
    (status, Json(body)).into_response()
}

fn success_response(status: StatusCode, fields: Vec<(&str, Value)>) -> Response {
    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    for (key, value) in fields {
        body.insert(key.to_string(), value);
    }
    (status, Json(Value::Object(body))).into_response()
}

fn storage_error_response(e: &anyhow::Error) -> Response {
    tracing::error!("storage failure: {:#}", e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
}

fn service_error_response(e: ServiceError, vocab: Vocabulary) -> Response {
    match e {
        ServiceError::Validation(e) => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        ServiceError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, vocab.not_found_message())
        },
        ServiceError::Storage(e) => storage_error_response(&e),
    }
}

fn parse_body(body: &Bytes) -> Result<Value, Response> {
    serde_json::from_slice(body)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid JSON"))
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Resource not found")
}

async fn list_entries(state: AppState, vocab: Vocabulary) -> Response {
    match state.entry_service.list().await {
        Ok(entries) => {
            let count = entries.len();
            success_response(
                StatusCode::OK,
                vec![(vocab.plural(), json!(entries)), ("count", json!(count))],
            )
        },
        Err(e) => storage_error_response(&e),
    }
}

async fn create_entry(state: AppState, vocab: Vocabulary, body: Bytes) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let fields = match NewEntry::from_json(&payload) {
        Ok(fields) => fields,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    match state.entry_service.create(fields).await {
        Ok(created) => success_response(
            StatusCode::CREATED,
            vec![
                ("message", json!(vocab.created_message())),
                (vocab.singular(), json!(created.entry)),
                (vocab.total_key(), json!(created.total)),
            ],
        ),
        Err(e) => service_error_response(e, vocab),
    }
}

async fn update_entry(state: AppState, vocab: Vocabulary, id: String, body: Bytes) -> Response {
    let payload = match parse_body(&body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };

    let patch = match EntryPatch::from_json(&payload) {
        Ok(patch) => patch,
        // An unknown id is reported ahead of a bad payload
        Err(invalid) => {
            return match state.entry_service.get(&id).await {
                Ok(Some(_)) => error_response(StatusCode::BAD_REQUEST, &invalid.to_string()),
                Ok(None) => error_response(StatusCode::NOT_FOUND, vocab.not_found_message()),
                Err(e) => storage_error_response(&e),
            };
        },
    };

    match state.entry_service.update(&id, patch).await {
        Ok(entry) => success_response(
            StatusCode::OK,
            vec![
                ("message", json!(vocab.updated_message())),
                (vocab.singular(), json!(entry)),
            ],
        ),
        Err(e) => service_error_response(e, vocab),
    }
}

async fn delete_entry(state: AppState, vocab: Vocabulary, id: String) -> Response {
    match state.entry_service.delete(&id).await {
        Ok(remaining) => success_response(
            StatusCode::OK,
            vec![
                ("message", json!(vocab.deleted_message())),
                (vocab.total_key(), json!(remaining)),
            ],
        ),
        Err(e) => service_error_response(e, vocab),
    }
}

/// Serve the service worker so it may control the whole origin
async fn service_worker(State(state): State<AppState>) -> Response {
    let Some(dir) = state.static_dir.as_ref() else {
        return not_found().await;
    };

    for candidate in [dir.join("sw.js"), dir.join("js").join("sw.js")] {
        if let Ok(script) = tokio::fs::read(&candidate).await {
            return (
                [
                    (header::CONTENT_TYPE, "application/javascript"),
                    (HeaderName::from_static("service-worker-allowed"), "/"),
                ],
                script,
            )
                .into_response();
        }
    }

    not_found().await
}

fn vocabulary_routes(
    vocab: Vocabulary,
    collection: &str,
    create: &str,
    item: &str,
) -> Router<AppState> {
    Router::new()
        .route(
            collection,
            get(move |State(state): State<AppState>| list_entries(state, vocab)),
        )
        .route(
            create,
            post(move |State(state): State<AppState>, body: Bytes| {
                create_entry(state, vocab, body)
            }),
        )
        .route(
            item,
            put(
                move |State(state): State<AppState>, Path(id): Path<String>, body: Bytes| {
                    update_entry(state, vocab, id, body)
                },
            )
            .delete(move |State(state): State<AppState>, Path(id): Path<String>| {
                delete_entry(state, vocab, id)
            }),
        )
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .merge(vocabulary_routes(
            Vocabulary::Reflection,
            "/reflections",
            "/add_reflection",
            "/reflection/{id}",
        ))
        .merge(vocabulary_routes(
            Vocabulary::Entry,
            "/api/entries",
            "/api/save-entry",
            "/api/entry/{id}",
        ));

    let router = Router::new().route("/health", get(health)).merge(api_routes);

    // Front-end files, when configured, take every path the API does not
    let router = match state.static_dir.clone() {
        Some(dir) => router.route("/sw.js", get(service_worker)).fallback_service(
            ServeDir::new(dir).not_found_service(not_found.into_service()),
        ),
        None => router.fallback(not_found),
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
