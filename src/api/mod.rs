//! HTTP API for `PlantBuddy`.
//!
//! A small REST-shaped surface over the configured storage backend:
//!
//! - `GET /plants`, `POST /plants` - list and create
//! - `GET /plants/{id}`, `PUT /plants/{id}`, `DELETE /plants/{id}`
//! - `GET /actions`, `POST /actions` - query the care log, record an action
//! - `GET /tasks` - upcoming occurrences within a window
//!
//! Errors become JSON bodies of the form `{ "error": "message" }` with the
//! status carried by the error variant; the duplicate-action conflict
//! additionally attaches the existing record.

/// Care log queries and the action recorder endpoint
pub mod actions;
/// Plant CRUD endpoints
pub mod plants;
/// Upcoming task generation endpoint
pub mod tasks;

use crate::errors::Error;
use crate::store::SharedStore;
use axum::Router;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde_json::json;
use tracing::error;

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The configured storage backend.
    pub store: SharedStore,
}

/// Builds the application router over the given store.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/plants", get(plants::list_plants).post(plants::create_plant))
        .route(
            "/plants/{id}",
            get(plants::get_plant)
                .put(plants::update_plant)
                .delete(plants::delete_plant),
        )
        .route(
            "/actions",
            get(actions::list_actions).post(actions::record_action),
        )
        .route("/tasks", get(tasks::upcoming_tasks))
        .with_state(AppState { store })
}

/// JSON body extractor whose rejection is our own [`Error`], so malformed
/// request bodies surface as 400s in the same error shape as everything else.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(Error))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation {
            message: rejection.body_text(),
        }
    }
}

impl Error {
    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::PlantNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateAction { .. } => StatusCode::CONFLICT,
            Self::Config { .. }
            | Self::Storage { .. }
            | Self::Io(_)
            | Self::Database(_)
            | Self::Http(_)
            | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = match &self {
            Self::DuplicateAction { existing, .. } => json!({
                "error": self.to_string(),
                "action": existing,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_store;
    use axum::body::Body;
    use axum::http::{Request, header};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let store = setup_test_store().await.unwrap();
        router(Arc::new(store))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_plant_body() -> Value {
        json!({
            "name": "Monstera",
            "wateringIntervalDays": 7,
            "mistingIntervalDays": 3,
        })
    }

    #[tokio::test]
    async fn test_create_then_list_plants() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/plants", sample_plant_body()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["name"], "Monstera");
        assert!(created["id"].as_i64().unwrap() > 0);

        let response = app.oneshot(get_request("/plants")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_plant_missing_fields_is_bad_request() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/plants", json!({ "name": "Monstera" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("wateringIntervalDays"));

        let response = app
            .oneshot(json_request(
                "POST",
                "/plants",
                json!({ "wateringIntervalDays": 7, "mistingIntervalDays": 3 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test_app().await;

        let request = Request::builder()
            .method("POST")
            .uri("/plants")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_update_delete_plant() {
        let app = test_app().await;

        let created = body_json(
            app.clone()
                .oneshot(json_request("POST", "/plants", sample_plant_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        // Fetch
        let response = app
            .clone()
            .oneshot(get_request(&format!("/plants/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Merge-update one field
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/plants/{id}"),
                json!({ "notes": "east window" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["notes"], "east window");
        assert_eq!(updated["wateringIntervalDays"], 7);

        // Delete, then the id is gone
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/plants/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);

        let response = app
            .oneshot(get_request(&format!("/plants/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_plant_routes_are_not_found() {
        let app = test_app().await;

        for request in [
            get_request("/plants/42"),
            json_request("PUT", "/plants/42", json!({ "notes": "x" })),
            Request::builder()
                .method("DELETE")
                .uri("/plants/42")
                .body(Body::empty())
                .unwrap(),
        ] {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_record_action_twice_conflicts_with_existing_attached() {
        let app = test_app().await;

        let created = body_json(
            app.clone()
                .oneshot(json_request("POST", "/plants", sample_plant_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();
        let action_body = json!({ "plantId": id, "actionType": "watering" });

        let response = app
            .clone()
            .oneshot(json_request("POST", "/actions", action_body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let first = body_json(response).await;
        assert_eq!(first["success"], true);
        assert_eq!(first["plant"]["id"], id);
        assert_eq!(first["action"]["kind"], "watering");

        let response = app
            .clone()
            .oneshot(json_request("POST", "/actions", action_body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let conflict = body_json(response).await;
        assert!(conflict["error"].as_str().unwrap().contains("watered"));
        assert_eq!(conflict["action"]["id"], first["action"]["id"]);
    }

    #[tokio::test]
    async fn test_record_action_validates_kind_and_plant() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/actions",
                json!({ "plantId": 1, "actionType": "pruning" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "POST",
                "/actions",
                json!({ "plantId": 42, "actionType": "watering" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_actions_with_filters() {
        let app = test_app().await;

        let created = body_json(
            app.clone()
                .oneshot(json_request("POST", "/plants", sample_plant_body()))
                .await
                .unwrap(),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/actions",
                json!({ "plantId": id, "actionType": "misting" }),
            ))
            .await
            .unwrap();

        let today = chrono::Utc::now().date_naive();
        let response = app
            .clone()
            .oneshot(get_request(&format!("/actions?plantId={id}&date={today}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let actions = body_json(response).await;
        assert_eq!(actions.as_array().unwrap().len(), 1);

        // A different day matches nothing
        let response = app
            .oneshot(get_request(&format!("/actions?plantId={id}&date=2020-01-01")))
            .await
            .unwrap();
        let actions = body_json(response).await;
        assert!(actions.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upcoming_tasks_window() {
        let app = test_app().await;

        app.clone()
            .oneshot(json_request("POST", "/plants", sample_plant_body()))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(get_request("/tasks"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let tasks = body_json(response).await;
        // 30-day default window, intervals 7 and 3: several of each kind
        assert!(tasks.as_array().unwrap().len() > 10);

        // A one-day window only holds today's occurrences
        let today = chrono::Utc::now().date_naive().to_string();
        let response = app.oneshot(get_request("/tasks?days=1")).await.unwrap();
        let tasks = body_json(response).await;
        for task in tasks.as_array().unwrap() {
            assert_eq!(task["date"].as_str().unwrap(), today);
        }
    }
}
