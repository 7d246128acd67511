use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{
    collection_export::{EXPORT_CONTENT_DISPOSITION, EXPORT_CONTENT_TYPE},
    collection_model::{SavedResult, SavedResultView},
};
use crate::{
    app_error::AppError, app_extract::AppPath, app_module::AppState,
    session::session_extractor::SessionId,
};

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    /// Context text at save time; defaults to the context used for generation.
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectionView {
    pub count: usize,
    pub items: Vec<SavedResultView>,
}

pub fn collection_router() -> Router {
    Router::new()
        .route("/collection", get(list_results).post(save_result))
        .route("/collection/export", get(export_results))
        .route("/collection/:index", delete(delete_result))
}

pub async fn save_result(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
    request: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedResult>), AppError> {
    // A bodiless save keeps the generation-time context.
    let context = match request {
        Ok(Json(request)) => request.context,
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => return Err(rejection.into()),
    };

    let saved = ctx
        .sessions
        .with_session(session_id, |session| session.save_staged(context))??;

    tracing::info!(session = %session_id, title = %saved.title, "Result saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn list_results(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<CollectionView>, AppError> {
    let view = ctx.sessions.with_session(session_id, |session| {
        let collection = session.collection();
        CollectionView {
            count: collection.len(),
            items: collection.list_newest_first().collect(),
        }
    })?;

    Ok(Json(view))
}

pub async fn delete_result(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
    AppPath(index): AppPath<usize>,
) -> Result<Json<SavedResult>, AppError> {
    let removed = ctx
        .sessions
        .with_session(session_id, |session| session.collection_mut().delete(index))??;

    tracing::info!(session = %session_id, index, "Result deleted");
    Ok(Json(removed))
}

pub async fn export_results(
    Extension(ctx): Extension<AppState>,
    SessionId(session_id): SessionId,
) -> Result<impl IntoResponse, AppError> {
    let document = ctx
        .sessions
        .with_session(session_id, |session| session.collection().export())?;

    Ok((
        [
            (header::CONTENT_TYPE, EXPORT_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, EXPORT_CONTENT_DISPOSITION),
        ],
        document,
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::app_module::AppState;
    use crate::collection::collection_model::SavedResult;
    use crate::prompt::tone::Tone;
    use crate::session::session_state::PromptInputs;
    use crate::session::session_extractor::SESSION_HEADER;
    use crate::test_support::{send, send_json, test_app, StubReply};

    fn seeded(titles: &[(&str, &str, &str)]) -> (Router, AppState, Uuid) {
        let (app, state) = test_app(StubReply::Text("unused".into()));
        let id = state.sessions.create();
        state
            .sessions
            .with_session(id, |session| {
                for (title, context, content) in titles {
                    session
                        .collection_mut()
                        .append(SavedResult::new(*title, *context, *content));
                }
            })
            .unwrap();
        (app, state, id)
    }

    fn stage(state: &AppState, id: Uuid) {
        state
            .sessions
            .with_session(id, |s| {
                s.stage(
                    PromptInputs {
                        task: "Card".into(),
                        context: "old".into(),
                        tone: Tone::Neutral,
                    },
                    "m".into(),
                    "Happy birthday".into(),
                )
            })
            .unwrap();
    }

    fn request(method: &str, uri: &str, id: Uuid) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(SESSION_HEADER, id.to_string())
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let (app, _, id) = seeded(&[("one", "", "1"), ("two", "", "2"), ("three", "", "3")]);

        let (status, body) = send_json(&app, request("GET", "/v1/collection", id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 3);
        assert_eq!(body["items"][0]["title"], "three");
        assert_eq!(body["items"][0]["index"], 0);
        assert_eq!(body["items"][0]["item_number"], 3);
        assert_eq!(body["items"][2]["title"], "one");
    }

    #[tokio::test]
    async fn delete_zero_removes_most_recent() {
        let (app, state, id) = seeded(&[("one", "", "1"), ("two", "", "2"), ("three", "", "3")]);

        let (status, body) = send_json(&app, request("DELETE", "/v1/collection/0", id)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "three");
        let remaining: Vec<String> = state
            .sessions
            .with_session(id, |s| {
                s.collection().list().iter().map(|r| r.title.clone()).collect()
            })
            .unwrap();
        assert_eq!(remaining, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn out_of_range_delete_is_not_found_and_harmless() {
        let (app, state, id) = seeded(&[("one", "", "1")]);

        let (status, body) = send_json(&app, request("DELETE", "/v1/collection/5", id)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("position 5"));
        let len = state.sessions.with_session(id, |s| s.collection().len()).unwrap();
        assert_eq!(len, 1);
    }

    #[tokio::test]
    async fn non_numeric_index_is_a_json_error() {
        let (app, state, id) = seeded(&[("one", "", "1")]);

        for uri in ["/v1/collection/-1", "/v1/collection/first"] {
            let (status, body) = send_json(&app, request("DELETE", uri, id)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
        let len = state.sessions.with_session(id, |s| s.collection().len()).unwrap();
        assert_eq!(len, 1);
    }

    #[tokio::test]
    async fn malformed_save_body_is_rejected() {
        let (app, state, id) = seeded(&[]);
        stage(&state, id);

        let save = Request::post("/v1/collection")
            .header(SESSION_HEADER, id.to_string())
            .header("content-type", "application/json")
            .body(Body::from(r#"{"context": 7}"#))
            .unwrap();
        let (status, body) = send_json(&app, save).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
        let len = state.sessions.with_session(id, |s| s.collection().len()).unwrap();
        assert_eq!(len, 0);
    }

    #[tokio::test]
    async fn save_without_generation_conflicts() {
        let (app, state, id) = seeded(&[]);

        let (status, _) = send_json(&app, request("POST", "/v1/collection", id)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        let len = state.sessions.with_session(id, |s| s.collection().len()).unwrap();
        assert_eq!(len, 0);
    }

    #[tokio::test]
    async fn save_accepts_context_override() {
        let (app, state, id) = seeded(&[]);
        stage(&state, id);

        let save = Request::post("/v1/collection")
            .header(SESSION_HEADER, id.to_string())
            .header("content-type", "application/json")
            .body(Body::from(r#"{"context": "new"}"#))
            .unwrap();
        let (status, body) = send_json(&app, save).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Card (Neutral)");
        assert_eq!(body["context"], "new");
        assert_eq!(body["content"], "Happy birthday");
    }

    #[tokio::test]
    async fn export_is_a_text_attachment() {
        let (app, _, id) = seeded(&[("A", "c1", "r1"), ("B", "c2", "r2")]);

        let response = app
            .clone()
            .oneshot(request("GET", "/v1/collection/export", id))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"my_techsage_collection.txt\""
        );

        let (_, document) = send(&app, request("GET", "/v1/collection/export", id)).await;
        let rule = "-".repeat(40);
        assert!(document.starts_with("--- TECHSAGE COLLECTION ---\n\n"));
        assert!(document.contains(&format!("TITLE: A\nCONTEXT: c1\nRESULT:\nr1\n{}\n\n", rule)));
        assert!(document.contains(&format!("TITLE: B\nCONTEXT: c2\nRESULT:\nr2\n{}\n\n", rule)));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (app, _, _) = seeded(&[]);

        let (status, _) = send_json(&app, request("GET", "/v1/collection", Uuid::new_v4())).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
