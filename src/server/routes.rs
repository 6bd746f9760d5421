use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use url::form_urlencoded;

use crate::errors::{normalize, ErrorContext, Failure, NormalizedError};
use crate::model::playlist::PlaylistTracks;
use crate::observability::logger::log_context;
use crate::observability::metrics::get_metrics;
use crate::parser::playlist_id::{PlaylistId, PLAYLIST_ID_FIELD};
use crate::server::server::AppState;

pub const COLLECTION_INFO_PATH: &str = "/resource/collection-info";
pub const COLLECTION_ITEMS_PATH: &str = "/resource/collection-items";

// accepted for callers still sending the older parameter name
const PLAYLIST_ID_ALIAS: &str = "playlistId";

pub fn resource_router() -> Router<AppState> {
    Router::new()
        .route(COLLECTION_INFO_PATH, get(collection_info))
        .route(COLLECTION_ITEMS_PATH, get(collection_items))
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

async fn collection_info(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let context = ErrorContext::new("Playlist info", "Failed to fetch playlist info");
    let result = match playlist_id_from(&uri) {
        Ok(id) => state.playlists.playlist_info(&id).await,
        Err(failure) => Err(failure),
    };

    match result {
        Ok(info) => Json(info).into_response(),
        Err(failure) => error_response(&state, &method, &uri, &failure, &context).await,
    }
}

async fn collection_items(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let context = ErrorContext::new("Playlist tracks", "Failed to fetch playlist tracks");
    let result = match playlist_id_from(&uri) {
        Ok(id) => state.playlists.playlist_tracks(&id).await,
        Err(failure) => Err(failure),
    };

    match result {
        Ok(tracks) => Json(PlaylistTracks { tracks }).into_response(),
        Err(failure) => error_response(&state, &method, &uri, &failure, &context).await,
    }
}

/// Validation runs on the raw query so malformed input never reaches the network.
fn playlist_id_from(uri: &Uri) -> Result<PlaylistId, Failure> {
    let query = uri.query().unwrap_or_default();
    let mut value = None;
    for (key, v) in form_urlencoded::parse(query.as_bytes()) {
        if key == PLAYLIST_ID_FIELD || (key == PLAYLIST_ID_ALIAS && value.is_none()) {
            value = Some(v.into_owned());
        }
    }
    PlaylistId::from_query(value.as_deref()).map_err(Failure::Validation)
}

async fn error_response(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    failure: &Failure,
    context: &ErrorContext,
) -> Response {
    let normalized = normalize(failure, context);

    get_metrics()
        .await
        .normalized_errors
        .with_label_values(&[normalized.kind.as_str()])
        .inc();
    state.logger.error(
        &failure.to_string(),
        Some(&log_context([
            ("path", json!(uri.path())),
            ("method", json!(method.as_str())),
            ("statusCode", json!(normalized.status_code)),
            ("kind", json!(normalized.kind.as_str())),
        ])),
    );

    normalized.into_response()
}
