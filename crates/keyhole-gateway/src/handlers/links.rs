use crate::error::Result;
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use keyhole_core::ShortCode;

pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>)> {
    let mapping = state.shortener().add_url(&request.url).await?;
    Ok((StatusCode::CREATED, Json(mapping.into())))
}

pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // A path segment that fails short-code validation cannot name a
    // stored mapping, so it resolves the same way as an unknown code.
    let Ok(code) = ShortCode::new(code) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    match state.shortener().get_url(&code).await? {
        Some(mapping) => Ok(Redirect::temporary(&mapping.long_url).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}
