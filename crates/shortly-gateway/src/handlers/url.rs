use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortly_core::Alias;
use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::model::{ApiResponse, SaveUrlRequest};
use crate::state::AppState;

/// How many generated aliases are tried before giving up on a save.
pub const MAX_GENERATE_ATTEMPTS: usize = 3;

pub async fn save_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveUrlRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    validate_url(&request.url)?;

    let alias = match request.alias.filter(|alias| !alias.is_empty()) {
        Some(raw) => {
            let alias = Alias::new(raw)?;
            let id = state
                .repository()
                .save_url(&request.url, alias.as_str())
                .await
                .map_err(AppError::from_save)?;
            info!(alias = %alias, id, "url saved");
            alias
        }
        None => save_with_generated_alias(&state, &request.url).await?,
    };

    Ok(Json(ApiResponse::saved(alias)))
}

/// Saves `url` under a fresh generated alias, drawing a new one when
/// the previous draw is already taken.
async fn save_with_generated_alias(state: &AppState, url: &str) -> Result<Alias> {
    for attempt in 1..=MAX_GENERATE_ATTEMPTS {
        let alias = state.generator().generate();

        match state.repository().save_url(url, alias.as_str()).await {
            Ok(id) => {
                info!(alias = %alias, id, "url saved");
                return Ok(alias);
            }
            Err(err) if err.is_already_exists() => {
                debug!(alias = %alias, attempt, "generated alias already taken");
            }
            Err(err) => return Err(AppError::from_save(err)),
        }
    }

    Err(AppError::AliasExhausted(MAX_GENERATE_ATTEMPTS))
}

pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let url = state.repository().get_url(&alias).await?;

    let location = HeaderValue::try_from(url.as_str()).map_err(|e| {
        AppError::Internal(format!("stored url for '{alias}' is not a valid header: {e}"))
    })?;

    debug!(alias = %alias, url = %url, "redirecting");
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Accepts absolute `http`/`https` URLs with a non-empty host.
fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(AppError::InvalidUrl("url cannot be empty".to_string()));
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return Err(AppError::InvalidUrl(format!(
            "url must have a scheme and host: {url}"
        )));
    };

    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::InvalidUrl(format!(
            "url scheme must be http or https: {scheme}"
        )));
    }

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() {
        return Err(AppError::InvalidUrl(format!("url must have a host: {url}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("HTTPS://example.com/a?b=c#d").is_ok());
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(validate_url("").is_err());
        assert!(validate_url("example.com").is_err());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("https:///path").is_err());
    }
}
