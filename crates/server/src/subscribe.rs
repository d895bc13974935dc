//! The waitlist subscription handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{
    domain::{EmailAddress, Provider},
    error::{ApiError, ApiException},
    protocol::{SubscribeRequest, SubscribeResponse},
};
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    providers::{self, ProviderError, SubscribeOutcome},
};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

pub(crate) async fn subscribe_default(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SubscribeResponse> {
    let provider = state.settings.default_provider;
    subscribe(&state, provider, &body).await.map_err(reject)
}

pub(crate) async fn subscribe_klaviyo(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SubscribeResponse> {
    subscribe(&state, Provider::Klaviyo, &body)
        .await
        .map_err(reject)
}

pub(crate) async fn subscribe_mailerlite(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<SubscribeResponse> {
    subscribe(&state, Provider::Mailerlite, &body)
        .await
        .map_err(reject)
}

pub(crate) async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    reject(ApiException::method_not_allowed())
}

/// Give body-limit rejections the same `{error}` shape as every other failure.
pub(crate) async fn payload_too_large_as_json(response: Response) -> Response {
    if response.status() != StatusCode::PAYLOAD_TOO_LARGE {
        return response;
    }
    warn!("rejected oversized subscription body");
    reject(ApiException::payload_too_large()).into_response()
}

async fn subscribe(
    state: &AppState,
    provider: Provider,
    body: &[u8],
) -> Result<Json<SubscribeResponse>, ApiException> {
    let request: SubscribeRequest = serde_json::from_slice(body).map_err(|error| {
        error!(%provider, %error, "subscription body is not valid JSON");
        ApiException::internal()
    })?;
    let form_location = request.form_location_or_unknown().to_string();

    let email = request
        .email
        .as_deref()
        .and_then(|raw| EmailAddress::parse(raw).ok())
        .ok_or_else(|| {
            warn!(%provider, %form_location, "rejected subscription with missing or invalid email");
            ApiException::invalid_email()
        })?;

    info!(%provider, %form_location, "forwarding waitlist subscription");
    match providers::forward(provider, &state.http, &state.settings, &email).await {
        Ok(SubscribeOutcome::Subscribed) => {
            info!(%provider, %form_location, "waitlist subscription accepted");
            Ok(Json(SubscribeResponse::subscribed(form_location)))
        }
        Ok(SubscribeOutcome::AlreadySubscribed) => {
            info!(%provider, %form_location, "address was already on the waitlist");
            Ok(Json(SubscribeResponse::already_subscribed(form_location)))
        }
        Err(err) => Err(provider_failure(err, &form_location)),
    }
}

fn provider_failure(err: ProviderError, form_location: &str) -> ApiException {
    match err {
        ProviderError::MissingCredentials { provider } => {
            error!(%provider, %form_location, "provider credentials are not configured");
            ApiException::configuration()
        }
        ProviderError::Rejected {
            provider,
            status,
            details,
        } => {
            error!(%provider, %form_location, status, ?details, "provider rejected subscription");
            ApiException::upstream(details)
        }
        ProviderError::Transport { provider, source } => {
            error!(%provider, %form_location, error = %source, "provider request failed");
            ApiException::internal()
        }
    }
}

fn reject(err: ApiException) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.into()))
}
