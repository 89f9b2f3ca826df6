use api_ingress::{ProblemInstance, ProblemResponse};
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api::rest::error::{map_body_error, map_body_read_error};

/// JSON request body that falls back to `T::default()` when the request has
/// no body or is not declared as JSON, so the handler's own validation
/// decides what is missing. A JSON body that does not deserialize is a 400.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let instance = ProblemInstance::from_parts(&parts);
        let declared_json = is_json(&parts.headers);

        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|rejection| map_body_read_error(&rejection, &instance))?;

        if !declared_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|e| {
            info!("Rejected request body: {}", e);
            map_body_error(&e, &instance)
        })
    }
}
