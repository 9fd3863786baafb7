use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::Instrument;

use crate::check_card;
use crate::error::ApiError;

const CARD_FIELD: &str = "card";

#[derive(Debug, Default, PartialEq, Eq)]
struct CheckRequest {
    card: String,
}

impl CheckRequest {
    /// Decodes `{"card": "<string>"}`.
    ///
    /// A `null` body, an absent field and a `null` field all leave the card
    /// empty. The field name matches case-insensitively, an exact `card` key
    /// taking priority. Anything that is not JSON, not an object, or a
    /// non-string card is an error.
    fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = match serde_json::from_slice(body)? {
            Value::Null => return Ok(CheckRequest::default()),
            other => serde_json::from_value(other)?,
        };

        let value = fields.get(CARD_FIELD).or_else(|| {
            fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(CARD_FIELD))
                .map(|(_, value)| value)
        });

        let card = match value {
            Some(value) => Option::<String>::deserialize(value)?.unwrap_or_default(),
            None => String::new(),
        };
        Ok(CheckRequest { card })
    }
}

/// POST /api/v1/check
///
/// The body is decoded here rather than through `web::Json` so that every
/// decode failure is answered with a 500 carrying the parser's message.
async fn check(body: web::Bytes) -> Result<HttpResponse, ApiError> {
    let span = tracing::info_span!("check", request_id = %uuid::Uuid::new_v4());

    async move {
        let request = CheckRequest::from_body(&body).map_err(|e| {
            tracing::warn!(error = %e, "malformed check request");
            ApiError::MalformedRequest(e)
        })?;

        let result = check_card(&request.card);
        tracing::info!(is_valid = result.is_valid, network = %result.network, "card checked");

        Ok(HttpResponse::Ok().json(result))
    }
    .instrument(span)
    .await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/check", web::post().to(check));
}
