use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::JsonRejection, Form, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request body read as JSON, or as form fields of the same names when the
/// bytes are not valid JSON for `T`. Form fields may arrive urlencoded or as
/// `multipart/form-data`; file parts are skipped.
///
/// Used by login, signup and profile update, which accept all three encodings.
#[derive(Debug, Clone)]
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_multipart(req.headers()) {
            let encoded = multipart_text_fields(req, state).await?;
            return decode_form(Bytes::from(encoded), state).await.map(JsonOrForm);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_request("Invalid request data"))?;

        let json_err = match serde_json::from_slice::<T>(&bytes) {
            Ok(value) => return Ok(JsonOrForm(value)),
            Err(e) => e,
        };
        tracing::debug!("Body is not JSON ({}), trying form fields", json_err);

        decode_form(bytes, state).await.map(JsonOrForm)
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Text parts of a multipart body, re-encoded as `application/x-www-form-urlencoded`
async fn multipart_text_fields<S>(req: Request, state: &S) -> Result<String, ApiError>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(req, state)
        .await
        .map_err(|_| ApiError::bad_request("Invalid request data"))?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("Invalid request data"))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        // uploads are not stored
        if field.file_name().is_some() {
            tracing::debug!("Skipping file part '{}'", name);
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|_| ApiError::bad_request("Invalid request data"))?;
        pairs.push((name, value));
    }
    let mut encoded = url::form_urlencoded::Serializer::new(String::new());
    encoded.extend_pairs(pairs.iter());
    Ok(encoded.finish())
}

async fn decode_form<T, S>(bytes: Bytes, state: &S) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let form_request = Request::builder()
        .method(Method::POST)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(bytes))
        .map_err(|_| ApiError::bad_request("Invalid request data"))?;

    let Form(value) = Form::<T>::from_request(form_request, state)
        .await
        .map_err(|_| ApiError::bad_request("Invalid request data"))?;
    Ok(value)
}

/// Unwrap a JSON body taken as `Result<Json<T>, JsonRejection>`, turning a
/// rejection into a 400 carrying `message`.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>, message: &str) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::bad_request(message))
        }
    }
}
