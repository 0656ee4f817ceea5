use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decode a JSON request body, turning syntax and shape errors into a 400.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_json(format!("Bad request: {}", e)))
}

/// Run CPU-heavy work (password hashing) off the async executor.
pub async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!("Blocking task failed: {}", e);
        ApiError::internal_server_error("Internal server error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let err = decode_json::<Sample>(b"{not json").unwrap_err();
        assert!(matches!(err, ApiError::InvalidJson(_)));

        let err = decode_json::<Sample>(br#"{"other": 1}"#).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);

        assert_eq!(decode_json::<Sample>(br#"{"name": "a"}"#).unwrap().name, "a");
    }
}
