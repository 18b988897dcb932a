use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Reasons a remote ranking attempt produced nothing usable
///
/// None of these reach the caller of the recommender; every variant sends
/// resolution down the local scoring path.
#[derive(thiserror::Error, Debug)]
pub enum RankingError {
    #[error("Ranking service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ranking service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Ranking service protocol error: {0}")]
    Protocol(String),

    #[error("Ranking service returned no usable recommendations")]
    EmptyResult,

    #[error("Ranking request cancelled by caller")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let response = AppError::InvalidInput("limit too large".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_ranking_error_messages() {
        assert_eq!(
            RankingError::Timeout(Duration::from_millis(1500)).to_string(),
            "Ranking service did not answer within 1.5s"
        );
        assert_eq!(
            RankingError::Protocol("success flag false".to_string()).to_string(),
            "Ranking service protocol error: success flag false"
        );
    }
}
