use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootResponseData {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: String,
}

pub async fn root() -> ApiSuccess<RootResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        RootResponseData {
            message: "Todo API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "healthy".to_string(),
        },
    )
}
