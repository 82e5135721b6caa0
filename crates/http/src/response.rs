//! Success and failure envelopes shared by every endpoint.
//!
//! Every JSON body has the shape `{"status": "success"|"fail", "message"?, "data"?}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
}

/// Wire envelope around a response payload.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// A successful response: status code plus `success` envelope.
#[derive(Debug)]
pub struct ApiResponse<T = ()> {
    code: StatusCode,
    body: Envelope<T>,
}

impl ApiResponse<()> {
    /// Success with a message and no payload
    pub fn message(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            body: Envelope {
                status: Status::Success,
                message: Some(message.into()),
                data: None,
            },
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Success carrying `data`
    pub fn data(code: StatusCode, data: T) -> Self {
        Self {
            code,
            body: Envelope {
                status: Status::Success,
                message: None,
                data: Some(data),
            },
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn code(&self) -> StatusCode {
        self.code
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self.body)).into_response()
    }
}
