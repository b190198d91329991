use axum::extract::FromRequestParts;

use crate::error::ApiError;

pub mod filme;

/// Path parameters, rejected with the standard error body
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);
