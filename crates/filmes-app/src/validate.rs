use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use garde::{Report, Validate};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use crate::error::ApiError;
use crate::state::AppState;

/// Extractor that validates inner payload with garde
#[derive(Debug, Clone, Copy, Default)]
pub struct Garde<E>(pub E);

impl<E> Deref for Garde<E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E> Garde<E> {
    pub fn into_inner(self) -> E {
        self.0
    }
}

#[derive(Debug)]
pub enum ValidationRejection<V, E> {
    /// Payload was parsed, but failed validation rules
    Valid(V),
    /// Inner extractor failed
    Inner(E),
}

impl<V: Display, E: Display> Display for ValidationRejection<V, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationRejection::Valid(errors) => write!(f, "{errors}"),
            ValidationRejection::Inner(error) => write!(f, "{error}"),
        }
    }
}

impl<V: Error + 'static, E: Error + 'static> Error for ValidationRejection<V, E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ValidationRejection::Valid(ve) => Some(ve),
            ValidationRejection::Inner(e) => Some(e),
        }
    }
}

pub type GardeRejection<E> = ValidationRejection<Report, E>;

impl<E> From<Report> for GardeRejection<E> {
    fn from(value: Report) -> Self {
        Self::Valid(value)
    }
}

/// Only one violation is reported, as `[field] message`.
/// Field paths are compared by name, so with several invalid fields the
/// alphabetically first one wins.
pub fn first_violation(report: &Report) -> String {
    report
        .iter()
        .map(|(path, error)| (path.to_string(), error))
        .min_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(path, error)| format!("[{path}] {}", error.message()))
        .unwrap_or_else(|| "Invalid input".to_string())
}

impl<E: IntoResponse + Display> IntoResponse for GardeRejection<E> {
    fn into_response(self) -> Response {
        match self {
            ValidationRejection::Valid(report) => {
                let message = first_violation(&report);
                tracing::debug!("Validation failed: {report}");
                ApiError::Validation(message).into_response()
            }
            ValidationRejection::Inner(e) => {
                let message = e.to_string();
                let status = e.into_response().status();
                ApiError::InvalidBody(status, message).into_response()
            }
        }
    }
}

impl<Extractor, T> FromRequest<AppState> for Garde<Extractor>
where
    T: Validate<Context = ()>,
    Extractor: Deref<Target = T> + FromRequest<AppState>,
    <Extractor as FromRequest<AppState>>::Rejection: Display,
{
    type Rejection = GardeRejection<<Extractor as FromRequest<AppState>>::Rejection>;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let inner = Extractor::from_request(req, state)
            .await
            .map_err(GardeRejection::Inner)?;

        inner.deref().validate()?;
        Ok(Garde(inner))
    }
}
