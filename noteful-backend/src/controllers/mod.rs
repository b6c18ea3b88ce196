//! HTTP controllers. Each module exposes a `config` function that mounts its
//! routes on an actix `ServiceConfig`.

use crate::error::{ApiError, ApiResult};
use crate::models::Resource;
use crate::sanitize::sanitize;

/// Builds an initialized test service from `web::Data<AppState>`, with resource
/// routes mounted at the root.
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .configure(|cfg| crate::configure(cfg, "")),
        )
    };
}

pub mod folders;
pub mod health;
pub mod notes;

/// Ids that are not integers cannot name a row, so they read as not-found.
fn parse_id(raw: &str, resource: Resource) -> ApiResult<i64> {
    raw.trim().parse().map_err(|_| ApiError::NotFound(resource))
}

/// Sanitized value of a required, non-blank text field
fn required_text(value: Option<&str>, field: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(sanitize(v)),
        _ => Err(ApiError::missing_field(field)),
    }
}

/// Like [`required_text`], but absence is fine: only a blank value is rejected.
fn optional_required_text(value: Option<&str>, field: &str) -> ApiResult<Option<String>> {
    value.map(|v| required_text(Some(v), field)).transpose()
}
