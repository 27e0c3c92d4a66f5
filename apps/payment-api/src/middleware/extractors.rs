//! Extractor error hooks - route body and parameter failures into `AppError`.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, web};

use super::error::AppError;

/// Register the extractor configs on the app.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::MalformedInput(err.to_string()).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> Error {
    let names: Vec<&str> = req.match_info().iter().map(|(name, _)| name).collect();
    let parameter = if names.is_empty() {
        "path".to_string()
    } else {
        names.join(", ")
    };
    AppError::TypeMismatch {
        parameter,
        reason: err.to_string(),
    }
    .into()
}

fn query_error(err: QueryPayloadError, req: &HttpRequest) -> Error {
    let reason = err.to_string();
    AppError::TypeMismatch {
        parameter: failed_query_parameter(&reason, req.query_string()),
        reason,
    }
    .into()
}

/// Name of the query parameter a deserialization failure is about.
///
/// Field-level messages name the field in backticks ("missing field `limit`").
/// Value-level ones ("invalid digit found in string") do not, so a lone key
/// is taken to be the culprit; otherwise every key is named.
fn failed_query_parameter(reason: &str, query: &str) -> String {
    if let Some(field) = reason.split('`').nth(1).filter(|f| !f.is_empty()) {
        return field.to_string();
    }

    let names: Vec<&str> = query
        .split('&')
        .filter_map(|pair| pair.split('=').next())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        "query".to_string()
    } else {
        names.join(", ")
    }
}
