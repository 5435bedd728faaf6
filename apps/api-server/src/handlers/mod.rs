//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::{HttpRequest, error, http::header, web};

use crate::middleware::error::AppError;

/// Rejected JSON bodies become RFC 7807 responses: 415 for a non-JSON
/// content type, 400 otherwise.
fn json_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    match err {
        error::JsonPayloadError::ContentType => {
            let content_type = req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("none");
            AppError::UnsupportedMediaType(format!(
                "Unsupported media type \"{}\" in request.",
                content_type
            ))
            .into()
        }
        other => AppError::BadRequest(format!("JSON parse error - {}", other)).into(),
    }
}

/// Undecodable query strings become RFC 7807 400 responses.
fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected query string");
    AppError::BadRequest(err.to_string()).into()
}

/// An `{id}` that is not an integer cannot name a post.
fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Unresolvable path parameter");
    AppError::NotFound.into()
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/health", web::get().to(health::health_check))
        .route("/posts/", web::get().to(posts::list_posts))
        .route("/post/create/", web::post().to(posts::create_post))
        .route("/post/{id}/", web::get().to(posts::get_post))
        .service(
            web::resource("/post/{id}/update/")
                .route(web::put().to(posts::update_post))
                .route(web::patch().to(posts::partial_update_post)),
        )
        .route("/post/{id}/delete/", web::delete().to(posts::delete_post));
}
