//! Public API handlers.

mod pulls;
mod teams;
mod users;


use actix_web::web;

use crate::{Result, ServerError};

pub(crate) fn configure_api_handlers(cfg: &mut web::ServiceConfig) {
    cfg.route("/team/add", web::post().to(teams::add_team))
        .route("/team/get", web::get().to(teams::get_team))
        .route("/users/setIsActive", web::post().to(users::set_is_active))
        .route("/users/getReview", web::get().to(users::get_review))
        .route("/pullRequest/create", web::post().to(pulls::create))
        .route("/pullRequest/merge", web::post().to(pulls::merge))
        .route("/pullRequest/reassign", web::post().to(pulls::reassign));
}

/// Extract a non-empty query parameter.
fn require_param(name: &str, value: &Option<String>) -> Result<String> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(ServerError::MissingParameter { name: name.into() }),
    }
}

/// Reject empty identifiers in request bodies.
fn require_field(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        Err(ServerError::InvalidInput {
            message: format!("{name} must not be empty"),
        })
    } else {
        Ok(())
    }
}
