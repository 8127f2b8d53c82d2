use actix_web::{web, HttpResponse};
use revbot_core::use_cases::users::{ListUserReviewsInterface, SetUserActiveInterface};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use super::{require_field, require_param};
use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SetIsActiveJson {
    user_id: String,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserQuery {
    user_id: Option<String>,
}

#[tracing::instrument(skip_all, fields(user_id = data.user_id, is_active = data.is_active))]
pub(crate) async fn set_is_active(
    ctx: web::Data<AppContext>,
    data: web::Json<SetIsActiveJson>,
) -> Result<HttpResponse> {
    require_field("user_id", &data.user_id)?;

    let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
    let user = set_user_active
        .run(&ctx.as_core_context(), &data.user_id, data.is_active)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "user": user })))
}

#[tracing::instrument(skip_all, fields(user_id = ?query.user_id))]
pub(crate) async fn get_review(
    ctx: web::Data<AppContext>,
    query: web::Query<UserQuery>,
) -> Result<HttpResponse> {
    let user_id = require_param("user_id", &query.user_id)?;

    let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
    let pull_requests = list_user_reviews
        .run(&ctx.as_core_context(), &user_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user_id": user_id,
        "pull_requests": pull_requests,
    })))
}
