use actix_web::{web, HttpResponse};
use revbot_core::use_cases::{
    pulls::{CreatePullRequestInterface, MergePullRequestInterface},
    reviews::ReassignReviewerInterface,
};
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use super::require_field;
use crate::{
    metrics::{
        PULL_REQUESTS_CREATED, PULL_REQUESTS_MERGED, REVIEWERS_ASSIGNED, REVIEWERS_REASSIGNED,
    },
    server::AppContext,
    Result,
};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CreatePullRequestJson {
    pull_request_id: String,
    pull_request_name: String,
    author_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct MergePullRequestJson {
    pull_request_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ReassignJson {
    pull_request_id: String,
    old_user_id: String,
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    author_id = data.author_id
))]
pub(crate) async fn create(
    ctx: web::Data<AppContext>,
    data: web::Json<CreatePullRequestJson>,
) -> Result<HttpResponse> {
    require_field("pull_request_id", &data.pull_request_id)?;
    require_field("author_id", &data.author_id)?;

    let create_pull_request: &dyn CreatePullRequestInterface = ctx.core_module.resolve_ref();
    let pr = create_pull_request
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.pull_request_name,
            &data.author_id,
        )
        .await?;

    PULL_REQUESTS_CREATED.inc();
    REVIEWERS_ASSIGNED.inc_by(pr.assigned_reviewers.len() as u64);

    Ok(HttpResponse::Created().json(serde_json::json!({ "pr": pr })))
}

#[tracing::instrument(skip_all, fields(pull_request_id = data.pull_request_id))]
pub(crate) async fn merge(
    ctx: web::Data<AppContext>,
    data: web::Json<MergePullRequestJson>,
) -> Result<HttpResponse> {
    require_field("pull_request_id", &data.pull_request_id)?;

    let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
    let merged = merge_pull_request
        .run(&ctx.as_core_context(), &data.pull_request_id)
        .await?;

    if merged.newly_merged {
        PULL_REQUESTS_MERGED.inc();
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "pr": merged.pull_request })))
}

#[tracing::instrument(skip_all, fields(
    pull_request_id = data.pull_request_id,
    old_user_id = data.old_user_id
))]
pub(crate) async fn reassign(
    ctx: web::Data<AppContext>,
    data: web::Json<ReassignJson>,
) -> Result<HttpResponse> {
    require_field("pull_request_id", &data.pull_request_id)?;
    require_field("old_user_id", &data.old_user_id)?;

    let reassign_reviewer: &dyn ReassignReviewerInterface = ctx.core_module.resolve_ref();
    let result = reassign_reviewer
        .run(
            &ctx.as_core_context(),
            &data.pull_request_id,
            &data.old_user_id,
        )
        .await?;

    REVIEWERS_REASSIGNED.inc();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "pr": result.pull_request,
        "replaced_by": result.replaced_by,
    })))
}
