use actix_web::{web, HttpResponse};
use revbot_core::use_cases::teams::{CreateTeamInterface, GetTeamInterface};
use revbot_models::TeamMember;
use serde::{Deserialize, Serialize};
use shaku::HasComponent;

use super::{require_field, require_param};
use crate::{server::AppContext, Result};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AddTeamJson {
    team_name: String,
    members: Vec<TeamMember>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TeamQuery {
    team_name: Option<String>,
}

#[tracing::instrument(skip_all, fields(team_name = data.team_name))]
pub(crate) async fn add_team(
    ctx: web::Data<AppContext>,
    data: web::Json<AddTeamJson>,
) -> Result<HttpResponse> {
    require_field("team_name", &data.team_name)?;
    for member in &data.members {
        require_field("user_id", &member.user_id)?;
    }

    let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
    let team = create_team
        .run(&ctx.as_core_context(), &data.team_name, &data.members)
        .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({ "team": team })))
}

#[tracing::instrument(skip_all, fields(team_name = ?query.team_name))]
pub(crate) async fn get_team(
    ctx: web::Data<AppContext>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse> {
    let team_name = require_param("team_name", &query.team_name)?;

    let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
    let team = get_team.run(&ctx.as_core_context(), &team_name).await?;

    Ok(HttpResponse::Ok().json(team))
}
