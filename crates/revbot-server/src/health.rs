use actix_web::{web, HttpResponse};
use revbot_core::use_cases::health::CheckHealthInterface;
use shaku::HasComponent;

use crate::{server::AppContext, Result, ServerError};

pub(crate) async fn health_check_route(ctx: web::Data<AppContext>) -> Result<HttpResponse> {
    let check_health: &dyn CheckHealthInterface = ctx.core_module.resolve_ref();
    check_health
        .run(&ctx.as_core_context())
        .await
        .map_err(|e| ServerError::Unavailable { source: e })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}
