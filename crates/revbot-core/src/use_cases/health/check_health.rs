use async_trait::async_trait;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CheckHealthInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<()>;
}

#[derive(Component)]
#[shaku(interface = CheckHealthInterface)]
pub(crate) struct CheckHealth;

#[async_trait]
impl CheckHealthInterface for CheckHealth {
    #[tracing::instrument(skip(self, ctx))]
    async fn run<'a>(&self, ctx: &CoreContext<'a>) -> Result<()> {
        Ok(ctx.db_service.health_check().await?)
    }
}
