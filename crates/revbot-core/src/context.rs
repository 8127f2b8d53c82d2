use revbot_config::Config;
use revbot_database_interface::DbService;

use crate::{CoreModule, RandomSource};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub random: &'a RandomSource,
}

#[cfg(any(test, feature = "testkit"))]
pub mod tests {
    use revbot_config::Config;
    use revbot_database_interface::DbService;
    use revbot_database_memory::MemoryDb;
    use revbot_models::User;

    use crate::{CoreContext, CoreModule, RandomSource};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub random: RandomSource,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            Self {
                config: Config::from_env_no_version().unwrap(),
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
                random: RandomSource::from_seed(1),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                random: &self.random,
            }
        }

        /// Same context, backed by another gateway.
        #[allow(dead_code)]
        pub fn with_db_service<'a>(&'a self, db_service: &'a dyn DbService) -> CoreContext<'a> {
            CoreContext {
                db_service,
                ..self.as_context()
            }
        }

        /// Create a team with `(user_id, is_active)` members.
        #[allow(dead_code)]
        pub async fn create_team(&self, team_name: &str, members: &[(&str, bool)]) {
            self.db_service.teams_create(team_name).await.unwrap();
            for (user_id, is_active) in members {
                self.db_service
                    .users_upsert(User {
                        user_id: (*user_id).into(),
                        username: format!("name-{user_id}"),
                        team_name: team_name.into(),
                        is_active: *is_active,
                    })
                    .await
                    .unwrap();
            }
        }
    }
}
