use std::{io::Write, sync::Arc};

use clap::Parser;
use revbot_config::Config;
use revbot_core::{CoreModule, RandomSource};
use revbot_database_interface::DbService;
use revbot_database_memory::MemoryDb;
use revbot_models::User;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
    Result,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
    pub db_service: MemoryDb,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version().unwrap(),
            core_module: CoreModule::builder().build(),
            db_service: MemoryDb::new(),
        }
    }

    /// Create a team with `(user_id, is_active)` members.
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

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            db_service: Box::new(self.db_service),
            random: RandomSource::from_seed(1),
            writer,
        }
    }
}

async fn run_command(ctx: CommandContextTest, command_args: &[&str]) -> (Result<()>, String) {
    let buf = Arc::new(RwLock::new(Vec::new()));

    let result = {
        let command_args = {
            let mut tmp_args = vec!["bot"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => {
                CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone())).await
            }
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    };

    let vec = buf.read().await.to_vec();
    (result, std::str::from_utf8(&vec).unwrap().to_string())
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, output) = run_command(ctx, command_args).await;
    result.unwrap();
    output
}

/// Run a command expected to fail, returning its error message.
pub(crate) async fn test_command_error(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let (result, _) = run_command(ctx, command_args).await;
    result.unwrap_err().to_string()
}
