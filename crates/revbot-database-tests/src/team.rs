use pretty_assertions::assert_eq;
use revbot_database_interface::DatabaseError;
use revbot_models::{Team, TeamMember, User};

use crate::testcase::db_test_case;

#[tokio::test]
async fn create() {
    db_test_case("team_create", |db| async move {
        assert!(!db.teams_exists("backend").await?);

        db.teams_create("backend").await?;
        assert!(db.teams_exists("backend").await?);

        assert!(matches!(
            db.teams_create("backend").await,
            Err(DatabaseError::DuplicateTeam(_))
        ));

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn get_with_members() {
    db_test_case("team_get_with_members", |db| async move {
        assert_eq!(db.teams_get_with_members("backend").await?, None);
        assert!(matches!(
            db.teams_get_with_members_expect("backend").await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create("backend").await?;
        assert_eq!(
            db.teams_get_with_members_expect("backend").await?,
            Team {
                team_name: "backend".into(),
                members: vec![]
            }
        );

        db.teams_create("payments").await?;
        for (user_id, team_name, is_active) in [
            ("u2", "backend", false),
            ("u1", "backend", true),
            ("u3", "payments", true),
        ] {
            db.users_upsert(User {
                user_id: user_id.into(),
                username: format!("name-{user_id}"),
                team_name: team_name.into(),
                is_active,
            })
            .await?;
        }

        assert_eq!(
            db.teams_get_with_members_expect("backend").await?,
            Team {
                team_name: "backend".into(),
                members: vec![
                    TeamMember {
                        user_id: "u1".into(),
                        username: "name-u1".into(),
                        is_active: true,
                    },
                    TeamMember {
                        user_id: "u2".into(),
                        username: "name-u2".into(),
                        is_active: false,
                    }
                ]
            }
        );

        Ok(())
    })
    .await;
}
