use pretty_assertions::assert_eq;
use revbot_database_interface::DatabaseError;
use revbot_models::User;

use crate::testcase::db_test_case;

fn user(user_id: &str, team_name: &str, is_active: bool) -> User {
    User {
        user_id: user_id.into(),
        username: format!("name-{user_id}"),
        team_name: team_name.into(),
        is_active,
    }
}

#[tokio::test]
async fn upsert() {
    db_test_case("user_upsert", |db| async move {
        assert!(matches!(
            db.users_upsert(user("u1", "backend", true)).await,
            Err(DatabaseError::UnknownTeam(_))
        ));

        db.teams_create("backend").await?;
        db.teams_create("payments").await?;

        let created = db.users_upsert(user("u1", "backend", true)).await?;
        assert_eq!(created, user("u1", "backend", true));
        assert!(db.users_exists("u1").await?);

        // Upserting again moves the user and overwrites its fields.
        let moved = db
            .users_upsert(User {
                username: "Alice".into(),
                ..user("u1", "payments", false)
            })
            .await?;
        assert_eq!(
            moved,
            User {
                username: "Alice".into(),
                ..user("u1", "payments", false)
            }
        );
        assert_eq!(db.users_get_expect("u1").await?, moved);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("user_update", |db| async move {
        db.teams_create("backend").await?;

        assert!(matches!(
            db.users_update(user("u1", "backend", true)).await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert!(matches!(
            db.users_get_expect("u1").await,
            Err(DatabaseError::UnknownUser(_))
        ));
        assert_eq!(db.users_get("u1").await?, None);

        db.users_upsert(user("u1", "backend", true)).await?;
        let updated = db.users_update(user("u1", "backend", false)).await?;
        assert!(!updated.is_active);
        assert_eq!(db.users_get_expect("u1").await?, updated);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_active_in_team() {
    db_test_case("user_list_active_in_team", |db| async move {
        db.teams_create("backend").await?;
        db.teams_create("payments").await?;

        db.users_upsert(user("u3", "backend", true)).await?;
        db.users_upsert(user("u1", "backend", true)).await?;
        db.users_upsert(user("u2", "backend", false)).await?;
        db.users_upsert(user("u4", "backend", true)).await?;
        db.users_upsert(user("u5", "payments", true)).await?;

        let active: Vec<_> = db
            .users_list_active_in_team("backend", "u4")
            .await?
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(active, vec!["u1", "u3"]);

        assert_eq!(db.users_list_active_in_team("unknown", "u1").await?, vec![]);

        Ok(())
    })
    .await;
}
