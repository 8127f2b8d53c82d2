use pretty_assertions::assert_eq;
use revbot_database_interface::{DatabaseError, DbService};
use revbot_models::{PullRequest, PullRequestStatus, User};
use time::OffsetDateTime;

use crate::testcase::db_test_case;

async fn seed_team(
    db: &dyn DbService,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    db.teams_create("backend").await?;
    for user_id in ["u1", "u2", "u3", "u4"] {
        db.users_upsert(User {
            user_id: user_id.into(),
            username: format!("name-{user_id}"),
            team_name: "backend".into(),
            is_active: true,
        })
        .await?;
    }

    Ok(())
}

fn pull_request(id: &str, author_id: &str, reviewers: &[&str]) -> PullRequest {
    PullRequest {
        id: id.into(),
        title: format!("Title {id}"),
        author_id: author_id.into(),
        assigned_reviewers: reviewers.iter().map(|&r| r.into()).collect(),
        ..Default::default()
    }
}

fn sorted_reviewers(pr: &PullRequest) -> Vec<String> {
    let mut reviewers = pr.assigned_reviewers.clone();
    reviewers.sort();
    reviewers
}

#[tokio::test]
async fn create() {
    db_test_case("pull_request_create", |db| async move {
        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u1", &[])).await,
            Err(DatabaseError::UnknownUser(_))
        ));

        seed_team(db.as_ref()).await?;

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u1", &["u9"]))
                .await,
            Err(DatabaseError::UnknownUser(_))
        ));
        // Nothing must be left behind by the failed creation.
        assert!(!db.pull_requests_exists("pr-1").await?);

        let pr = db
            .pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;
        assert_eq!(pr.id, "pr-1");
        assert_eq!(pr.title, "Title pr-1");
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert_eq!(sorted_reviewers(&pr), vec!["u2", "u3"]);
        assert!(pr.created_at.is_some());
        assert_eq!(pr.merged_at, None);

        assert!(matches!(
            db.pull_requests_create(pull_request("pr-1", "u1", &[])).await,
            Err(DatabaseError::DuplicatePullRequest(_))
        ));

        let empty = db
            .pull_requests_create(pull_request("pr-2", "u1", &[]))
            .await?;
        assert_eq!(empty.assigned_reviewers, Vec::<String>::new());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn update() {
    db_test_case("pull_request_update", |db| async move {
        assert!(matches!(
            db.pull_requests_update(pull_request("pr-1", "u1", &[]))
                .await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(db.as_ref()).await?;
        let pr = db
            .pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;

        let merged_at = OffsetDateTime::from_unix_timestamp(1_700_000_000)?;
        let updated = db
            .pull_requests_update(PullRequest {
                status: PullRequestStatus::Merged,
                merged_at: Some(merged_at),
                // Reviewers are not touched by an update.
                assigned_reviewers: vec![],
                ..pr
            })
            .await?;

        assert_eq!(updated.status, PullRequestStatus::Merged);
        assert_eq!(updated.merged_at, Some(merged_at));
        assert_eq!(updated.assigned_reviewers, vec!["u2"]);
        assert_eq!(db.pull_requests_get_expect("pr-1").await?, updated);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn merge() {
    db_test_case("pull_request_merge", |db| async move {
        let merged_at = OffsetDateTime::from_unix_timestamp(1_700_000_000)?;
        assert!(matches!(
            db.pull_requests_merge("pr-1", merged_at).await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;

        assert!(db.pull_requests_merge("pr-1", merged_at).await?);
        // A second merge leaves the first timestamp in place.
        let later = OffsetDateTime::from_unix_timestamp(1_800_000_000)?;
        assert!(!db.pull_requests_merge("pr-1", later).await?);

        let pr = db.pull_requests_get_expect("pr-1").await?;
        assert_eq!(pr.status, PullRequestStatus::Merged);
        assert_eq!(pr.merged_at, Some(merged_at));
        assert_eq!(pr.assigned_reviewers, vec!["u2"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn merged_reviewers_are_frozen() {
    db_test_case("pull_request_merged_reviewers_are_frozen", |db| async move {
        seed_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2"]))
            .await?;
        db.pull_requests_merge("pr-1", OffsetDateTime::from_unix_timestamp(1_700_000_000)?)
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await,
            Err(DatabaseError::PullRequestMerged(_))
        ));
        assert!(matches!(
            db.pull_requests_replace_reviewers("pr-1", &["u4".into()])
                .await,
            Err(DatabaseError::PullRequestMerged(_))
        ));
        assert_eq!(
            db.pull_requests_get_expect("pr-1").await?.assigned_reviewers,
            vec!["u2"]
        );

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_reviewer() {
    db_test_case("pull_request_replace_reviewer", |db| async move {
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u4").await,
            Err(DatabaseError::UnknownPullRequest(_))
        ));

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u1", "u4").await,
            Err(DatabaseError::UnknownAssignment(_, _))
        ));
        assert!(matches!(
            db.pull_requests_replace_reviewer("pr-1", "u2", "u3").await,
            Err(DatabaseError::DuplicateAssignment(_, _))
        ));

        let pr = db
            .pull_requests_replace_reviewer("pr-1", "u2", "u4")
            .await?;
        assert_eq!(sorted_reviewers(&pr), vec!["u3", "u4"]);

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn replace_reviewers() {
    db_test_case("pull_request_replace_reviewers", |db| async move {
        seed_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-1", "u1", &["u2", "u3"]))
            .await?;

        assert!(matches!(
            db.pull_requests_replace_reviewers("pr-1", &["u4".into(), "u9".into()])
                .await,
            Err(DatabaseError::UnknownUser(_))
        ));
        // The failed replacement is rolled back.
        assert_eq!(
            sorted_reviewers(&db.pull_requests_get_expect("pr-1").await?),
            vec!["u2", "u3"]
        );

        let pr = db
            .pull_requests_replace_reviewers("pr-1", &["u4".into()])
            .await?;
        assert_eq!(pr.assigned_reviewers, vec!["u4"]);

        let pr = db.pull_requests_replace_reviewers("pr-1", &[]).await?;
        assert_eq!(pr.assigned_reviewers, Vec::<String>::new());

        Ok(())
    })
    .await;
}

#[tokio::test]
async fn list_by_reviewer() {
    db_test_case("pull_request_list_by_reviewer", |db| async move {
        assert_eq!(db.pull_requests_list_by_reviewer("u2").await?, vec![]);

        seed_team(db.as_ref()).await?;
        db.pull_requests_create(pull_request("pr-2", "u1", &["u2"]))
            .await?;
        db.pull_requests_create(pull_request("pr-1", "u3", &["u2", "u4"]))
            .await?;
        db.pull_requests_create(pull_request("pr-3", "u1", &["u4"]))
            .await?;

        let ids: Vec<_> = db
            .pull_requests_list_by_reviewer("u2")
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-1", "pr-2"]);

        db.pull_requests_replace_reviewer("pr-2", "u2", "u3")
            .await?;
        let ids: Vec<_> = db
            .pull_requests_list_by_reviewer("u2")
            .await?
            .into_iter()
            .map(|pr| pr.id)
            .collect();
        assert_eq!(ids, vec!["pr-1"]);

        Ok(())
    })
    .await;
}
