use async_trait::async_trait;
use revbot_database_interface::{DatabaseError, DbService, Result};
use revbot_models::{PullRequest, PullRequestStatus, Team, TeamMember, User};
use sqlx::{PgPool, Postgres, Row, Transaction};
use time::OffsetDateTime;

use crate::row::{PullRequestRow, UserRow};

const PULL_REQUEST_SELECT: &str = r#"
    SELECT
        pr.id,
        pr.title,
        pr.author_id,
        pr.status,
        pr.created_at,
        pr.merged_at,
        COALESCE(
            array_agg(r.user_id::text ORDER BY r.assigned_at, r.user_id)
                FILTER (WHERE r.user_id IS NOT NULL),
            '{}'::text[]
        ) AS assigned_reviewers
    FROM pull_request pr
    LEFT JOIN pull_request_reviewer r ON r.pull_request_id = pr.id
"#;

pub struct PostgresDb {
    pool: PgPool,
}

impl PostgresDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn wrap_row_not_found(e: sqlx::Error, target: DatabaseError) -> DatabaseError {
        if let sqlx::Error::RowNotFound = e {
            target
        } else {
            DatabaseError::ImplementationError { source: e.into() }
        }
    }

    /// Map constraint violations to their domain counterpart.
    fn wrap_constraint_error(
        e: sqlx::Error,
        on_unique: DatabaseError,
        on_foreign_key: DatabaseError,
    ) -> DatabaseError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return on_unique;
            } else if db_err.is_foreign_key_violation() {
                return on_foreign_key;
            }
        }

        DatabaseError::ImplementationError { source: e.into() }
    }

    fn wrap_implementation_error(e: sqlx::Error) -> DatabaseError {
        DatabaseError::ImplementationError { source: e.into() }
    }

    /// Lock an open pull request row until the end of the transaction.
    async fn lock_pull_request(
        tx: &mut Transaction<'_, Postgres>,
        pull_request_id: &str,
    ) -> Result<()> {
        let status: String = sqlx::query(
            r#"
            SELECT status
            FROM pull_request
            WHERE id = $1
            FOR UPDATE
        "#,
        )
        .bind(pull_request_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(pull_request_id.into()))
        })?
        .get(0);

        if status == PullRequestStatus::Merged.to_str() {
            return Err(DatabaseError::PullRequestMerged(pull_request_id.into()));
        }

        Ok(())
    }

    async fn insert_reviewer(
        tx: &mut Transaction<'_, Postgres>,
        pull_request_id: &str,
        user_id: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pull_request_reviewer
            (
                pull_request_id,
                user_id
            )
            VALUES
            (
                $1,
                $2
            );
        "#,
        )
        .bind(pull_request_id)
        .bind(user_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            Self::wrap_constraint_error(
                e,
                DatabaseError::DuplicateAssignment(pull_request_id.into(), user_id.into()),
                DatabaseError::UnknownUser(user_id.into()),
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl DbService for PostgresDb {
    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1;")
            .execute(&self.pool)
            .await
            .map_err(Self::wrap_implementation_error)?;

        Ok(())
    }

    /////////
    // Teams

    #[tracing::instrument(skip(self))]
    async fn teams_exists(&self, team_name: &str) -> Result<bool> {
        sqlx::query(
            r#"
            SELECT EXISTS(SELECT 1 FROM team WHERE name = $1)
        "#,
        )
        .bind(team_name)
        .fetch_one(&self.pool)
        .await
        .map(|r| r.get::<bool, _>(0))
        .map_err(Self::wrap_implementation_error)
    }

    #[tracing::instrument(skip(self))]
    async fn teams_create(&self, team_name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO team
            (
                name
            )
            VALUES
            (
                $1
            );
        "#,
        )
        .bind(team_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            Self::wrap_constraint_error(
                e,
                DatabaseError::DuplicateTeam(team_name.into()),
                DatabaseError::UnknownTeam(team_name.into()),
            )
        })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn teams_get_with_members(&self, team_name: &str) -> Result<Option<Team>> {
        if !self.teams_exists(team_name).await? {
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM team_user
                WHERE team_name = $1
                ORDER BY user_id
            "#,
        )
        .bind(team_name)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(Some(Team {
            team_name: team_name.into(),
            members: rows
                .into_iter()
                .map(|r| TeamMember::from(User::from(r)))
                .collect(),
        }))
    }

    /////////
    // Users

    #[tracing::instrument(skip(self))]
    async fn users_exists(&self, user_id: &str) -> Result<bool> {
        sqlx::query(
            r#"
            SELECT EXISTS(SELECT 1 FROM team_user WHERE user_id = $1)
        "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map(|r| r.get::<bool, _>(0))
        .map_err(Self::wrap_implementation_error)
    }

    #[tracing::instrument(skip(self))]
    async fn users_upsert(&self, instance: User) -> Result<User> {
        let user_id: String = sqlx::query(
            r#"
            INSERT INTO team_user
            (
                user_id,
                username,
                team_name,
                is_active
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4
            )
            ON CONFLICT (user_id) DO UPDATE
            SET username = EXCLUDED.username,
                team_name = EXCLUDED.team_name,
                is_active = EXCLUDED.is_active
            RETURNING user_id;
        "#,
        )
        .bind(&instance.user_id)
        .bind(&instance.username)
        .bind(&instance.team_name)
        .bind(instance.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            Self::wrap_constraint_error(
                e,
                DatabaseError::ImplementationError {
                    source: format!("Conflicting user {}", instance.user_id).into(),
                },
                DatabaseError::UnknownTeam(instance.team_name.clone()),
            )
        })?
        .get(0);

        self.users_get_expect(&user_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM team_user
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn users_update(&self, instance: User) -> Result<User> {
        let user_id: String = sqlx::query(
            r#"
            UPDATE team_user
            SET username = $1,
                team_name = $2,
                is_active = $3
            WHERE user_id = $4
            RETURNING user_id;
        "#,
        )
        .bind(&instance.username)
        .bind(&instance.team_name)
        .bind(instance.is_active)
        .bind(&instance.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => DatabaseError::UnknownUser(instance.user_id.clone()),
            e => Self::wrap_constraint_error(
                e,
                DatabaseError::ImplementationError {
                    source: format!("Conflicting user {}", instance.user_id).into(),
                },
                DatabaseError::UnknownTeam(instance.team_name.clone()),
            ),
        })?
        .get(0);

        self.users_get_expect(&user_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn users_list_active_in_team(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT *
                FROM team_user
                WHERE team_name = $1
                AND is_active = TRUE
                AND user_id <> $2
                ORDER BY user_id
            "#,
        )
        .bind(team_name)
        .bind(exclude_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /////////////////
    // Pull requests

    #[tracing::instrument(skip(self))]
    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        sqlx::query(
            r#"
            SELECT EXISTS(SELECT 1 FROM pull_request WHERE id = $1)
        "#,
        )
        .bind(pull_request_id)
        .fetch_one(&self.pool)
        .await
        .map(|r| r.get::<bool, _>(0))
        .map_err(Self::wrap_implementation_error)
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::wrap_implementation_error)?;

        sqlx::query(
            r#"
            INSERT INTO pull_request
            (
                id,
                title,
                author_id,
                status,
                created_at,
                merged_at
            )
            VALUES
            (
                $1,
                $2,
                $3,
                $4,
                COALESCE($5, NOW()),
                $6
            );
        "#,
        )
        .bind(&instance.id)
        .bind(&instance.title)
        .bind(&instance.author_id)
        .bind(instance.status.to_str())
        .bind(instance.created_at)
        .bind(instance.merged_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            Self::wrap_constraint_error(
                e,
                DatabaseError::DuplicatePullRequest(instance.id.clone()),
                DatabaseError::UnknownUser(instance.author_id.clone()),
            )
        })?;

        for reviewer in &instance.assigned_reviewers {
            Self::insert_reviewer(&mut tx, &instance.id, reviewer).await?;
        }

        tx.commit().await.map_err(Self::wrap_implementation_error)?;

        self.pull_requests_get_expect(&instance.id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        let row = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
                {PULL_REQUEST_SELECT}
                WHERE pr.id = $1
                GROUP BY pr.id
            "#
        ))
        .bind(pull_request_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(row.map(Into::into))
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        let pull_request_id: String = sqlx::query(
            r#"
            UPDATE pull_request
            SET title = $1,
                status = $2,
                merged_at = $3
            WHERE id = $4
            RETURNING id;
        "#,
        )
        .bind(&instance.title)
        .bind(instance.status.to_str())
        .bind(instance.merged_at)
        .bind(&instance.id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            Self::wrap_row_not_found(e, DatabaseError::UnknownPullRequest(instance.id.clone()))
        })?
        .get(0);

        self.pull_requests_get_expect(&pull_request_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_merge(
        &self,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE pull_request
            SET status = $1,
                merged_at = $2
            WHERE id = $3
            AND status = $4;
        "#,
        )
        .bind(PullRequestStatus::Merged.to_str())
        .bind(merged_at)
        .bind(pull_request_id)
        .bind(PullRequestStatus::Open.to_str())
        .execute(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?
        .rows_affected();

        if affected > 0 {
            return Ok(true);
        }

        if self.pull_requests_exists(pull_request_id).await? {
            Ok(false)
        } else {
            Err(DatabaseError::UnknownPullRequest(pull_request_id.into()))
        }
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<PullRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::wrap_implementation_error)?;

        Self::lock_pull_request(&mut tx, pull_request_id).await?;

        let replaced = sqlx::query(
            r#"
            UPDATE pull_request_reviewer
            SET user_id = $1,
                assigned_at = NOW()
            WHERE pull_request_id = $2
            AND user_id = $3
        "#,
        )
        .bind(new_user_id)
        .bind(pull_request_id)
        .bind(old_user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            Self::wrap_constraint_error(
                e,
                DatabaseError::DuplicateAssignment(pull_request_id.into(), new_user_id.into()),
                DatabaseError::UnknownUser(new_user_id.into()),
            )
        })?
        .rows_affected();

        if replaced == 0 {
            return Err(DatabaseError::UnknownAssignment(
                pull_request_id.into(),
                old_user_id.into(),
            ));
        }

        tx.commit().await.map_err(Self::wrap_implementation_error)?;

        self.pull_requests_get_expect(pull_request_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_replace_reviewers(
        &self,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<PullRequest> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(Self::wrap_implementation_error)?;

        Self::lock_pull_request(&mut tx, pull_request_id).await?;

        sqlx::query(
            r#"
            DELETE FROM pull_request_reviewer
            WHERE pull_request_id = $1
        "#,
        )
        .bind(pull_request_id)
        .execute(&mut *tx)
        .await
        .map_err(Self::wrap_implementation_error)?;

        for reviewer in reviewers {
            Self::insert_reviewer(&mut tx, pull_request_id, reviewer).await?;
        }

        tx.commit().await.map_err(Self::wrap_implementation_error)?;

        self.pull_requests_get_expect(pull_request_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let rows = sqlx::query_as::<_, PullRequestRow>(&format!(
            r#"
                {PULL_REQUEST_SELECT}
                WHERE pr.id IN (
                    SELECT pull_request_id
                    FROM pull_request_reviewer
                    WHERE user_id = $1
                )
                GROUP BY pr.id
                ORDER BY pr.id
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::wrap_implementation_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
