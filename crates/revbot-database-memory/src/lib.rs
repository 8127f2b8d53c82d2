use std::{
    collections::{HashMap, HashSet},
    sync::RwLock,
};

use async_trait::async_trait;
use revbot_database_interface::{DatabaseError, DbService, Result};
use revbot_models::{
    PullRequest, PullRequestStatus, ReviewerAssignment, Team, TeamMember, User,
};
use time::OffsetDateTime;
use tracing::debug;

/// In-memory gateway.
///
/// Locks are always taken in the same order (users, pull requests, assignments)
/// and multi-record writes hold every lock they need for their whole duration.
#[derive(Debug, Default)]
pub struct MemoryDb {
    teams: RwLock<HashSet<String>>,
    users: RwLock<HashMap<String, User>>,
    pull_requests: RwLock<HashMap<String, PullRequest>>,
    assignments: RwLock<Vec<ReviewerAssignment>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Default::default()
    }

    fn reviewers_of(assignments: &[ReviewerAssignment], pull_request_id: &str) -> Vec<String> {
        assignments
            .iter()
            .filter(|a| a.pull_request_id == pull_request_id)
            .map(|a| a.user_id.clone())
            .collect()
    }

    fn ensure_open(
        pull_requests: &HashMap<String, PullRequest>,
        pull_request_id: &str,
    ) -> Result<()> {
        match pull_requests.get(pull_request_id) {
            None => Err(DatabaseError::UnknownPullRequest(pull_request_id.into())),
            Some(pr) if pr.status == PullRequestStatus::Merged => {
                Err(DatabaseError::PullRequestMerged(pull_request_id.into()))
            }
            Some(_) => Ok(()),
        }
    }

    fn load_pull_request(&self, pull_request_id: &str) -> Option<PullRequest> {
        let pull_requests = self.pull_requests.read().unwrap();
        let assignments = self.assignments.read().unwrap();

        pull_requests.get(pull_request_id).map(|pr| {
            pr.clone()
                .with_reviewers(Self::reviewers_of(&assignments, pull_request_id))
        })
    }

    fn ensure_users_exist<'a>(
        users: &HashMap<String, User>,
        user_ids: impl IntoIterator<Item = &'a String>,
    ) -> Result<()> {
        for user_id in user_ids {
            if !users.contains_key(user_id) {
                return Err(DatabaseError::UnknownUser(user_id.clone()));
            }
        }

        Ok(())
    }

    fn ensure_distinct(pull_request_id: &str, reviewers: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for reviewer in reviewers {
            if !seen.insert(reviewer) {
                return Err(DatabaseError::DuplicateAssignment(
                    pull_request_id.into(),
                    reviewer.clone(),
                ));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl DbService for MemoryDb {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    /////////
    // Teams

    async fn teams_exists(&self, team_name: &str) -> Result<bool> {
        Ok(self.teams.read().unwrap().contains(team_name))
    }

    async fn teams_create(&self, team_name: &str) -> Result<()> {
        if !self.teams.write().unwrap().insert(team_name.to_owned()) {
            return Err(DatabaseError::DuplicateTeam(team_name.into()));
        }

        debug!(team_name = team_name, message = "Team created");
        Ok(())
    }

    async fn teams_get_with_members(&self, team_name: &str) -> Result<Option<Team>> {
        if !self.teams.read().unwrap().contains(team_name) {
            return Ok(None);
        }

        let mut members: Vec<_> = self
            .users
            .read()
            .unwrap()
            .values()
            .filter(|u| u.team_name == team_name)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.user_id.cmp(&b.user_id));

        Ok(Some(Team {
            team_name: team_name.into(),
            members: members.into_iter().map(TeamMember::from).collect(),
        }))
    }

    /////////
    // Users

    async fn users_exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.users.read().unwrap().contains_key(user_id))
    }

    async fn users_upsert(&self, instance: User) -> Result<User> {
        if !self.teams.read().unwrap().contains(&instance.team_name) {
            return Err(DatabaseError::UnknownTeam(instance.team_name));
        }

        self.users
            .write()
            .unwrap()
            .insert(instance.user_id.clone(), instance.clone());
        Ok(instance)
    }

    async fn users_get(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.users.read().unwrap().get(user_id).cloned())
    }

    async fn users_update(&self, instance: User) -> Result<User> {
        if !self.teams.read().unwrap().contains(&instance.team_name) {
            return Err(DatabaseError::UnknownTeam(instance.team_name));
        }

        let mut users = self.users.write().unwrap();
        match users.get_mut(&instance.user_id) {
            Some(user) => {
                *user = instance.clone();
                Ok(instance)
            }
            None => Err(DatabaseError::UnknownUser(instance.user_id)),
        }
    }

    async fn users_list_active_in_team(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>> {
        let mut values: Vec<_> = self
            .users
            .read()
            .unwrap()
            .values()
            .filter(|u| u.team_name == team_name && u.is_active && u.user_id != exclude_user_id)
            .cloned()
            .collect();
        values.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(values)
    }

    /////////////////
    // Pull requests

    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool> {
        Ok(self
            .pull_requests
            .read()
            .unwrap()
            .contains_key(pull_request_id))
    }

    async fn pull_requests_create(&self, mut instance: PullRequest) -> Result<PullRequest> {
        if instance.created_at.is_none() {
            instance.created_at = Some(OffsetDateTime::now_utc());
        }

        {
            let users = self.users.read().unwrap();
            let mut pull_requests = self.pull_requests.write().unwrap();
            let mut assignments = self.assignments.write().unwrap();

            if pull_requests.contains_key(&instance.id) {
                return Err(DatabaseError::DuplicatePullRequest(instance.id));
            }
            Self::ensure_users_exist(&users, [&instance.author_id])?;
            Self::ensure_users_exist(&users, &instance.assigned_reviewers)?;
            Self::ensure_distinct(&instance.id, &instance.assigned_reviewers)?;

            for reviewer in &instance.assigned_reviewers {
                assignments.push(ReviewerAssignment::new(&instance.id, reviewer));
            }
            pull_requests.insert(instance.id.clone(), instance.clone().with_reviewers(vec![]));
        }

        debug!(
            pull_request_id = %instance.id,
            reviewers = ?instance.assigned_reviewers,
            message = "Pull request created"
        );
        self.pull_requests_get_expect(&instance.id).await
    }

    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>> {
        Ok(self.load_pull_request(pull_request_id))
    }

    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest> {
        {
            let mut pull_requests = self.pull_requests.write().unwrap();
            match pull_requests.get_mut(&instance.id) {
                Some(pr) => {
                    pr.title.clone_from(&instance.title);
                    pr.status = instance.status;
                    pr.merged_at = instance.merged_at;
                }
                None => return Err(DatabaseError::UnknownPullRequest(instance.id)),
            }
        }

        self.pull_requests_get_expect(&instance.id).await
    }

    async fn pull_requests_merge(
        &self,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<bool> {
        let mut pull_requests = self.pull_requests.write().unwrap();
        let pr = pull_requests
            .get_mut(pull_request_id)
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))?;

        if pr.status == PullRequestStatus::Merged {
            return Ok(false);
        }

        pr.status = PullRequestStatus::Merged;
        pr.merged_at = Some(merged_at);
        debug!(pull_request_id = %pull_request_id, message = "Pull request merged");
        Ok(true)
    }

    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<PullRequest> {
        {
            let users = self.users.read().unwrap();
            let pull_requests = self.pull_requests.read().unwrap();
            let mut assignments = self.assignments.write().unwrap();

            Self::ensure_open(&pull_requests, pull_request_id)?;
            Self::ensure_users_exist(&users, [&new_user_id.to_owned()])?;

            if old_user_id != new_user_id
                && assignments
                    .iter()
                    .any(|a| a.pull_request_id == pull_request_id && a.user_id == new_user_id)
            {
                return Err(DatabaseError::DuplicateAssignment(
                    pull_request_id.into(),
                    new_user_id.into(),
                ));
            }

            match assignments
                .iter_mut()
                .find(|a| a.pull_request_id == pull_request_id && a.user_id == old_user_id)
            {
                Some(assignment) => {
                    *assignment = ReviewerAssignment::new(pull_request_id, new_user_id);
                }
                None => {
                    return Err(DatabaseError::UnknownAssignment(
                        pull_request_id.into(),
                        old_user_id.into(),
                    ))
                }
            }
        }

        self.pull_requests_get_expect(pull_request_id).await
    }

    async fn pull_requests_replace_reviewers(
        &self,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<PullRequest> {
        {
            let users = self.users.read().unwrap();
            let pull_requests = self.pull_requests.read().unwrap();
            let mut assignments = self.assignments.write().unwrap();

            Self::ensure_open(&pull_requests, pull_request_id)?;
            Self::ensure_users_exist(&users, reviewers)?;
            Self::ensure_distinct(pull_request_id, reviewers)?;

            assignments.retain(|a| a.pull_request_id != pull_request_id);
            for reviewer in reviewers {
                assignments.push(ReviewerAssignment::new(pull_request_id, reviewer));
            }
        }

        self.pull_requests_get_expect(pull_request_id).await
    }

    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>> {
        let mut values: Vec<_> = {
            let pull_requests = self.pull_requests.read().unwrap();
            let assignments = self.assignments.read().unwrap();

            assignments
                .iter()
                .filter(|a| a.user_id == user_id)
                .filter_map(|a| pull_requests.get(&a.pull_request_id))
                .map(|pr| {
                    pr.clone()
                        .with_reviewers(Self::reviewers_of(&assignments, &pr.id))
                })
                .collect()
        };
        values.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(values)
    }
}
