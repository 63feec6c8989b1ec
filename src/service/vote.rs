//! Vote ingestion and result aggregation

use crate::domain::{
    check_points, tally, EmployeeId, NewVote, UpdateVoteInput, Vote, VoteCommand, VoteId,
    VoteResults, VoteSubmission,
};
use crate::error::{AppError, Result};
use crate::repository::vote::DUPLICATE_VOTE;
use crate::repository::{MenuRepository, VoteRepository};
use chrono::{NaiveDate, Utc};
use metrics::counter;
use std::sync::Arc;
use validator::Validate;

pub struct VoteService<V: VoteRepository, M: MenuRepository> {
    vote_repo: Arc<V>,
    menu_repo: Arc<M>,
    max_batch_size: usize,
}

impl<V: VoteRepository, M: MenuRepository> VoteService<V, M> {
    pub fn new(vote_repo: Arc<V>, menu_repo: Arc<M>, max_batch_size: usize) -> Self {
        Self {
            vote_repo,
            menu_repo,
            max_batch_size,
        }
    }

    /// Validate and store a submission for `employee_id`.
    ///
    /// Every entry is validated in request order before anything is written.
    /// Batches are stored all-or-nothing: either every entry becomes a vote
    /// or none does.
    pub async fn submit(
        &self,
        employee_id: EmployeeId,
        submission: &VoteSubmission,
    ) -> Result<Vec<Vote>> {
        let commands = submission.commands();
        if !submission.is_legacy() && commands.len() > self.max_batch_size {
            return Err(AppError::BadRequest(format!(
                "at most {} votes may be submitted at once",
                self.max_batch_size
            )));
        }

        let mut accepted: Vec<NewVote> = Vec::with_capacity(commands.len());
        for command in commands {
            let vote = self.validate(employee_id, command).await;
            let vote = match vote {
                Ok(vote) if accepted.iter().any(|v| v.menu_id == vote.menu_id) => {
                    Err(AppError::Conflict(DUPLICATE_VOTE.to_string()))
                }
                other => other,
            };
            accepted.push(self.record_outcome(vote)?);
        }

        let stored = match submission {
            VoteSubmission::Legacy(_) => self
                .vote_repo
                .create(employee_id, accepted[0])
                .await
                .map(|vote| vec![vote]),
            VoteSubmission::Batch(_) => self.vote_repo.create_batch(employee_id, &accepted).await,
        };
        let stored = self.record_outcome(stored)?;

        counter!("lunchvote_votes_created_total").increment(stored.len() as u64);
        tracing::info!(
            employee_id = %employee_id,
            count = stored.len(),
            legacy = submission.is_legacy(),
            "Votes recorded"
        );
        Ok(stored)
    }

    async fn validate(&self, employee_id: EmployeeId, command: &VoteCommand) -> Result<NewVote> {
        if self.menu_repo.find_by_id(command.menu_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Menu {} not found",
                command.menu_id
            )));
        }

        let points = check_points(command.points)?;

        // the unique key still decides races; this only answers early
        if self.vote_repo.exists(employee_id, command.menu_id).await? {
            return Err(AppError::Conflict(DUPLICATE_VOTE.to_string()));
        }

        Ok(NewVote {
            menu_id: command.menu_id,
            points,
        })
    }

    fn record_outcome<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(AppError::Conflict(_)) = &result {
            counter!("lunchvote_vote_conflicts_total").increment(1);
        }
        result
    }

    /// Total points per restaurant for menus dated `date`
    pub async fn results_for_date(&self, date: NaiveDate) -> Result<VoteResults> {
        let votes = self.vote_repo.find_by_menu_date(date).await?;
        Ok(tally(&votes))
    }

    /// Results for the current UTC date
    pub async fn results_for_today(&self) -> Result<VoteResults> {
        self.results_for_date(Utc::now().date_naive()).await
    }

    pub async fn get(&self, id: VoteId) -> Result<Vote> {
        self.vote_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vote {} not found", id)))
    }

    pub async fn list(&self, page: i64, per_page: i64) -> Result<(Vec<Vote>, i64)> {
        let offset = (page - 1) * per_page;
        let votes = self.vote_repo.list(offset, per_page).await?;
        let total = self.vote_repo.count().await?;
        Ok((votes, total))
    }

    pub async fn update_points(&self, id: VoteId, input: UpdateVoteInput) -> Result<Vote> {
        input.validate()?;
        let points = check_points(input.points)?;
        let _ = self.get(id).await?;
        self.vote_repo.update_points(id, points).await
    }

    pub async fn delete(&self, id: VoteId) -> Result<()> {
        let _ = self.get(id).await?;
        self.vote_repo.delete(id).await
    }
}
