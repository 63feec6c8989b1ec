//! Vote store
//!
//! The `(employee_id, menu_id)` unique key on `votes` is the only guard
//! against double voting. Inserts never check for an existing row first;
//! the duplicate-key error from the database is translated to `Conflict`.

use crate::domain::{EmployeeId, MenuId, NewVote, Vote, VoteId, VoteWithRestaurant};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool};

pub(crate) const DUPLICATE_VOTE: &str = "Employee has already voted for this menu";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert one vote; `Conflict` if the employee already voted on the menu
    async fn create(&self, employee_id: EmployeeId, vote: NewVote) -> Result<Vote>;

    /// Insert all votes in one transaction. The first failure rolls back
    /// every earlier insert of the batch.
    async fn create_batch(&self, employee_id: EmployeeId, votes: &[NewVote]) -> Result<Vec<Vote>>;

    async fn exists(&self, employee_id: EmployeeId, menu_id: MenuId) -> Result<bool>;

    async fn find_by_id(&self, id: VoteId) -> Result<Option<Vote>>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Vote>>;

    async fn count(&self) -> Result<i64>;

    /// Votes cast on menus dated `date`, joined with the menu's restaurant
    async fn find_by_menu_date(&self, date: NaiveDate) -> Result<Vec<VoteWithRestaurant>>;

    async fn update_points(&self, id: VoteId, points: i32) -> Result<Vote>;

    async fn delete(&self, id: VoteId) -> Result<()>;
}

pub struct VoteRepositoryImpl {
    pool: MySqlPool,
}

impl VoteRepositoryImpl {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn insert_vote<'e, E>(executor: E, employee_id: EmployeeId, vote: NewVote) -> Result<VoteId>
where
    E: sqlx::Executor<'e, Database = MySql>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO votes (employee_id, menu_id, points, created_at)
        VALUES (?, ?, ?, NOW())
        "#,
    )
    .bind(employee_id)
    .bind(vote.menu_id)
    .bind(vote.points)
    .execute(executor)
    .await
    .map_err(|e| {
        AppError::from_constraint(e, DUPLICATE_VOTE, &format!("Menu {} not found", vote.menu_id))
    })?;

    Ok(VoteId(result.last_insert_id() as i64))
}

#[async_trait]
impl VoteRepository for VoteRepositoryImpl {
    async fn create(&self, employee_id: EmployeeId, vote: NewVote) -> Result<Vote> {
        let id = insert_vote(&self.pool, employee_id, vote).await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create vote")))
    }

    async fn create_batch(&self, employee_id: EmployeeId, votes: &[NewVote]) -> Result<Vec<Vote>> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(votes.len());
        for vote in votes {
            // dropping `tx` on error rolls the batch back
            ids.push(insert_vote(&mut *tx, employee_id, *vote).await?);
        }
        tx.commit().await?;

        let mut created = Vec::with_capacity(ids.len());
        for id in ids {
            let vote = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to create vote")))?;
            created.push(vote);
        }
        Ok(created)
    }

    async fn exists(&self, employee_id: EmployeeId, menu_id: MenuId) -> Result<bool> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM votes WHERE employee_id = ? AND menu_id = ?")
                .bind(employee_id)
                .bind(menu_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0 > 0)
    }

    async fn find_by_id(&self, id: VoteId) -> Result<Option<Vote>> {
        let vote = sqlx::query_as::<_, Vote>(
            "SELECT id, employee_id, menu_id, points, created_at FROM votes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Vote>> {
        let votes = sqlx::query_as::<_, Vote>(
            r#"
            SELECT id, employee_id, menu_id, points, created_at
            FROM votes
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(votes)
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM votes")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn find_by_menu_date(&self, date: NaiveDate) -> Result<Vec<VoteWithRestaurant>> {
        let rows = sqlx::query_as::<_, VoteWithRestaurant>(
            r#"
            SELECT v.id AS vote_id, v.employee_id, v.menu_id, v.points,
                   r.id AS restaurant_id, r.name AS restaurant_name
            FROM votes v
            INNER JOIN menus m ON m.id = v.menu_id
            INNER JOIN restaurants r ON r.id = m.restaurant_id
            WHERE m.menu_date = ?
            ORDER BY v.id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn update_points(&self, id: VoteId, points: i32) -> Result<Vote> {
        sqlx::query("UPDATE votes SET points = ? WHERE id = ?")
            .bind(points)
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vote {} not found", id)))
    }

    async fn delete(&self, id: VoteId) -> Result<()> {
        let result = sqlx::query("DELETE FROM votes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vote {} not found", id)));
        }

        Ok(())
    }
}
