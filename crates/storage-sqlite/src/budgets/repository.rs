use async_trait::async_trait;
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use gridbudget_core::budgets::{Budget, BudgetRepositoryTrait, BudgetSnapshot};
use gridbudget_core::projects::ProjectStatus;
use gridbudget_core::Result;

use super::model::{encode_lines, BudgetDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{budgets, projects};
use crate::utils::{new_id, now};

pub struct BudgetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl BudgetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BudgetRepositoryTrait for BudgetRepository {
    async fn save_and_mark_budgeted(&self, budget: Budget) -> Result<BudgetSnapshot> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<BudgetSnapshot> {
                let last_revision: Option<i32> = budgets::table
                    .filter(budgets::project_id.eq(&budget.project_id))
                    .select(max(budgets::revision))
                    .first::<Option<i32>>(conn)
                    .map_err(StorageError::from)?;
                let revision = last_revision.unwrap_or(0) + 1;

                let row = BudgetDB {
                    id: new_id(None),
                    project_id: budget.project_id.clone(),
                    revision,
                    lines: encode_lines(&budget.lines)?,
                    total: budget.total.to_string(),
                    point_count: budget.point_count,
                    calculated_at: budget.calculated_at,
                };
                diesel::insert_into(budgets::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::update(
                    projects::table
                        .filter(projects::id.eq(&budget.project_id))
                        .filter(projects::status.eq(ProjectStatus::Draft.as_str())),
                )
                .set((
                    projects::status.eq(ProjectStatus::Budgeted.as_str()),
                    projects::updated_at.eq(now()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;
                debug!(
                    "Saved budget revision {} for project {}",
                    revision, row.project_id
                );

                Ok(BudgetSnapshot {
                    id: row.id,
                    project_id: budget.project_id,
                    lines: budget.lines,
                    total: budget.total,
                    point_count: budget.point_count,
                    calculated_at: budget.calculated_at,
                })
            })
            .await
    }

    fn get_by_id(&self, budget_id: &str) -> Result<BudgetSnapshot> {
        let mut conn = get_connection(&self.pool)?;
        let row = budgets::table
            .find(budget_id)
            .select(BudgetDB::as_select())
            .first::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?;
        BudgetSnapshot::try_from(row)
    }

    fn get_latest(&self, project_id: &str) -> Result<Option<BudgetSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::project_id.eq(project_id))
            .select(BudgetDB::as_select())
            .order(budgets::revision.desc())
            .first::<BudgetDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(BudgetSnapshot::try_from)
            .transpose()
    }

    fn list_by_project(&self, project_id: &str) -> Result<Vec<BudgetSnapshot>> {
        let mut conn = get_connection(&self.pool)?;
        budgets::table
            .filter(budgets::project_id.eq(project_id))
            .select(BudgetDB::as_select())
            .order(budgets::revision.desc())
            .load::<BudgetDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(BudgetSnapshot::try_from)
            .collect()
    }
}
