//! `PostgreSQL` repository implementation for board storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::board::{
    domain::{PersistedTaskData, Rank, Task, TaskId, TaskStatus},
    ports::{RankAssignment, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: BoardPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changed_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set((
                    tasks::title.eq(&changed_row.title),
                    tasks::description.eq(&changed_row.description),
                    tasks::status.eq(&changed_row.status),
                    tasks::rank.eq(changed_row.rank),
                    tasks::updated_at.eq(changed_row.updated_at),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map_or(Err(TaskRepositoryError::NotFound(id)), row_to_task)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order(tasks::rank.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn apply_ranks(&self, assignments: &[RankAssignment]) -> TaskRepositoryResult<()> {
        // Converted ahead of the transaction so the closure only deals in
        // Diesel operations and errors.
        let rewrites = assignments
            .iter()
            .map(|assignment| {
                let rank = i32::try_from(assignment.rank.value())
                    .map_err(TaskRepositoryError::persistence)?;
                Ok((assignment.task_id.into_inner(), rank))
            })
            .collect::<TaskRepositoryResult<Vec<(uuid::Uuid, i32)>>>()?;

        self.run_blocking(move |connection| {
            connection
                .transaction::<_, DieselError, _>(|transaction_connection| {
                    for (task_uuid, rank) in rewrites {
                        diesel::update(tasks::table.filter(tasks::id.eq(task_uuid)))
                            .set(tasks::rank.eq(rank))
                            .execute(transaction_connection)?;
                    }
                    Ok(())
                })
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let rank = i32::try_from(task.rank().value()).map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        rank,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        rank: persisted_rank,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;
    let rank_value =
        u64::try_from(persisted_rank).map_err(TaskRepositoryError::persistence)?;
    let rank = Rank::new(rank_value).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        rank,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
