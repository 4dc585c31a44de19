// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cycle::{OperationCycle, OperationTask};
use crate::domain::repositories::cycle_repository::{CycleKey, CycleRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::operation_cycle as cycle_entity;
use crate::infrastructure::database::entities::operation_task as task_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, SqlErr, TransactionTrait,
};
use std::sync::Arc;

/// 周期仓库实现
///
/// 基于SeaORM实现的运营周期数据访问层。幂等键上的唯一索引
/// 由迁移维护，提交时的冲突在这里翻译为 `AlreadyExists`。
#[derive(Clone)]
pub struct CycleRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl CycleRepositoryImpl {
    /// 创建新的周期仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<OperationCycle> for cycle_entity::ActiveModel {
    fn from(cycle: OperationCycle) -> Self {
        Self {
            id: Set(cycle.id),
            client_id: Set(cycle.client_id),
            template_id: Set(cycle.template_id),
            assignment_id: Set(cycle.assignment_id),
            period_start: Set(cycle.period_start),
            period_end: Set(cycle.period_end),
            label: Set(cycle.label.clone()),
            generation_mode: Set(cycle.generation_mode.to_string()),
            status: Set(cycle.status.to_string()),
            generated_at: Set(cycle.generated_at),
            generated_by: Set(cycle.generated_by),
            created_at: Set(Utc::now().into()),
        }
    }
}

impl From<OperationTask> for task_entity::ActiveModel {
    fn from(task: OperationTask) -> Self {
        Self {
            id: Set(task.id),
            cycle_id: Set(task.cycle_id),
            template_task_id: Set(task.template_task_id),
            title: Set(task.title.clone()),
            description: Set(task.description.clone()),
            position: Set(task.position),
            status: Set(task.status.to_string()),
            assigned_to: Set(task.assigned_to),
            evidence_required: Set(task.evidence_required),
            due_at: Set(task.due_at),
            prerequisite_ids: Set(serde_json::to_value(&task.prerequisite_ids).ok()),
            created_at: Set(Utc::now().into()),
        }
    }
}

/// 把唯一约束冲突翻译为 `AlreadyExists`，其余数据库错误原样传递
fn map_db_err(e: DbErr) -> RepositoryError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        RepositoryError::AlreadyExists
    } else {
        RepositoryError::Database(e)
    }
}

#[async_trait]
impl CycleRepository for CycleRepositoryImpl {
    async fn exists(&self, key: &CycleKey) -> Result<bool, RepositoryError> {
        let count = cycle_entity::Entity::find()
            .filter(cycle_entity::Column::ClientId.eq(key.client_id))
            .filter(cycle_entity::Column::TemplateId.eq(key.template_id))
            .filter(cycle_entity::Column::PeriodStart.eq(key.period_start))
            .filter(cycle_entity::Column::PeriodEnd.eq(key.period_end))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn create_with_tasks(
        &self,
        cycle: &OperationCycle,
        tasks: &[OperationTask],
    ) -> Result<OperationCycle, RepositoryError> {
        // Dropping the transaction without commit rolls everything back,
        // so an error on any insert leaves no partial rows behind
        let txn = self.db.begin().await?;

        let cycle_model: cycle_entity::ActiveModel = cycle.clone().into();
        cycle_model.insert(&txn).await.map_err(map_db_err)?;

        for task in tasks {
            let task_model: task_entity::ActiveModel = task.clone().into();
            task_model.insert(&txn).await.map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(cycle.clone())
    }
}

#[cfg(test)]
#[path = "cycle_repo_impl_test.rs"]
mod tests;
