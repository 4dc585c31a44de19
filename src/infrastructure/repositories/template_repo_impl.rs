// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::template::{DueOffset, TaskTemplate};
use crate::domain::repositories::template_repository::TemplateRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::template_task as task_entity;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

/// 模板仓库实现
///
/// 基于SeaORM实现的周期模板数据访问层
#[derive(Clone)]
pub struct TemplateRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TemplateRepositoryImpl {
    /// 创建新的模板仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<task_entity::Model> for TaskTemplate {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            template_id: model.template_id,
            title: model.title,
            description: model.description,
            position: model.position,
            default_assignee: model.default_assignee,
            evidence_required: model.evidence_required,
            due_offset: DueOffset {
                anchor: model
                    .due_anchor
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
                unit: model
                    .due_unit
                    .as_deref()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
                value: model.due_value,
            },
            prerequisite_ids: model
                .prerequisite_ids
                .and_then(|json| serde_json::from_value(json).ok())
                .unwrap_or_default(),
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl TemplateRepository for TemplateRepositoryImpl {
    async fn find_active_tasks(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<TaskTemplate>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::TemplateId.eq(template_id))
            .filter(task_entity::Column::IsActive.eq(true))
            .order_by_asc(task_entity::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
