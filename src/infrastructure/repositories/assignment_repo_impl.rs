// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::assignment::Assignment;
use crate::domain::models::recurrence::RecurrenceRule;
use crate::domain::models::template::Template;
use crate::domain::repositories::assignment_repository::{
    AssignmentRepository, EligibleAssignment,
};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::client_template_assignment as assignment_entity;
use crate::infrastructure::database::entities::cycle_template as template_entity;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// 分配仓库实现
///
/// 基于SeaORM实现的客户模板分配数据访问层
#[derive(Clone)]
pub struct AssignmentRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AssignmentRepositoryImpl {
    /// 创建新的分配仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<assignment_entity::Model> for Assignment {
    fn from(model: assignment_entity::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            template_id: model.template_id,
            status: model.status.parse().unwrap_or_default(),
            auto_generate: model.auto_generate,
            starts_on: model.starts_on,
            ends_on: model.ends_on,
            created_at: model.created_at,
        }
    }
}

impl From<template_entity::Model> for Template {
    fn from(model: template_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            recurrence: RecurrenceRule {
                // Unknown stored values become an unresolvable rule, not an error
                kind: model.recurrence_type.parse().ok(),
                interval_days: model.interval_days,
            },
            is_active: model.is_active,
            auto_generate: model.auto_generate,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl AssignmentRepository for AssignmentRepositoryImpl {
    async fn find_eligible(
        &self,
        run_date: NaiveDate,
    ) -> Result<Vec<EligibleAssignment>, RepositoryError> {
        let assignments = assignment_entity::Entity::find()
            .filter(assignment_entity::Column::Status.eq("active"))
            .filter(assignment_entity::Column::AutoGenerate.eq(true))
            .filter(
                Condition::any()
                    .add(assignment_entity::Column::StartsOn.is_null())
                    .add(assignment_entity::Column::StartsOn.lte(run_date)),
            )
            .filter(
                Condition::any()
                    .add(assignment_entity::Column::EndsOn.is_null())
                    .add(assignment_entity::Column::EndsOn.gte(run_date)),
            )
            .all(self.db.as_ref())
            .await?;

        let template_ids: Vec<Uuid> = assignments.iter().map(|a| a.template_id).collect();
        let templates: HashMap<Uuid, Template> = template_entity::Entity::find()
            .filter(template_entity::Column::Id.is_in(template_ids))
            .filter(template_entity::Column::IsActive.eq(true))
            .filter(template_entity::Column::AutoGenerate.eq(true))
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(|model| (model.id, model.into()))
            .collect();

        // Assignments whose template is missing, inactive or non-generating
        // simply drop out of the eligible set
        Ok(assignments
            .into_iter()
            .filter_map(|model| {
                let template = templates.get(&model.template_id)?.clone();
                Some(EligibleAssignment {
                    assignment: model.into(),
                    template,
                })
            })
            .collect())
    }
}
