// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::audit_log_repository::AuditLogRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::audit_log as audit_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

/// 审计日志仓库实现
///
/// 基于SeaORM实现的审计记录追加
#[derive(Clone)]
pub struct AuditLogRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl AuditLogRepositoryImpl {
    /// 创建新的审计日志仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditLogRepository for AuditLogRepositoryImpl {
    async fn record(
        &self,
        subject_type: &str,
        subject_id: Uuid,
        action: &str,
        actor_id: Option<Uuid>,
        metadata: &str,
    ) -> Result<(), RepositoryError> {
        let model = audit_entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject_type: Set(subject_type.to_string()),
            subject_id: Set(subject_id),
            action: Set(action.to_string()),
            actor_id: Set(actor_id),
            metadata: Set(Some(metadata.to_string())),
            created_at: Set(Utc::now().into()),
        };

        model.insert(self.db.as_ref()).await?;
        Ok(())
    }
}
