// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 审计日志仓库特质
///
/// 定义审计记录的追加接口。写入属于即发即忘：
/// 调用方不应让审计失败影响已提交的业务操作。
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// 追加一条审计记录
    ///
    /// # 参数
    ///
    /// * `subject_type` - 审计对象类型，如 "operation_cycle"
    /// * `subject_id` - 审计对象ID
    /// * `action` - 动作名称，如 "created"
    /// * `actor_id` - 操作者ID，自动操作时为空
    /// * `metadata` - 可读的描述信息
    async fn record(
        &self,
        subject_type: &str,
        subject_id: Uuid,
        action: &str,
        actor_id: Option<Uuid>,
        metadata: &str,
    ) -> Result<(), RepositoryError>;
}
