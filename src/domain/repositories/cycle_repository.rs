// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cycle::{OperationCycle, OperationTask};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

/// 周期幂等键
///
/// (客户, 模板, 周期区间)四元组，同一键值至多存在一个周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleKey {
    pub client_id: Uuid,
    pub template_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// 周期仓库特质
///
/// 定义运营周期的数据访问接口。实现方必须提供事务性的
/// 多行写入，并在幂等键上维护存储级唯一约束。
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// 检查指定幂等键的周期是否已存在
    async fn exists(&self, key: &CycleKey) -> Result<bool, RepositoryError>;

    /// 在单个事务中创建周期及其全部任务
    ///
    /// 全有或全无：任何一步失败都不得留下部分数据。
    /// 提交时的唯一约束冲突必须报告为 `AlreadyExists`。
    async fn create_with_tasks(
        &self,
        cycle: &OperationCycle,
        tasks: &[OperationTask],
    ) -> Result<OperationCycle, RepositoryError>;
}
