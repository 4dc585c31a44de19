// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::assignment::Assignment;
use crate::domain::models::template::Template;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use chrono::NaiveDate;

/// 可自动生成的分配
///
/// 分配连同其模板，模板已按启用且自动生成过滤
#[derive(Debug, Clone)]
pub struct EligibleAssignment {
    pub assignment: Assignment,
    pub template: Template,
}

/// 分配仓库特质
///
/// 定义客户模板分配的数据访问接口
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// 查询指定运行日期下可参与自动生成的分配
    ///
    /// 过滤条件：分配状态为active且开启自动生成，模板启用且开启
    /// 自动生成，运行日期落在分配的生效区间内（空边界视为无界）
    async fn find_eligible(
        &self,
        run_date: NaiveDate,
    ) -> Result<Vec<EligibleAssignment>, RepositoryError>;
}
