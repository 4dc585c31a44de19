// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::template::TaskTemplate;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 模板仓库特质
///
/// 定义周期模板的数据访问接口
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// 读取模板下所有启用的任务模板
    ///
    /// 按创建时间升序返回，最终排序（position优先）由物化服务完成
    async fn find_active_tasks(
        &self,
        template_id: Uuid,
    ) -> Result<Vec<TaskTemplate>, RepositoryError>;
}
