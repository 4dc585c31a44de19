// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbErr;
use thiserror::Error;

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 分配仓库（assignment_repository）：查询可参与自动生成的分配
/// - 审计日志仓库（audit_log_repository）：追加审计记录
/// - 周期仓库（cycle_repository）：幂等地创建周期及其任务清单
/// - 模板仓库（template_repository）：读取模板的任务清单定义
pub mod assignment_repository;
pub mod audit_log_repository;
pub mod cycle_repository;
pub mod template_repository;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 唯一性约束冲突，记录已存在
    #[error("Record already exists")]
    AlreadyExists,
}
