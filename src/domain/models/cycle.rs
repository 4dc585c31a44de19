// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::template::TaskTemplate;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 运营周期实体
///
/// 某个(客户, 模板, 周期)三元组的物化产物。同一键值至多存在
/// 一条记录，这是幂等性的核心约束。周期由物化服务一次性创建，
/// 创建后本子系统不再修改（状态流转由其他应用代码负责）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationCycle {
    /// 周期唯一标识符
    pub id: Uuid,
    /// 客户ID
    pub client_id: Uuid,
    /// 模板ID
    pub template_id: Uuid,
    /// 来源分配ID，手动生成时可为空
    pub assignment_id: Option<Uuid>,
    /// 周期开始日期（含）
    pub period_start: NaiveDate,
    /// 周期结束日期（含），不早于开始日期
    pub period_end: NaiveDate,
    /// 可读标签，形如 "{模板名} ({开始} - {结束})"
    pub label: String,
    /// 生成方式
    pub generation_mode: GenerationMode,
    /// 周期状态，创建时为active
    pub status: CycleStatus,
    /// 生成时间
    pub generated_at: DateTime<FixedOffset>,
    /// 生成者，自动生成时可为空
    pub generated_by: Option<Uuid>,
}

impl OperationCycle {
    /// 创建一个新的运营周期
    ///
    /// # 参数
    ///
    /// * `client_id` - 客户ID
    /// * `template_id` - 模板ID
    /// * `assignment_id` - 来源分配ID
    /// * `period_start` - 周期开始日期
    /// * `period_end` - 周期结束日期
    /// * `label` - 可读标签
    /// * `generation_mode` - 生成方式
    /// * `generated_by` - 生成者
    ///
    /// # 返回值
    ///
    /// 返回状态为active的新周期实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        client_id: Uuid,
        template_id: Uuid,
        assignment_id: Option<Uuid>,
        period_start: NaiveDate,
        period_end: NaiveDate,
        label: String,
        generation_mode: GenerationMode,
        generated_by: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_id,
            template_id,
            assignment_id,
            period_start,
            period_end,
            label,
            generation_mode,
            status: CycleStatus::Active,
            generated_at: Utc::now().into(),
            generated_by,
        }
    }
}

/// 运营任务实体
///
/// 周期清单中的一项具体工作，与其所属周期在同一事务中
/// 原子创建，从不单独产生。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationTask {
    /// 任务唯一标识符
    pub id: Uuid,
    /// 所属周期ID
    pub cycle_id: Uuid,
    /// 来源任务模板ID
    pub template_task_id: Option<Uuid>,
    /// 任务标题，复制自任务模板
    pub title: String,
    /// 任务描述，复制自任务模板
    pub description: Option<String>,
    /// 排序位置，模板缺省时为清单中的1起始序号
    pub position: i32,
    /// 任务状态，创建时为not_started
    pub status: OperationTaskStatus,
    /// 负责人，复制自任务模板的默认负责人
    pub assigned_to: Option<Uuid>,
    /// 是否要求留存证据
    pub evidence_required: bool,
    /// 到期时间，任务模板未定义偏移量时为空
    pub due_at: Option<DateTime<FixedOffset>>,
    /// 前置任务模板ID列表，复制自任务模板
    pub prerequisite_ids: Vec<Uuid>,
}

impl OperationTask {
    /// 从任务模板物化一个运营任务
    ///
    /// # 参数
    ///
    /// * `template_task` - 来源任务模板
    /// * `cycle_id` - 所属周期ID
    /// * `position` - 已解析的排序位置
    /// * `due_at` - 已计算的到期时间
    ///
    /// # 返回值
    ///
    /// 返回状态为not_started的新任务实例
    pub fn from_template(
        template_task: &TaskTemplate,
        cycle_id: Uuid,
        position: i32,
        due_at: Option<DateTime<FixedOffset>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cycle_id,
            template_task_id: Some(template_task.id),
            title: template_task.title.clone(),
            description: template_task.description.clone(),
            position,
            status: OperationTaskStatus::NotStarted,
            assigned_to: template_task.default_assignee,
            evidence_required: template_task.evidence_required,
            due_at,
            prerequisite_ids: template_task.prerequisite_ids.clone(),
        }
    }
}

/// 生成方式枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// 由批量驱动器自动生成
    #[default]
    Auto,
    /// 由操作员手动触发
    Manual,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationMode::Auto => write!(f, "auto"),
            GenerationMode::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for GenerationMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(GenerationMode::Auto),
            "manual" => Ok(GenerationMode::Manual),
            _ => Err(()),
        }
    }
}

/// 周期状态枚举
///
/// 创建后的状态流转由其他应用代码负责，本子系统只写入active。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    /// 进行中
    #[default]
    Active,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CycleStatus::Active => write!(f, "active"),
            CycleStatus::Completed => write!(f, "completed"),
            CycleStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for CycleStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CycleStatus::Active),
            "completed" => Ok(CycleStatus::Completed),
            "cancelled" => Ok(CycleStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// 运营任务状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationTaskStatus {
    /// 未开始
    #[default]
    NotStarted,
    /// 进行中
    InProgress,
    /// 已完成
    Completed,
}

impl fmt::Display for OperationTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OperationTaskStatus::NotStarted => write!(f, "not_started"),
            OperationTaskStatus::InProgress => write!(f, "in_progress"),
            OperationTaskStatus::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for OperationTaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(OperationTaskStatus::NotStarted),
            "in_progress" => Ok(OperationTaskStatus::InProgress),
            "completed" => Ok(OperationTaskStatus::Completed),
            _ => Err(()),
        }
    }
}
