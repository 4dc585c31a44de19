// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::recurrence::RecurrenceRule;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 周期模板实体
///
/// 可复用的周期性工作清单定义。模板拥有一个循环规则和
/// 一组有序的任务模板，客户通过分配订阅模板后，
/// 系统按循环规则为每个适用周期物化一个运营周期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// 模板唯一标识符
    pub id: Uuid,
    /// 模板名称，用于派生周期标签
    pub name: String,
    /// 模板描述
    pub description: Option<String>,
    /// 循环规则
    pub recurrence: RecurrenceRule,
    /// 是否启用，停用的模板不参与生成且物化请求被拒绝
    pub is_active: bool,
    /// 是否参与自动生成
    pub auto_generate: bool,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

/// 任务模板实体
///
/// 模板清单中的一项工作定义。生成运营周期时，每个启用的
/// 任务模板物化为一个运营任务，复制标题、描述、默认负责人
/// 等属性，并按到期偏移计算具体到期时间。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskTemplate {
    /// 任务模板唯一标识符
    pub id: Uuid,
    /// 所属模板ID
    pub template_id: Uuid,
    /// 任务标题
    pub title: String,
    /// 任务描述
    pub description: Option<String>,
    /// 排序位置，缺省时按创建顺序排序并以枚举序号回填
    pub position: Option<i32>,
    /// 默认负责人
    pub default_assignee: Option<Uuid>,
    /// 是否要求留存证据
    pub evidence_required: bool,
    /// 到期偏移定义
    pub due_offset: DueOffset,
    /// 前置任务模板ID列表，复制到生成任务上，本引擎不解释其语义
    pub prerequisite_ids: Vec<Uuid>,
    /// 是否启用，停用的任务模板不参与物化
    pub is_active: bool,
    /// 创建时间，作为排序的次级键
    pub created_at: DateTime<FixedOffset>,
}

/// 到期偏移定义
///
/// 描述生成任务的到期时间相对周期边界的偏移。
/// `value` 为 `None` 时任务没有到期时间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DueOffset {
    /// 偏移基准：周期开始或周期结束
    pub anchor: DueAnchor,
    /// 偏移单位：小时或天
    pub unit: DueUnit,
    /// 偏移量，非负；缺省表示无到期时间
    pub value: Option<i64>,
}

/// 到期偏移基准枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DueAnchor {
    /// 以周期开始日的零点为基准
    #[default]
    CycleStart,
    /// 以周期结束日的一天结束为基准
    CycleEnd,
}

impl fmt::Display for DueAnchor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DueAnchor::CycleStart => write!(f, "cycle_start"),
            DueAnchor::CycleEnd => write!(f, "cycle_end"),
        }
    }
}

impl FromStr for DueAnchor {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cycle_start" => Ok(DueAnchor::CycleStart),
            "cycle_end" => Ok(DueAnchor::CycleEnd),
            _ => Err(()),
        }
    }
}

/// 到期偏移单位枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DueUnit {
    /// 按小时偏移
    Hours,
    /// 按天偏移
    #[default]
    Days,
}

impl fmt::Display for DueUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DueUnit::Hours => write!(f, "hours"),
            DueUnit::Days => write!(f, "days"),
        }
    }
}

impl FromStr for DueUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hours" => Ok(DueUnit::Hours),
            "days" => Ok(DueUnit::Days),
            _ => Err(()),
        }
    }
}
