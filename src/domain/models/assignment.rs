// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// 客户模板分配实体
///
/// 表示客户对某个周期模板的订阅，携带自身的调度边界。
/// 只有分配和模板双方都处于启用且自动生成状态，
/// 并且运行日期落在 `[starts_on, ends_on]` 内（空边界视为无界）时，
/// 分配才参与自动生成。`starts_on` 同时充当双周和自定义
/// 循环的相位锚定日期。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// 分配唯一标识符
    pub id: Uuid,
    /// 客户ID
    pub client_id: Uuid,
    /// 模板ID
    pub template_id: Uuid,
    /// 分配状态
    pub status: AssignmentStatus,
    /// 是否参与自动生成
    pub auto_generate: bool,
    /// 生效开始日期，同时作为相位锚定日期
    pub starts_on: Option<NaiveDate>,
    /// 生效结束日期
    pub ends_on: Option<NaiveDate>,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

/// 分配状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// 生效中，参与自动生成
    #[default]
    Active,
    /// 已停用
    Inactive,
    /// 已归档
    Archived,
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssignmentStatus::Active => write!(f, "active"),
            AssignmentStatus::Inactive => write!(f, "inactive"),
            AssignmentStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AssignmentStatus::Active),
            "inactive" => Ok(AssignmentStatus::Inactive),
            "archived" => Ok(AssignmentStatus::Archived),
            _ => Err(()),
        }
    }
}
