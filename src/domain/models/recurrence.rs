// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 循环类型枚举
///
/// 定义了模板支持的重复调度类型。周、月、季度类型与日历对齐，
/// 双周和自定义类型以锚定日期做相位对齐。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    /// 每周，对应包含运行日期的日历周
    Weekly,
    /// 双周，以锚定日期相位对齐的14天周期
    Biweekly,
    /// 每月，对应包含运行日期的日历月
    Monthly,
    /// 每季度，对应包含运行日期的日历季度
    Quarterly,
    /// 自定义，以锚定日期相位对齐的N天周期
    Custom,
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecurrenceKind::Weekly => write!(f, "weekly"),
            RecurrenceKind::Biweekly => write!(f, "biweekly"),
            RecurrenceKind::Monthly => write!(f, "monthly"),
            RecurrenceKind::Quarterly => write!(f, "quarterly"),
            RecurrenceKind::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for RecurrenceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(RecurrenceKind::Weekly),
            "biweekly" => Ok(RecurrenceKind::Biweekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            "quarterly" => Ok(RecurrenceKind::Quarterly),
            "custom" => Ok(RecurrenceKind::Custom),
            _ => Err(()),
        }
    }
}

/// 循环规则
///
/// 嵌入在模板中的重复调度规则。`kind` 为 `None` 表示存储中的
/// 类型字符串无法识别，此时规则不可解析，按跳过处理而非报错。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// 循环类型，未识别的存储值解析为None
    pub kind: Option<RecurrenceKind>,
    /// 自定义周期天数，仅对custom类型有意义，必须为正数
    pub interval_days: Option<i32>,
}
