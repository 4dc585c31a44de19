// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::recurrence::{RecurrenceKind, RecurrenceRule};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// 周期区间
///
/// 闭区间 `[start, end]`，`end` 不早于 `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// 周期开始日期（含）
    pub start: NaiveDate,
    /// 周期结束日期（含）
    pub end: NaiveDate,
}

/// 解析循环规则在指定运行日期下的适用周期
///
/// 纯函数，无副作用。不可解析的配置（未识别的类型、自定义类型
/// 缺少正的天数间隔）返回 `None`，调用方按跳过处理而非报错。
///
/// # 参数
///
/// * `rule` - 循环规则
/// * `anchor_date` - 相位锚定日期，仅双周和自定义类型使用
/// * `run_date` - 运行日期
///
/// # 返回值
///
/// * `Some(Period)` - 包含运行日期的具体周期区间
/// * `None` - 规则在该运行日期下不可解析
pub fn resolve(rule: &RecurrenceRule, anchor_date: NaiveDate, run_date: NaiveDate) -> Option<Period> {
    match rule.kind? {
        RecurrenceKind::Weekly => {
            let start = week_start(run_date);
            Some(Period {
                start,
                end: start + Duration::days(6),
            })
        }
        RecurrenceKind::Monthly => month_of(run_date),
        RecurrenceKind::Quarterly => quarter_of(run_date),
        RecurrenceKind::Biweekly => Some(aligned(anchor_date, run_date, 14)),
        RecurrenceKind::Custom => {
            let interval = i64::from(rule.interval_days?);
            if interval <= 0 {
                return None;
            }
            Some(aligned(anchor_date, run_date, interval))
        }
    }
}

/// 返回日期所在日历周的周一
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// 日期所在日历月的首末两天
fn month_of(date: NaiveDate) -> Option<Period> {
    let start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
    let end = next_month_start(date.year(), date.month())?.pred_opt()?;
    Some(Period { start, end })
}

/// 日期所在日历季度的首末两天
fn quarter_of(date: NaiveDate) -> Option<Period> {
    let quarter_month = ((date.month() - 1) / 3) * 3 + 1;
    let start = NaiveDate::from_ymd_opt(date.year(), quarter_month, 1)?;
    let end = next_month_start(date.year(), quarter_month + 2)?.pred_opt()?;
    Some(Period { start, end })
}

fn next_month_start(year: i32, month: u32) -> Option<NaiveDate> {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
}

/// N天周期的相位对齐
///
/// 锚定日期可以晚于运行日期，欧几里得取模保证偏移始终落在
/// `[0, n)` 内，周期函数对负输入同样成立。
fn aligned(anchor_date: NaiveDate, run_date: NaiveDate, n: i64) -> Period {
    let days_since_anchor = (run_date - anchor_date).num_days();
    let offset = days_since_anchor.rem_euclid(n);
    let start = run_date - Duration::days(offset);
    Period {
        start,
        end: start + Duration::days(n - 1),
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
