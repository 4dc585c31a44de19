// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::assignment::Assignment;
use crate::domain::models::cycle::GenerationMode;
use crate::domain::models::recurrence::{RecurrenceKind, RecurrenceRule};
use crate::domain::repositories::assignment_repository::AssignmentRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::generate_cycle_service::{
    GenerateCycleService, MaterializeOutcome, MaterializeRequest,
};
use crate::domain::services::period;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// 批量生成汇总
///
/// 一次完整批量运行的聚合结果。单个分配的失败只会体现为
/// 一条错误记录，不会中止批量。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// 本次运行创建的周期数
    pub generated_count: u32,
    /// 跳过的分配数，包括周期不可解析和同键周期已存在两种情况
    pub skipped_count: u32,
    /// 按分配记录的错误，格式为 "<分配ID>: <原因>"
    pub errors: Vec<String>,
}

impl GenerationSummary {
    /// 将一个分配的物化结果折叠进汇总
    ///
    /// 纯聚合逻辑，与I/O无关，可独立测试
    fn absorb(&mut self, assignment_id: Uuid, outcome: MaterializeOutcome) {
        match outcome {
            MaterializeOutcome::Created(_) => self.generated_count += 1,
            MaterializeOutcome::Duplicate => self.skipped_count += 1,
            MaterializeOutcome::Rejected(reason) => {
                self.errors.push(format!("{}: {}", assignment_id, reason));
            }
        }
    }
}

/// 自动生成服务
///
/// 批量驱动器：枚举运行日期下所有适用的分配，逐一解析周期
/// 并调用物化服务，把结果聚合为一份汇总。设计为由外部调度器
/// （如每日cron）幂等地触发，同一天重复调用不会产生重复周期。
pub struct AutoGenerateCyclesService {
    assignments: Arc<dyn AssignmentRepository>,
    generator: Arc<GenerateCycleService>,
}

impl AutoGenerateCyclesService {
    /// 创建新的自动生成服务实例
    pub fn new(
        assignments: Arc<dyn AssignmentRepository>,
        generator: Arc<GenerateCycleService>,
    ) -> Self {
        Self {
            assignments,
            generator,
        }
    }

    /// 执行一次完整的批量生成
    ///
    /// 周期不可解析的分配静默跳过；物化返回的重复计入跳过；
    /// 被拒绝的分配记入错误列表后继续处理后续分配。只有最初的
    /// 适用分配枚举失败才会使整次运行出错，此时尚无可聚合的内容。
    ///
    /// # 参数
    ///
    /// * `run_date` - 运行日期，缺省为本地日历的今天
    /// * `actor_id` - 操作者ID，自动触发时为空
    ///
    /// # 返回值
    ///
    /// * `Ok(GenerationSummary)` - 批量汇总
    /// * `Err(RepositoryError)` - 适用分配枚举失败
    pub async fn run(
        &self,
        run_date: Option<NaiveDate>,
        actor_id: Option<Uuid>,
    ) -> Result<GenerationSummary, RepositoryError> {
        let run_date = run_date.unwrap_or_else(|| Local::now().date_naive());
        let eligible = self.assignments.find_eligible(run_date).await?;
        info!(
            "Cycle auto-generation started: {} eligible assignments for {}",
            eligible.len(),
            run_date
        );

        let mut summary = GenerationSummary::default();
        for entry in eligible {
            let anchor = anchor_date(&entry.assignment, &entry.template.recurrence, run_date);
            let Some(period) = period::resolve(&entry.template.recurrence, anchor, run_date)
            else {
                // Unresolvable recurrence is an expected, silent skip
                summary.skipped_count += 1;
                continue;
            };

            let outcome = self
                .generator
                .materialize(MaterializeRequest {
                    client_id: entry.assignment.client_id,
                    template: entry.template,
                    assignment_id: Some(entry.assignment.id),
                    period_start: Some(period.start),
                    period_end: Some(period.end),
                    generation_mode: GenerationMode::Auto,
                    actor_id,
                })
                .await;
            summary.absorb(entry.assignment.id, outcome);
        }

        info!(
            "Cycle auto-generation finished: {} generated, {} skipped, {} errors",
            summary.generated_count,
            summary.skipped_count,
            summary.errors.len()
        );
        Ok(summary)
    }
}

/// 分配的相位锚定日期
///
/// 显式开始日期优先。缺省时双周回退到运行日期所在周的周一，
/// 自定义回退到运行日期本身。两者的不对称是历史行为，
/// 统一会改变既有数据的周期边界。
fn anchor_date(assignment: &Assignment, rule: &RecurrenceRule, run_date: NaiveDate) -> NaiveDate {
    if let Some(starts_on) = assignment.starts_on {
        return starts_on;
    }
    match rule.kind {
        Some(RecurrenceKind::Biweekly) => period::week_start(run_date),
        _ => run_date,
    }
}

#[cfg(test)]
#[path = "auto_generate_service_test.rs"]
mod tests;
