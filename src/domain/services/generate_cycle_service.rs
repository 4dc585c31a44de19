// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::cycle::{GenerationMode, OperationCycle, OperationTask};
use crate::domain::models::template::{DueAnchor, DueOffset, DueUnit, TaskTemplate, Template};
use crate::domain::repositories::audit_log_repository::AuditLogRepository;
use crate::domain::repositories::cycle_repository::{CycleKey, CycleRepository};
use crate::domain::repositories::template_repository::TemplateRepository;
use crate::domain::repositories::RepositoryError;
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, TimeZone};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// 物化结果
///
/// 区分创建成功、同键周期已存在和被拒绝三种结果。
/// `Duplicate` 是幂等重跑和并发竞争下的预期结果，不是错误。
#[derive(Debug)]
pub enum MaterializeOutcome {
    /// 周期及其任务清单已创建
    Created(OperationCycle),
    /// 同一(客户, 模板, 周期)键的周期已存在
    Duplicate,
    /// 校验失败或持久化错误，携带可读的原因
    Rejected(String),
}

/// 物化请求
///
/// 周期日期在此边界上是可选的：手动触发路径可能携带
/// 缺失或未解析的日期，缺失时请求被拒绝而非崩溃。
#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    /// 客户ID
    pub client_id: Uuid,
    /// 目标模板
    pub template: Template,
    /// 来源分配ID，手动生成时可为空
    pub assignment_id: Option<Uuid>,
    /// 周期开始日期
    pub period_start: Option<NaiveDate>,
    /// 周期结束日期
    pub period_end: Option<NaiveDate>,
    /// 生成方式
    pub generation_mode: GenerationMode,
    /// 操作者ID
    pub actor_id: Option<Uuid>,
}

/// 周期物化服务
///
/// 为一个(客户, 模板, 周期)三元组创建运营周期及其有序任务清单，
/// 强制每周期至多一次。创建是全有或全无的：周期和任务在单个
/// 事务中写入，失败不留下部分数据。
pub struct GenerateCycleService {
    templates: Arc<dyn TemplateRepository>,
    cycles: Arc<dyn CycleRepository>,
    audit_logs: Arc<dyn AuditLogRepository>,
}

impl GenerateCycleService {
    /// 创建新的周期物化服务实例
    pub fn new(
        templates: Arc<dyn TemplateRepository>,
        cycles: Arc<dyn CycleRepository>,
        audit_logs: Arc<dyn AuditLogRepository>,
    ) -> Self {
        Self {
            templates,
            cycles,
            audit_logs,
        }
    }

    /// 物化一个运营周期
    ///
    /// 校验按固定顺序短路执行：周期日期齐全、区间次序合法、
    /// 模板启用、同键周期不存在。预检查只是优化，提交时的
    /// 唯一约束冲突同样映射为 `Duplicate`，这是并发安全的
    /// 最终保障。
    ///
    /// # 参数
    ///
    /// * `request` - 物化请求
    ///
    /// # 返回值
    ///
    /// 返回物化结果，本方法不会panic也不返回Err
    pub async fn materialize(&self, request: MaterializeRequest) -> MaterializeOutcome {
        let (Some(period_start), Some(period_end)) = (request.period_start, request.period_end)
        else {
            return MaterializeOutcome::Rejected("period required".to_string());
        };

        if period_end < period_start {
            return MaterializeOutcome::Rejected(format!(
                "invalid period range: {} - {}",
                period_start, period_end
            ));
        }

        if !request.template.is_active {
            return MaterializeOutcome::Rejected("template is inactive".to_string());
        }

        let key = CycleKey {
            client_id: request.client_id,
            template_id: request.template.id,
            period_start,
            period_end,
        };
        match self.cycles.exists(&key).await {
            Ok(true) => return MaterializeOutcome::Duplicate,
            Ok(false) => {}
            Err(e) => return MaterializeOutcome::Rejected(e.to_string()),
        }

        let task_templates = match self.templates.find_active_tasks(request.template.id).await {
            Ok(task_templates) => task_templates,
            Err(e) => return MaterializeOutcome::Rejected(e.to_string()),
        };

        let label = format!(
            "{} ({} - {})",
            request.template.name, period_start, period_end
        );
        let cycle = OperationCycle::new(
            request.client_id,
            request.template.id,
            request.assignment_id,
            period_start,
            period_end,
            label,
            request.generation_mode,
            request.actor_id,
        );
        let tasks = build_tasks(&task_templates, cycle.id, period_start, period_end);

        match self.cycles.create_with_tasks(&cycle, &tasks).await {
            Ok(created) => {
                info!(
                    "Generated cycle {} with {} tasks for client {}",
                    created.label,
                    tasks.len(),
                    created.client_id
                );
                self.audit_created(&created, request.actor_id).await;
                MaterializeOutcome::Created(created)
            }
            // A concurrent materialization of the same key won the commit
            Err(RepositoryError::AlreadyExists) => MaterializeOutcome::Duplicate,
            Err(e) => MaterializeOutcome::Rejected(e.to_string()),
        }
    }

    /// 追加创建审计记录，失败只记录日志不影响已提交的周期
    async fn audit_created(&self, cycle: &OperationCycle, actor_id: Option<Uuid>) {
        let metadata = format!(
            "Generated operation cycle for period {} - {}",
            cycle.period_start, cycle.period_end
        );
        if let Err(e) = self
            .audit_logs
            .record("operation_cycle", cycle.id, "created", actor_id, &metadata)
            .await
        {
            warn!("Failed to write audit log for cycle {}: {}", cycle.id, e);
        }
    }
}

/// 按模板顺序构建周期的任务清单
///
/// 排序键为(position升序, 创建时间, ID)，缺省position排在显式
/// 位置之后并按创建顺序保持稳定；缺省位置以最终顺序的1起始
/// 序号回填。
fn build_tasks(
    task_templates: &[TaskTemplate],
    cycle_id: Uuid,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Vec<OperationTask> {
    let mut ordered: Vec<&TaskTemplate> = task_templates.iter().collect();
    ordered.sort_by_key(|t| (t.position.unwrap_or(i32::MAX), t.created_at, t.id));

    ordered
        .iter()
        .enumerate()
        .map(|(index, template_task)| {
            let position = template_task.position.unwrap_or(index as i32 + 1);
            let due_at = due_date(&template_task.due_offset, period_start, period_end);
            OperationTask::from_template(template_task, cycle_id, position, due_at)
        })
        .collect()
}

/// 计算任务到期时间
///
/// 基准为周期结束日的一天结束（cycle_end）或周期开始日的零点
/// （cycle_start），加上按单位换算的偏移量。未定义偏移量的任务
/// 没有到期时间。
fn due_date(
    offset: &DueOffset,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Option<DateTime<FixedOffset>> {
    let value = offset.value?;
    let base = match offset.anchor {
        DueAnchor::CycleStart => period_start.and_hms_opt(0, 0, 0)?,
        DueAnchor::CycleEnd => period_end.and_hms_opt(23, 59, 59)?,
    };
    let due = match offset.unit {
        DueUnit::Hours => base + Duration::hours(value),
        DueUnit::Days => base + Duration::days(value),
    };
    Some(Local.from_local_datetime(&due).earliest()?.fixed_offset())
}

#[cfg(test)]
#[path = "generate_cycle_service_test.rs"]
mod tests;
