// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::RepositoryError;
use crate::domain::services::auto_generate_service::{AutoGenerateCyclesService, GenerationSummary};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// 周期生成工作器
///
/// 按固定间隔触发一次批量自动生成。生成本身是幂等的，
/// 间隔重叠或与手动触发并发都不会产生重复周期。
pub struct CycleWorker {
    service: Arc<AutoGenerateCyclesService>,
    interval: Duration,
}

impl CycleWorker {
    pub fn new(service: Arc<AutoGenerateCyclesService>, interval: Duration) -> Self {
        Self { service, interval }
    }

    /// 运行工作器
    pub async fn run(&self) {
        info!("Cycle generation worker started");

        let mut interval = tokio::time::interval(self.interval);

        loop {
            interval.tick().await;

            match self.generate_once().await {
                Ok(summary) => {
                    info!(
                        "Cycle generation pass: {} generated, {} skipped",
                        summary.generated_count, summary.skipped_count
                    );
                    for err in &summary.errors {
                        warn!("Cycle generation error: {}", err);
                    }
                }
                Err(e) => {
                    error!("Cycle generation pass failed: {}", e);
                }
            }
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 对本地日历的今天执行一次自动生成
    pub async fn generate_once(&self) -> Result<GenerationSummary, RepositoryError> {
        self.service.run(None, None).await
    }
}

#[cfg(test)]
#[path = "cycle_worker_test.rs"]
mod tests;
