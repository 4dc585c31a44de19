// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use cyclegen::config::settings::Settings;
use cyclegen::domain::services::auto_generate_service::AutoGenerateCyclesService;
use cyclegen::domain::services::generate_cycle_service::GenerateCycleService;
use cyclegen::infrastructure::database::connection;
use cyclegen::infrastructure::repositories::assignment_repo_impl::AssignmentRepositoryImpl;
use cyclegen::infrastructure::repositories::audit_log_repo_impl::AuditLogRepositoryImpl;
use cyclegen::infrastructure::repositories::cycle_repo_impl::CycleRepositoryImpl;
use cyclegen::infrastructure::repositories::template_repo_impl::TemplateRepositoryImpl;
use cyclegen::utils::telemetry;
use cyclegen::workers::cycle_worker::CycleWorker;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动周期生成工作器。
/// 传入 `--once` 时只执行一次批量生成后退出，便于外部cron触发。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting cyclegen...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Wire repositories and services
    let assignment_repo = Arc::new(AssignmentRepositoryImpl::new(db.clone()));
    let template_repo = Arc::new(TemplateRepositoryImpl::new(db.clone()));
    let cycle_repo = Arc::new(CycleRepositoryImpl::new(db.clone()));
    let audit_repo = Arc::new(AuditLogRepositoryImpl::new(db.clone()));

    let generator = Arc::new(GenerateCycleService::new(
        template_repo,
        cycle_repo,
        audit_repo,
    ));
    let service = Arc::new(AutoGenerateCyclesService::new(assignment_repo, generator));

    // 5. One-shot mode for external schedulers
    if std::env::args().any(|arg| arg == "--once") {
        let summary = service.run(None, None).await?;
        info!(
            "Generation finished: {} generated, {} skipped, {} errors",
            summary.generated_count,
            summary.skipped_count,
            summary.errors.len()
        );
        for err in &summary.errors {
            warn!("{}", err);
        }
        return Ok(());
    }

    // 6. Start the periodic worker
    let worker = CycleWorker::new(
        service,
        Duration::from_secs(settings.scheduler.interval_hours * 3600),
    );
    worker.start().await?;

    Ok(())
}
