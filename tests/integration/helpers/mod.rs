// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{NaiveDate, Utc};
use cyclegen::domain::services::auto_generate_service::AutoGenerateCyclesService;
use cyclegen::domain::services::generate_cycle_service::GenerateCycleService;
use cyclegen::infrastructure::database::entities::{
    client, client_template_assignment, cycle_template, template_task,
};
use cyclegen::infrastructure::repositories::assignment_repo_impl::AssignmentRepositoryImpl;
use cyclegen::infrastructure::repositories::audit_log_repo_impl::AuditLogRepositoryImpl;
use cyclegen::infrastructure::repositories::cycle_repo_impl::CycleRepositoryImpl;
use cyclegen::infrastructure::repositories::template_repo_impl::TemplateRepositoryImpl;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub db: Arc<DatabaseConnection>,
    pub generator: Arc<GenerateCycleService>,
    pub service: Arc<AutoGenerateCyclesService>,
}

pub async fn create_test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None).await.unwrap();

    let generator = Arc::new(GenerateCycleService::new(
        Arc::new(TemplateRepositoryImpl::new(db.clone())),
        Arc::new(CycleRepositoryImpl::new(db.clone())),
        Arc::new(AuditLogRepositoryImpl::new(db.clone())),
    ));
    let service = Arc::new(AutoGenerateCyclesService::new(
        Arc::new(AssignmentRepositoryImpl::new(db.clone())),
        generator.clone(),
    ));

    TestApp {
        db,
        generator,
        service,
    }
}

pub async fn seed_client(db: &DatabaseConnection, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    client::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn seed_template(
    db: &DatabaseConnection,
    name: &str,
    recurrence_type: &str,
    interval_days: Option<i32>,
) -> Uuid {
    let id = Uuid::new_v4();
    cycle_template::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        description: Set(None),
        recurrence_type: Set(recurrence_type.to_string()),
        interval_days: Set(interval_days),
        is_active: Set(true),
        auto_generate: Set(true),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

#[allow(clippy::too_many_arguments)]
pub async fn seed_template_task(
    db: &DatabaseConnection,
    template_id: Uuid,
    title: &str,
    position: Option<i32>,
    due_anchor: Option<&str>,
    due_unit: Option<&str>,
    due_value: Option<i64>,
) -> Uuid {
    let id = Uuid::new_v4();
    template_task::ActiveModel {
        id: Set(id),
        template_id: Set(template_id),
        title: Set(title.to_string()),
        description: Set(None),
        position: Set(position),
        default_assignee: Set(None),
        evidence_required: Set(false),
        due_anchor: Set(due_anchor.map(str::to_string)),
        due_unit: Set(due_unit.map(str::to_string)),
        due_value: Set(due_value),
        prerequisite_ids: Set(None),
        is_active: Set(true),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn seed_assignment(
    db: &DatabaseConnection,
    client_id: Uuid,
    template_id: Uuid,
    starts_on: Option<NaiveDate>,
) -> Uuid {
    let id = Uuid::new_v4();
    client_template_assignment::ActiveModel {
        id: Set(id),
        client_id: Set(client_id),
        template_id: Set(template_id),
        status: Set("active".to_string()),
        auto_generate: Set(true),
        starts_on: Set(starts_on),
        ends_on: Set(None),
        created_at: Set(Utc::now().into()),
        updated_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}
