// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    create_test_app, seed_assignment, seed_client, seed_template, seed_template_task,
};
use chrono::{NaiveDate, Utc};
use cyclegen::domain::models::cycle::GenerationMode;
use cyclegen::domain::models::recurrence::{RecurrenceKind, RecurrenceRule};
use cyclegen::domain::models::template::Template;
use cyclegen::domain::services::generate_cycle_service::{MaterializeOutcome, MaterializeRequest};
use cyclegen::infrastructure::database::entities::{audit_log, operation_cycle, operation_task};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_full_auto_pass_materializes_cycle_checklist() {
    let app = create_test_app().await;
    let client_id = seed_client(&app.db, "Acme Oy").await;
    let template_id = seed_template(&app.db, "Monthly close", "monthly", None).await;
    seed_template_task(
        &app.db,
        template_id,
        "Reconcile bank statements",
        Some(1),
        None,
        None,
        None,
    )
    .await;
    seed_template_task(
        &app.db,
        template_id,
        "File VAT return",
        Some(2),
        Some("cycle_end"),
        Some("days"),
        Some(5),
    )
    .await;
    let assignment_id = seed_assignment(&app.db, client_id, template_id, None).await;

    let summary = app.service.run(Some(date(2026, 3, 10)), None).await.unwrap();
    assert_eq!(summary.generated_count, 1);
    assert_eq!(summary.skipped_count, 0);
    assert!(summary.errors.is_empty());

    let cycles = operation_cycle::Entity::find()
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(cycles.len(), 1);
    let cycle = &cycles[0];
    assert_eq!(cycle.client_id, client_id);
    assert_eq!(cycle.template_id, template_id);
    assert_eq!(cycle.assignment_id, Some(assignment_id));
    assert_eq!(cycle.period_start, date(2026, 3, 1));
    assert_eq!(cycle.period_end, date(2026, 3, 31));
    assert_eq!(cycle.label, "Monthly close (2026-03-01 - 2026-03-31)");
    assert_eq!(cycle.generation_mode, "auto");
    assert_eq!(cycle.status, "active");

    let tasks = operation_task::Entity::find()
        .filter(operation_task::Column::CycleId.eq(cycle.id))
        .order_by_asc(operation_task::Column::Position)
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Reconcile bank statements");
    assert_eq!(tasks[0].status, "not_started");
    assert!(tasks[0].due_at.is_none());
    assert_eq!(tasks[1].title, "File VAT return");
    let due = tasks[1].due_at.unwrap();
    assert_eq!(
        due.naive_local(),
        date(2026, 4, 5).and_hms_opt(23, 59, 59).unwrap()
    );
}

#[tokio::test]
async fn test_manual_trigger_for_generated_period_is_duplicate() {
    let app = create_test_app().await;
    let client_id = seed_client(&app.db, "Acme Oy").await;
    let template_id = seed_template(&app.db, "Monthly close", "monthly", None).await;
    seed_assignment(&app.db, client_id, template_id, None).await;

    let summary = app.service.run(Some(date(2026, 3, 10)), None).await.unwrap();
    assert_eq!(summary.generated_count, 1);

    // An operator re-requesting the same period must not create a second cycle
    let outcome = app
        .generator
        .materialize(MaterializeRequest {
            client_id,
            template: template(template_id),
            assignment_id: None,
            period_start: Some(date(2026, 3, 1)),
            period_end: Some(date(2026, 3, 31)),
            generation_mode: GenerationMode::Manual,
            actor_id: Some(Uuid::new_v4()),
        })
        .await;
    assert!(matches!(outcome, MaterializeOutcome::Duplicate));

    let count = operation_cycle::Entity::find()
        .count(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_manual_generation_records_actor_and_audit_trail() {
    let app = create_test_app().await;
    let client_id = seed_client(&app.db, "Acme Oy").await;
    let template_id = seed_template(&app.db, "Monthly close", "monthly", None).await;
    let actor_id = Uuid::new_v4();

    let outcome = app
        .generator
        .materialize(MaterializeRequest {
            client_id,
            template: template(template_id),
            assignment_id: None,
            period_start: Some(date(2026, 4, 1)),
            period_end: Some(date(2026, 4, 30)),
            generation_mode: GenerationMode::Manual,
            actor_id: Some(actor_id),
        })
        .await;
    let MaterializeOutcome::Created(cycle) = outcome else {
        panic!("expected a created cycle, got {:?}", outcome);
    };
    assert_eq!(cycle.generated_by, Some(actor_id));

    let stored = operation_cycle::Entity::find_by_id(cycle.id)
        .one(app.db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.generation_mode, "manual");
    assert_eq!(stored.generated_by, Some(actor_id));

    let audit_rows = audit_log::Entity::find()
        .filter(audit_log::Column::SubjectId.eq(cycle.id))
        .all(app.db.as_ref())
        .await
        .unwrap();
    assert_eq!(audit_rows.len(), 1);
    assert_eq!(audit_rows[0].subject_type, "operation_cycle");
    assert_eq!(audit_rows[0].action, "created");
    assert_eq!(audit_rows[0].actor_id, Some(actor_id));
}

fn template(template_id: Uuid) -> Template {
    Template {
        id: template_id,
        name: "Monthly close".to_string(),
        description: None,
        recurrence: RecurrenceRule {
            kind: Some(RecurrenceKind::Monthly),
            interval_days: None,
        },
        is_active: true,
        auto_generate: true,
        created_at: Utc::now().into(),
    }
}
