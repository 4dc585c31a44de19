#[cfg(test)]
mod tests {
    use crate::domain::models::cycle::GenerationMode;
    use crate::domain::models::template::{TaskTemplate, Template};
    use crate::domain::repositories::audit_log_repository::AuditLogRepository;
    use crate::domain::repositories::cycle_repository::{CycleKey, CycleRepository};
    use crate::domain::repositories::template_repository::TemplateRepository;
    use crate::domain::repositories::RepositoryError;
    use crate::domain::services::generate_cycle_service::{
        GenerateCycleService, MaterializeOutcome, MaterializeRequest,
    };
    use crate::infrastructure::database::entities::{
        audit_log, client, cycle_template, operation_cycle, operation_task, template_task,
    };
    use crate::infrastructure::repositories::audit_log_repo_impl::AuditLogRepositoryImpl;
    use crate::infrastructure::repositories::cycle_repo_impl::CycleRepositoryImpl;
    use crate::infrastructure::repositories::template_repo_impl::TemplateRepositoryImpl;
    use async_trait::async_trait;
    use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
        QueryFilter, QueryOrder, Set,
    };
    use std::sync::Arc;
    use uuid::Uuid;

    async fn setup_db() -> Arc<DatabaseConnection> {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let db = Arc::new(db);
        Migrator::up(db.as_ref(), None).await.unwrap();
        db
    }

    fn service(db: &Arc<DatabaseConnection>) -> GenerateCycleService {
        GenerateCycleService::new(
            Arc::new(TemplateRepositoryImpl::new(db.clone())),
            Arc::new(CycleRepositoryImpl::new(db.clone())),
            Arc::new(AuditLogRepositoryImpl::new(db.clone())),
        )
    }

    async fn create_client(db: &DatabaseConnection) -> Uuid {
        let client_id = Uuid::new_v4();
        let model = client::ActiveModel {
            id: Set(client_id),
            name: Set("Test Client".to_string()),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        model.insert(db).await.unwrap();
        client_id
    }

    async fn create_template(db: &DatabaseConnection, is_active: bool) -> Template {
        let model = cycle_template::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Monthly bookkeeping".to_string()),
            description: Set(None),
            recurrence_type: Set("monthly".to_string()),
            interval_days: Set(None),
            is_active: Set(is_active),
            auto_generate: Set(true),
            created_at: Set(Utc::now().into()),
            updated_at: Set(Utc::now().into()),
        };
        model.insert(db).await.unwrap().into()
    }

    #[allow(clippy::too_many_arguments)]
    async fn create_template_task(
        db: &DatabaseConnection,
        template_id: Uuid,
        title: &str,
        position: Option<i32>,
        due_anchor: Option<&str>,
        due_unit: Option<&str>,
        due_value: Option<i64>,
        created_at_offset_secs: i64,
    ) -> Uuid {
        let task_id = Uuid::new_v4();
        let model = template_task::ActiveModel {
            id: Set(task_id),
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
            created_at: Set((Utc::now() + Duration::seconds(created_at_offset_secs)).into()),
        };
        model.insert(db).await.unwrap();
        task_id
    }

    fn request(client_id: Uuid, template: Template) -> MaterializeRequest {
        MaterializeRequest {
            client_id,
            template,
            assignment_id: None,
            period_start: NaiveDate::from_ymd_opt(2026, 3, 1),
            period_end: NaiveDate::from_ymd_opt(2026, 3, 31),
            generation_mode: GenerationMode::Manual,
            actor_id: Some(Uuid::new_v4()),
        }
    }

    async fn count_rows(db: &DatabaseConnection) -> (u64, u64) {
        let cycles = operation_cycle::Entity::find().count(db).await.unwrap();
        let tasks = operation_task::Entity::find().count(db).await.unwrap();
        (cycles, tasks)
    }

    #[tokio::test]
    async fn test_materialize_rejects_missing_period() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        let mut req = request(client_id, template);
        req.period_end = None;

        match service(&db).materialize(req).await {
            MaterializeOutcome::Rejected(reason) => assert_eq!(reason, "period required"),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(count_rows(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_materialize_rejects_inverted_period() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        let mut req = request(client_id, template);
        req.period_start = NaiveDate::from_ymd_opt(2026, 3, 31);
        req.period_end = NaiveDate::from_ymd_opt(2026, 3, 1);

        match service(&db).materialize(req).await {
            MaterializeOutcome::Rejected(reason) => {
                assert!(reason.contains("invalid period range"));
                assert!(reason.contains("2026-03-31"));
                assert!(reason.contains("2026-03-01"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(count_rows(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_materialize_rejects_inactive_template() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, false).await;

        match service(&db).materialize(request(client_id, template)).await {
            MaterializeOutcome::Rejected(reason) => assert_eq!(reason, "template is inactive"),
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(count_rows(&db).await, (0, 0));
    }

    #[tokio::test]
    async fn test_materialize_creates_cycle_with_ordered_tasks() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        // Deliberately created in reverse position order
        create_template_task(&db, template.id, "Review", Some(5), None, None, None, 0).await;
        create_template_task(&db, template.id, "Collect documents", Some(1), None, None, None, 1)
            .await;

        let req = request(client_id, template.clone());
        let actor_id = req.actor_id;
        let cycle = match service(&db).materialize(req).await {
            MaterializeOutcome::Created(cycle) => cycle,
            other => panic!("expected creation, got {:?}", other),
        };

        assert_eq!(
            cycle.label,
            "Monthly bookkeeping (2026-03-01 - 2026-03-31)"
        );
        assert_eq!(cycle.generated_by, actor_id);

        let tasks = operation_task::Entity::find()
            .filter(operation_task::Column::CycleId.eq(cycle.id))
            .order_by_asc(operation_task::Column::Position)
            .all(db.as_ref())
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Collect documents");
        assert_eq!(tasks[0].position, 1);
        assert_eq!(tasks[0].status, "not_started");
        assert_eq!(tasks[1].title, "Review");
        assert_eq!(tasks[1].position, 5);

        // One audit record for the created cycle
        let audits = audit_log::Entity::find()
            .filter(audit_log::Column::SubjectId.eq(cycle.id))
            .all(db.as_ref())
            .await
            .unwrap();
        assert_eq!(audits.len(), 1);
        assert_eq!(audits[0].action, "created");
        assert_eq!(audits[0].subject_type, "operation_cycle");
        assert_eq!(audits[0].actor_id, actor_id);
    }

    #[tokio::test]
    async fn test_materialize_backfills_positions_by_creation_order() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        create_template_task(&db, template.id, "First", None, None, None, None, 0).await;
        create_template_task(&db, template.id, "Second", None, None, None, None, 1).await;
        create_template_task(&db, template.id, "Third", None, None, None, None, 2).await;

        let cycle = match service(&db).materialize(request(client_id, template)).await {
            MaterializeOutcome::Created(cycle) => cycle,
            other => panic!("expected creation, got {:?}", other),
        };

        let tasks = operation_task::Entity::find()
            .filter(operation_task::Column::CycleId.eq(cycle.id))
            .order_by_asc(operation_task::Column::Position)
            .all(db.as_ref())
            .await
            .unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        let positions: Vec<i32> = tasks.iter().map(|t| t.position).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_materialize_computes_due_dates() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        create_template_task(
            &db,
            template.id,
            "File return",
            Some(1),
            Some("cycle_end"),
            Some("days"),
            Some(5),
            0,
        )
        .await;
        create_template_task(
            &db,
            template.id,
            "Kickoff call",
            Some(2),
            Some("cycle_start"),
            Some("hours"),
            Some(9),
            1,
        )
        .await;
        create_template_task(&db, template.id, "No deadline", Some(3), None, None, None, 2).await;

        let cycle = match service(&db).materialize(request(client_id, template)).await {
            MaterializeOutcome::Created(cycle) => cycle,
            other => panic!("expected creation, got {:?}", other),
        };

        let tasks = operation_task::Entity::find()
            .filter(operation_task::Column::CycleId.eq(cycle.id))
            .order_by_asc(operation_task::Column::Position)
            .all(db.as_ref())
            .await
            .unwrap();

        let end_of_period = NaiveDate::from_ymd_opt(2026, 3, 31)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let expected_file = Local
            .from_local_datetime(&(end_of_period + Duration::days(5)))
            .earliest()
            .unwrap()
            .fixed_offset();
        assert_eq!(tasks[0].due_at, Some(expected_file));

        let start_of_period = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let expected_kickoff = Local
            .from_local_datetime(&(start_of_period + Duration::hours(9)))
            .earliest()
            .unwrap()
            .fixed_offset();
        assert_eq!(tasks[1].due_at, Some(expected_kickoff));

        assert_eq!(tasks[2].due_at, None);
    }

    #[tokio::test]
    async fn test_materialize_second_call_is_duplicate() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;
        create_template_task(&db, template.id, "Only task", Some(1), None, None, None, 0).await;

        let svc = service(&db);
        assert!(matches!(
            svc.materialize(request(client_id, template.clone())).await,
            MaterializeOutcome::Created(_)
        ));
        assert!(matches!(
            svc.materialize(request(client_id, template)).await,
            MaterializeOutcome::Duplicate
        ));
        assert_eq!(count_rows(&db).await, (1, 1));
    }

    // Stubs simulating a concurrent writer winning the commit: the
    // pre-check sees no cycle, the insert then hits the unique index.
    struct NoTasksRepo;

    #[async_trait]
    impl TemplateRepository for NoTasksRepo {
        async fn find_active_tasks(&self, _: Uuid) -> Result<Vec<TaskTemplate>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    struct RacingCycleRepo;

    #[async_trait]
    impl CycleRepository for RacingCycleRepo {
        async fn exists(&self, _: &CycleKey) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        async fn create_with_tasks(
            &self,
            _: &crate::domain::models::cycle::OperationCycle,
            _: &[crate::domain::models::cycle::OperationTask],
        ) -> Result<crate::domain::models::cycle::OperationCycle, RepositoryError> {
            Err(RepositoryError::AlreadyExists)
        }
    }

    struct DiscardAuditRepo;

    #[async_trait]
    impl AuditLogRepository for DiscardAuditRepo {
        async fn record(
            &self,
            _: &str,
            _: Uuid,
            _: &str,
            _: Option<Uuid>,
            _: &str,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_commit_time_conflict_is_reported_as_duplicate() {
        let db = setup_db().await;
        let client_id = create_client(&db).await;
        let template = create_template(&db, true).await;

        let svc = GenerateCycleService::new(
            Arc::new(NoTasksRepo),
            Arc::new(RacingCycleRepo),
            Arc::new(DiscardAuditRepo),
        );

        assert!(matches!(
            svc.materialize(request(client_id, template)).await,
            MaterializeOutcome::Duplicate
        ));
    }
}
