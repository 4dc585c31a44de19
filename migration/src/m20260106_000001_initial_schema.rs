use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create clients table
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clients::Name).string().not_null())
                    .col(
                        ColumnDef::new(Clients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Clients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create cycle_templates table
        manager
            .create_table(
                Table::create()
                    .table(CycleTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CycleTemplates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CycleTemplates::Name).string().not_null())
                    .col(ColumnDef::new(CycleTemplates::Description).text())
                    .col(
                        ColumnDef::new(CycleTemplates::RecurrenceType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CycleTemplates::IntervalDays).integer())
                    .col(
                        ColumnDef::new(CycleTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(CycleTemplates::AutoGenerate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CycleTemplates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(CycleTemplates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create template_tasks table
        manager
            .create_table(
                Table::create()
                    .table(TemplateTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TemplateTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TemplateTasks::TemplateId).uuid().not_null())
                    .col(ColumnDef::new(TemplateTasks::Title).string().not_null())
                    .col(ColumnDef::new(TemplateTasks::Description).text())
                    .col(ColumnDef::new(TemplateTasks::Position).integer())
                    .col(ColumnDef::new(TemplateTasks::DefaultAssignee).uuid())
                    .col(
                        ColumnDef::new(TemplateTasks::EvidenceRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(TemplateTasks::DueAnchor).string())
                    .col(ColumnDef::new(TemplateTasks::DueUnit).string())
                    .col(ColumnDef::new(TemplateTasks::DueValue).big_integer())
                    .col(ColumnDef::new(TemplateTasks::PrerequisiteIds).json())
                    .col(
                        ColumnDef::new(TemplateTasks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(TemplateTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create client_template_assignments table
        manager
            .create_table(
                Table::create()
                    .table(ClientTemplateAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::ClientId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::TemplateId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::AutoGenerate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ClientTemplateAssignments::StartsOn).date())
                    .col(ColumnDef::new(ClientTemplateAssignments::EndsOn).date())
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ClientTemplateAssignments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create operation_cycles table
        manager
            .create_table(
                Table::create()
                    .table(OperationCycles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperationCycles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OperationCycles::ClientId).uuid().not_null())
                    .col(
                        ColumnDef::new(OperationCycles::TemplateId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationCycles::AssignmentId).uuid())
                    .col(
                        ColumnDef::new(OperationCycles::PeriodStart)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationCycles::PeriodEnd).date().not_null())
                    .col(ColumnDef::new(OperationCycles::Label).string().not_null())
                    .col(
                        ColumnDef::new(OperationCycles::GenerationMode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationCycles::Status).string().not_null())
                    .col(
                        ColumnDef::new(OperationCycles::GeneratedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationCycles::GeneratedBy).uuid())
                    .col(
                        ColumnDef::new(OperationCycles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create operation_tasks table
        manager
            .create_table(
                Table::create()
                    .table(OperationTasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OperationTasks::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OperationTasks::CycleId).uuid().not_null())
                    .col(ColumnDef::new(OperationTasks::TemplateTaskId).uuid())
                    .col(ColumnDef::new(OperationTasks::Title).string().not_null())
                    .col(ColumnDef::new(OperationTasks::Description).text())
                    .col(
                        ColumnDef::new(OperationTasks::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OperationTasks::Status).string().not_null())
                    .col(ColumnDef::new(OperationTasks::AssignedTo).uuid())
                    .col(
                        ColumnDef::new(OperationTasks::EvidenceRequired)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(OperationTasks::DueAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(OperationTasks::PrerequisiteIds).json())
                    .col(
                        ColumnDef::new(OperationTasks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create audit_logs table
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditLogs::SubjectType).string().not_null())
                    .col(ColumnDef::new(AuditLogs::SubjectId).uuid().not_null())
                    .col(ColumnDef::new(AuditLogs::Action).string().not_null())
                    .col(ColumnDef::new(AuditLogs::ActorId).uuid())
                    .col(ColumnDef::new(AuditLogs::Metadata).text())
                    .col(
                        ColumnDef::new(AuditLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_template_tasks_template_id")
                    .table(TemplateTasks::Table)
                    .col(TemplateTasks::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_client_id")
                    .table(ClientTemplateAssignments::Table)
                    .col(ClientTemplateAssignments::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_template_id")
                    .table(ClientTemplateAssignments::Table)
                    .col(ClientTemplateAssignments::TemplateId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_operation_tasks_cycle_id")
                    .table(OperationTasks::Table)
                    .col(OperationTasks::CycleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_logs_subject")
                    .table(AuditLogs::Table)
                    .col(AuditLogs::SubjectType)
                    .col(AuditLogs::SubjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OperationTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OperationCycles::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(ClientTemplateAssignments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(TemplateTasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CycleTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clients::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CycleTemplates {
    Table,
    Id,
    Name,
    Description,
    RecurrenceType,
    IntervalDays,
    IsActive,
    AutoGenerate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TemplateTasks {
    Table,
    Id,
    TemplateId,
    Title,
    Description,
    Position,
    DefaultAssignee,
    EvidenceRequired,
    DueAnchor,
    DueUnit,
    DueValue,
    PrerequisiteIds,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ClientTemplateAssignments {
    Table,
    Id,
    ClientId,
    TemplateId,
    Status,
    AutoGenerate,
    StartsOn,
    EndsOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OperationCycles {
    Table,
    Id,
    ClientId,
    TemplateId,
    AssignmentId,
    PeriodStart,
    PeriodEnd,
    Label,
    GenerationMode,
    Status,
    GeneratedAt,
    GeneratedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OperationTasks {
    Table,
    Id,
    CycleId,
    TemplateTaskId,
    Title,
    Description,
    Position,
    Status,
    AssignedTo,
    EvidenceRequired,
    DueAt,
    PrerequisiteIds,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    SubjectType,
    SubjectId,
    Action,
    ActorId,
    Metadata,
    CreatedAt,
}
