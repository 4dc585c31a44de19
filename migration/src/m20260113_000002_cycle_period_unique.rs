use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The application pre-checks for an existing cycle before inserting,
        // but concurrent runs can both pass that check. This index is the
        // authoritative guard: the losing insert fails at commit time.
        manager
            .create_index(
                Index::create()
                    .name("uq_operation_cycles_period")
                    .table(OperationCycles::Table)
                    .col(OperationCycles::ClientId)
                    .col(OperationCycles::TemplateId)
                    .col(OperationCycles::PeriodStart)
                    .col(OperationCycles::PeriodEnd)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_operation_cycles_period")
                    .table(OperationCycles::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum OperationCycles {
    Table,
    ClientId,
    TemplateId,
    PeriodStart,
    PeriodEnd,
}
