use sea_orm_migration::prelude::*;

use crate::m20260820_000002_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建生成日志表，删除项目时级联删除其日志
        manager
            .create_table(
                Table::create()
                    .table(Logs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Logs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Logs::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Logs::UserPrompt).text().not_null())
                    .col(ColumnDef::new(Logs::LlmResponse).text().not_null())
                    .col(ColumnDef::new(Logs::ExecutionTime).double().not_null())
                    .col(
                        ColumnDef::new(Logs::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_logs_project_id")
                            .from(Logs::Table, Logs::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_logs_project_id")
                    .table(Logs::Table)
                    .col(Logs::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Logs::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub enum Logs {
    Table,
    Id,
    ProjectId,
    UserPrompt,
    LlmResponse,
    ExecutionTime,
    CreatedAt,
}
