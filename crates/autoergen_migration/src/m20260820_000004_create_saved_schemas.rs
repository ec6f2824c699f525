use sea_orm_migration::prelude::*;

use crate::m20260820_000002_create_projects::Projects;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建建表脚本存档表，version 默认为 1，递增由写入方负责
        manager
            .create_table(
                Table::create()
                    .table(SavedSchemas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SavedSchemas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SavedSchemas::ProjectId).integer().not_null())
                    .col(ColumnDef::new(SavedSchemas::SqlScript).text().not_null())
                    .col(ColumnDef::new(SavedSchemas::DiagramDescription).text())
                    .col(
                        ColumnDef::new(SavedSchemas::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(SavedSchemas::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_saved_schemas_project_id")
                            .from(SavedSchemas::Table, SavedSchemas::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_schemas_project_id")
                    .table(SavedSchemas::Table)
                    .col(SavedSchemas::ProjectId)
                    .to_owned(),
            )
            .await?;

        // 按项目加版本号的复合索引，加速取最新版本
        manager
            .create_index(
                Index::create()
                    .name("idx_saved_schemas_project_version")
                    .table(SavedSchemas::Table)
                    .col(SavedSchemas::ProjectId)
                    .col(SavedSchemas::Version)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedSchemas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SavedSchemas {
    Table,
    Id,
    ProjectId,
    SqlScript,
    DiagramDescription,
    Version,
    CreatedAt,
}
