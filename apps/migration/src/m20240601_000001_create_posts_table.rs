use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Posts::Title)
                            .string_len(100)
                            .not_null()
                            .check(Expr::col(Posts::Title).ne("")),
                    )
                    .col(
                        ColumnDef::new(Posts::Content)
                            .text()
                            .not_null()
                            .check(Expr::col(Posts::Content).ne("")),
                    )
                    .col(
                        ColumnDef::new(Posts::Category)
                            .string()
                            .not_null()
                            .check(Expr::col(Posts::Category).ne("")),
                    )
                    .col(
                        ColumnDef::new(Posts::Tags)
                            .array(ColumnType::String(StringLen::N(50)))
                            .not_null()
                            .default(Expr::cust("'{}'")),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Content,
    Category,
    Tags,
    CreatedAt,
    UpdatedAt,
}
