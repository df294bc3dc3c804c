use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contacts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contacts::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Contacts::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Contacts::Email).string_len(100).not_null())
                    .col(ColumnDef::new(Contacts::Phone).string_len(20).null())
                    .col(ColumnDef::new(Contacts::Birthday).date().null())
                    .col(ColumnDef::new(Contacts::Notes).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Birthday,
    Notes,
}
