use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create activities table (self-referential hierarchy)
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Activities::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Activities::ParentId).integer())
                    .col(
                        ColumnDef::new(Activities::MaxLevel)
                            .integer()
                            .not_null()
                            .default(2)
                            .check(Expr::col(Activities::MaxLevel).gte(1)),
                    )
                    .col(ColumnDef::new(Activities::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Activities::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_parent_id")
                            .from(Activities::Table, Activities::ParentId)
                            .to(Activities::Table, Activities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activities_parent_id")
                    .table(Activities::Table)
                    .col(Activities::ParentId)
                    .to_owned(),
            )
            .await?;

        // Create buildings table
        manager
            .create_table(
                Table::create()
                    .table(Buildings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Buildings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Buildings::Address)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Buildings::Coordinates)
                            .text()
                            .not_null()
                            .default("[0.0, 0.0]"),
                    )
                    .col(ColumnDef::new(Buildings::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Buildings::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create organizations table
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Organizations::PhoneNumbers)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Organizations::BuildingId).integer().not_null())
                    .col(ColumnDef::new(Organizations::ActivityId).integer().not_null())
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizations_building_id")
                            .from(Organizations::Table, Organizations::BuildingId)
                            .to(Buildings::Table, Buildings::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organizations_activity_id")
                            .from(Organizations::Table, Organizations::ActivityId)
                            .to(Activities::Table, Activities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_building_id")
                    .table(Organizations::Table)
                    .col(Organizations::BuildingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_activity_id")
                    .table(Organizations::Table)
                    .col(Organizations::ActivityId)
                    .to_owned(),
            )
            .await?;

        // Create system_settings table
        manager
            .create_table(
                Table::create()
                    .table(SystemSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SystemSettings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::Key)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SystemSettings::Value).string().not_null())
                    .col(
                        ColumnDef::new(SystemSettings::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SystemSettings::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SystemSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Buildings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
    Name,
    ParentId,
    MaxLevel,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Buildings {
    Table,
    Id,
    Address,
    Coordinates,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    Name,
    PhoneNumbers,
    BuildingId,
    ActivityId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum SystemSettings {
    Table,
    Id,
    Key,
    Value,
    CreatedAt,
    UpdatedAt,
}
