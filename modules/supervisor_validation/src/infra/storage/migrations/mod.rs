//! Database migrations for the supervisor validation module

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_inspections::Migration),
            Box::new(m20250301_000002_create_validations::Migration),
            Box::new(m20250301_000003_create_notifications::Migration),
        ]
    }
}

fn timestamp<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

mod m20250301_000001_create_inspections {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000001_create_inspections"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Franchises::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Franchises::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Franchises::Name).string().not_null())
                        .col(ColumnDef::new(Franchises::Location).string().not_null())
                        .col(timestamp(Franchises::CreatedAt))
                        .col(timestamp(Franchises::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Clients::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Clients::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Clients::Name).string().not_null())
                        .col(ColumnDef::new(Clients::FranchiseId).uuid())
                        .col(timestamp(Clients::CreatedAt))
                        .col(timestamp(Clients::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Vehicles::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Vehicles::Id).uuid().not_null().primary_key())
                        .col(ColumnDef::new(Vehicles::Brand).string().not_null())
                        .col(ColumnDef::new(Vehicles::Model).string().not_null())
                        .col(ColumnDef::new(Vehicles::LicensePlate).string())
                        .col(ColumnDef::new(Vehicles::ClientId).uuid())
                        .col(timestamp(Vehicles::CreatedAt))
                        .col(timestamp(Vehicles::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_vehicles_client")
                                .from(Vehicles::Table, Vehicles::ClientId)
                                .to(Clients::Table, Clients::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Inspections::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Inspections::Id).uuid().not_null().primary_key())
                        .col(
                            ColumnDef::new(Inspections::Status)
                                .string()
                                .not_null()
                                .default("draft"),
                        )
                        .col(ColumnDef::new(Inspections::InspectorId).uuid())
                        .col(ColumnDef::new(Inspections::SupervisorId).uuid())
                        .col(ColumnDef::new(Inspections::FranchiseId).uuid())
                        .col(ColumnDef::new(Inspections::VehicleId).uuid())
                        .col(ColumnDef::new(Inspections::CompletedAt).timestamp_with_time_zone())
                        .col(timestamp(Inspections::CreatedAt))
                        .col(timestamp(Inspections::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inspections_vehicle")
                                .from(Inspections::Table, Inspections::VehicleId)
                                .to(Vehicles::Table, Vehicles::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inspections_franchise")
                                .from(Inspections::Table, Inspections::FranchiseId)
                                .to(Franchises::Table, Franchises::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InspectionDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionDetails::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(InspectionDetails::InspectionId).uuid().not_null())
                        .col(ColumnDef::new(InspectionDetails::Section).string().not_null())
                        .col(ColumnDef::new(InspectionDetails::Subsection).string())
                        .col(ColumnDef::new(InspectionDetails::Item).string().not_null())
                        .col(ColumnDef::new(InspectionDetails::Status).string())
                        .col(ColumnDef::new(InspectionDetails::Comment).text())
                        .col(ColumnDef::new(InspectionDetails::PhotoUrl).string())
                        .col(timestamp(InspectionDetails::CreatedAt))
                        .col(timestamp(InspectionDetails::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inspection_details_inspection")
                                .from(InspectionDetails::Table, InspectionDetails::InspectionId)
                                .to(Inspections::Table, Inspections::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_inspection_details_inspection_id")
                        .table(InspectionDetails::Table)
                        .col(InspectionDetails::InspectionId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(InspectionStatusHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(InspectionStatusHistory::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(InspectionStatusHistory::InspectionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionStatusHistory::OldStatus).string())
                        .col(
                            ColumnDef::new(InspectionStatusHistory::NewStatus)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(InspectionStatusHistory::ChangedBy)
                                .uuid()
                                .not_null(),
                        )
                        .col(ColumnDef::new(InspectionStatusHistory::Comment).text())
                        .col(timestamp(InspectionStatusHistory::CreatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_inspection_status_history_inspection")
                                .from(
                                    InspectionStatusHistory::Table,
                                    InspectionStatusHistory::InspectionId,
                                )
                                .to(Inspections::Table, Inspections::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(InspectionStatusHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(InspectionDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Inspections::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Vehicles::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Clients::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Franchises::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Franchises {
        Table,
        Id,
        Name,
        Location,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Clients {
        Table,
        Id,
        Name,
        FranchiseId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Vehicles {
        Table,
        Id,
        Brand,
        Model,
        LicensePlate,
        ClientId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Inspections {
        Table,
        Id,
        Status,
        InspectorId,
        SupervisorId,
        FranchiseId,
        VehicleId,
        CompletedAt,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InspectionDetails {
        Table,
        Id,
        InspectionId,
        Section,
        Subsection,
        Item,
        Status,
        Comment,
        PhotoUrl,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum InspectionStatusHistory {
        Table,
        Id,
        InspectionId,
        OldStatus,
        NewStatus,
        ChangedBy,
        Comment,
        CreatedAt,
    }
}

mod m20250301_000002_create_validations {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000002_create_validations"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SupervisorValidations::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SupervisorValidations::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(SupervisorValidations::InspectionId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupervisorValidations::SupervisorId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SupervisorValidations::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(SupervisorValidations::Notes).text())
                        .col(
                            ColumnDef::new(SupervisorValidations::CompletedAt)
                                .timestamp_with_time_zone(),
                        )
                        .col(timestamp(SupervisorValidations::CreatedAt))
                        .col(timestamp(SupervisorValidations::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_supervisor_validations_inspection")
                                .from(
                                    SupervisorValidations::Table,
                                    SupervisorValidations::InspectionId,
                                )
                                .to(Inspections::Table, Inspections::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_supervisor_validations_supervisor_id")
                        .table(SupervisorValidations::Table)
                        .col(SupervisorValidations::SupervisorId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ValidationItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ValidationItems::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ValidationItems::ValidationId).uuid().not_null())
                        .col(
                            ColumnDef::new(ValidationItems::InspectionDetailId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ValidationItems::Status)
                                .string()
                                .not_null()
                                .default("pending"),
                        )
                        .col(ColumnDef::new(ValidationItems::Comment).text())
                        .col(timestamp(ValidationItems::CreatedAt))
                        .col(timestamp(ValidationItems::UpdatedAt))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_validation_items_validation")
                                .from(ValidationItems::Table, ValidationItems::ValidationId)
                                .to(SupervisorValidations::Table, SupervisorValidations::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_validation_items_inspection_detail")
                                .from(ValidationItems::Table, ValidationItems::InspectionDetailId)
                                .to(InspectionDetails::Table, InspectionDetails::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            // One decision per checklist line; backs the insert-if-absent materialization
            manager
                .create_index(
                    Index::create()
                        .name("uq_validation_items_validation_detail")
                        .table(ValidationItems::Table)
                        .col(ValidationItems::ValidationId)
                        .col(ValidationItems::InspectionDetailId)
                        .unique()
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ValidationItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SupervisorValidations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum SupervisorValidations {
        Table,
        Id,
        InspectionId,
        SupervisorId,
        Status,
        Notes,
        CompletedAt,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ValidationItems {
        Table,
        Id,
        ValidationId,
        InspectionDetailId,
        Status,
        Comment,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum Inspections {
        Table,
        Id,
    }

    #[derive(DeriveIden)]
    enum InspectionDetails {
        Table,
        Id,
    }
}

mod m20250301_000003_create_notifications {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250301_000003_create_notifications"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Notifications::Id)
                                .uuid()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Notifications::Title).string().not_null())
                        .col(ColumnDef::new(Notifications::Content).text().not_null())
                        .col(ColumnDef::new(Notifications::Type).string().not_null())
                        .col(ColumnDef::new(Notifications::TargetUserId).uuid())
                        .col(ColumnDef::new(Notifications::TargetUserRole).string())
                        .col(ColumnDef::new(Notifications::FranchiseId).uuid())
                        .col(
                            ColumnDef::new(Notifications::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(timestamp(Notifications::CreatedAt))
                        .col(timestamp(Notifications::UpdatedAt))
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_notifications_target_user_id")
                        .table(Notifications::Table)
                        .col(Notifications::TargetUserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Notifications {
        Table,
        Id,
        Title,
        Content,
        Type,
        TargetUserId,
        TargetUserRole,
        FranchiseId,
        IsRead,
        CreatedAt,
        UpdatedAt,
    }
}
