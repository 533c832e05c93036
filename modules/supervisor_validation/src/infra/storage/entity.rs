//! SeaORM entities for database tables
//!
//! Status columns hold the snake_case wire names; mapper.rs parses them.

/// Franchises table entity
pub mod franchise {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "franchises")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub location: String,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Clients table entity
pub mod client {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "clients")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
        pub franchise_id: Option<Uuid>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Vehicles table entity
pub mod vehicle {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "vehicles")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub brand: String,
        #[sea_orm(column_name = "model")]
        pub model_name: String,
        pub license_plate: Option<String>,
        pub client_id: Option<Uuid>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::client::Entity",
            from = "Column::ClientId",
            to = "super::client::Column::Id"
        )]
        Client,
    }

    impl Related<super::client::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Client.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Inspections table entity
pub mod inspection {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "inspections")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub status: String,
        pub inspector_id: Option<Uuid>,
        pub supervisor_id: Option<Uuid>,
        pub franchise_id: Option<Uuid>,
        pub vehicle_id: Option<Uuid>,
        pub completed_at: Option<DateTimeUtc>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::vehicle::Entity",
            from = "Column::VehicleId",
            to = "super::vehicle::Column::Id"
        )]
        Vehicle,
        #[sea_orm(
            belongs_to = "super::franchise::Entity",
            from = "Column::FranchiseId",
            to = "super::franchise::Column::Id"
        )]
        Franchise,
        #[sea_orm(has_many = "super::inspection_detail::Entity")]
        Details,
    }

    impl Related<super::vehicle::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Vehicle.def()
        }
    }

    impl Related<super::franchise::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Franchise.def()
        }
    }

    impl Related<super::inspection_detail::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Details.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Checklist lines of an inspection
pub mod inspection_detail {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "inspection_details")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub inspection_id: Uuid,
        pub section: String,
        pub subsection: Option<String>,
        pub item: String,
        pub status: Option<String>,
        pub comment: Option<String>,
        pub photo_url: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::inspection::Entity",
            from = "Column::InspectionId",
            to = "super::inspection::Column::Id"
        )]
        Inspection,
    }

    impl Related<super::inspection::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Inspection.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Supervisor review passes
pub mod supervisor_validation {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "supervisor_validations")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub inspection_id: Uuid,
        pub supervisor_id: Uuid,
        pub status: String,
        pub notes: Option<String>,
        pub completed_at: Option<DateTimeUtc>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::inspection::Entity",
            from = "Column::InspectionId",
            to = "super::inspection::Column::Id"
        )]
        Inspection,
        #[sea_orm(has_many = "super::validation_item::Entity")]
        Items,
    }

    impl Related<super::inspection::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Inspection.def()
        }
    }

    impl Related<super::validation_item::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Items.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Per-line supervisor decisions; unique on (validation_id, inspection_detail_id)
pub mod validation_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "validation_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub validation_id: Uuid,
        pub inspection_detail_id: Uuid,
        pub status: String,
        pub comment: Option<String>,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::supervisor_validation::Entity",
            from = "Column::ValidationId",
            to = "super::supervisor_validation::Column::Id"
        )]
        Validation,
        #[sea_orm(
            belongs_to = "super::inspection_detail::Entity",
            from = "Column::InspectionDetailId",
            to = "super::inspection_detail::Column::Id"
        )]
        InspectionDetail,
    }

    impl Related<super::supervisor_validation::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Validation.def()
        }
    }

    impl Related<super::inspection_detail::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::InspectionDetail.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Dashboard notifications
pub mod notification {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "notifications")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub title: String,
        pub content: String,
        pub r#type: String,
        pub target_user_id: Option<Uuid>,
        pub target_user_role: Option<String>,
        pub franchise_id: Option<Uuid>,
        pub is_read: bool,
        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Audit trail of inspection status changes
pub mod inspection_status_history {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "inspection_status_history")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub inspection_id: Uuid,
        pub old_status: Option<String>,
        pub new_status: String,
        pub changed_by: Uuid,
        pub comment: Option<String>,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::inspection::Entity",
            from = "Column::InspectionId",
            to = "super::inspection::Column::Id"
        )]
        Inspection,
    }

    impl Related<super::inspection::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Inspection.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
