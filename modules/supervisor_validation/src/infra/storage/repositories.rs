//! SeaORM repository implementations

use crate::contract::{
    Inspection, InspectionDetail, InspectionStatus, ItemStatus, Notification,
    SupervisorValidation, ValidationItem, ValidationStatus, ValidationSummary,
};
use crate::domain::repository::{
    CompletionRecord, CompletionWrite, InspectionRepository, ItemWrite, SubmissionRecord,
    SubmissionWrite, SummaryFilter, ValidationRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Func, LikeExpr, OnConflict, SimpleExpr};
use sea_orm::{
    prelude::Expr, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use super::entity::{
    client, franchise, inspection, inspection_detail, inspection_status_history, notification,
    supervisor_validation, validation_item, vehicle,
};
use super::mapper;

fn convert<M, T>(rows: Vec<M>) -> Result<Vec<T>>
where
    T: TryFrom<M, Error = anyhow::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Roll the transaction back and report what it observed
async fn abort<T>(txn: DatabaseTransaction, outcome: T) -> Result<T> {
    txn.rollback().await?;
    Ok(outcome)
}

/// Lock a validation row until the transaction ends; `None` when it does not exist.
/// Item writes and completion take this lock so they are applied one after the other.
async fn lock_validation(
    txn: &DatabaseTransaction,
    validation_id: Uuid,
) -> Result<Option<ValidationStatus>> {
    let row = supervisor_validation::Entity::find_by_id(validation_id)
        .lock_exclusive()
        .one(txn)
        .await?;

    Ok(match row {
        Some(row) => Some(row.status.parse()?),
        None => None,
    })
}

async fn count_items<C: ConnectionTrait>(
    conn: &C,
    validation_id: Uuid,
    status: ItemStatus,
) -> Result<u64> {
    Ok(validation_item::Entity::find()
        .filter(validation_item::Column::ValidationId.eq(validation_id))
        .filter(validation_item::Column::Status.eq(status.as_str()))
        .count(conn)
        .await?)
}

/// `LIKE` pattern matching the needle anywhere, with wildcards in the needle escaped
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn lower_like<C: ColumnTrait>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

/// Insert pending items for the given details, skipping any that already exist
async fn insert_pending_items<C: ConnectionTrait>(
    conn: &C,
    validation_id: Uuid,
    detail_ids: &[Uuid],
) -> Result<u64> {
    if detail_ids.is_empty() {
        return Ok(0);
    }

    let now = Utc::now();
    let rows = detail_ids
        .iter()
        .map(|detail_id| mapper::pending_item(validation_id, *detail_id, now));

    let inserted = validation_item::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::columns([
                validation_item::Column::ValidationId,
                validation_item::Column::InspectionDetailId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    Ok(inserted)
}

// ===== Validation Repository =====

pub struct SeaOrmValidationRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmValidationRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Inspections whose vehicle or franchise matches a lowercased needle
    async fn inspections_matching(&self, needle: &str) -> Result<Vec<Uuid>> {
        let pattern = contains_pattern(needle);

        let vehicle_ids: Vec<Uuid> = vehicle::Entity::find()
            .filter(
                Condition::any()
                    .add(lower_like(vehicle::Column::Brand, &pattern))
                    .add(lower_like(vehicle::Column::ModelName, &pattern))
                    .add(lower_like(vehicle::Column::LicensePlate, &pattern)),
            )
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|v| v.id)
            .collect();
        let franchise_ids: Vec<Uuid> = franchise::Entity::find()
            .filter(lower_like(franchise::Column::Name, &pattern))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|f| f.id)
            .collect();

        if vehicle_ids.is_empty() && franchise_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut matches = Condition::any();
        if !vehicle_ids.is_empty() {
            matches = matches.add(inspection::Column::VehicleId.is_in(vehicle_ids));
        }
        if !franchise_ids.is_empty() {
            matches = matches.add(inspection::Column::FranchiseId.is_in(franchise_ids));
        }

        Ok(inspection::Entity::find()
            .filter(matches)
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|i| i.id)
            .collect())
    }

    /// Join validations with their inspection, vehicle, client and franchise rows
    async fn hydrate(
        &self,
        validations: Vec<supervisor_validation::Model>,
    ) -> Result<Vec<ValidationSummary>> {
        if validations.is_empty() {
            return Ok(Vec::new());
        }

        let inspection_ids: HashSet<Uuid> = validations.iter().map(|v| v.inspection_id).collect();
        let inspections: HashMap<Uuid, inspection::Model> = inspection::Entity::find()
            .filter(inspection::Column::Id.is_in(inspection_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|i| (i.id, i))
            .collect();

        let vehicle_ids: HashSet<Uuid> =
            inspections.values().filter_map(|i| i.vehicle_id).collect();
        let vehicles: HashMap<Uuid, vehicle::Model> = if vehicle_ids.is_empty() {
            HashMap::new()
        } else {
            vehicle::Entity::find()
                .filter(vehicle::Column::Id.is_in(vehicle_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|v| (v.id, v))
                .collect()
        };

        let client_ids: HashSet<Uuid> = vehicles.values().filter_map(|v| v.client_id).collect();
        let clients: HashMap<Uuid, String> = if client_ids.is_empty() {
            HashMap::new()
        } else {
            client::Entity::find()
                .filter(client::Column::Id.is_in(client_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };

        let franchise_ids: HashSet<Uuid> =
            inspections.values().filter_map(|i| i.franchise_id).collect();
        let franchises: HashMap<Uuid, String> = if franchise_ids.is_empty() {
            HashMap::new()
        } else {
            franchise::Entity::find()
                .filter(franchise::Column::Id.is_in(franchise_ids))
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|f| (f.id, f.name))
                .collect()
        };

        validations
            .into_iter()
            .map(|row| {
                let inspection = inspections.get(&row.inspection_id);
                let vehicle = inspection
                    .and_then(|i| i.vehicle_id)
                    .and_then(|id| vehicles.get(&id));
                let franchise_id = inspection.and_then(|i| i.franchise_id);

                Ok(ValidationSummary {
                    validation: SupervisorValidation::try_from(row)?,
                    inspector_id: inspection.and_then(|i| i.inspector_id),
                    franchise_id,
                    vehicle_brand: vehicle.map(|v| v.brand.clone()),
                    vehicle_model: vehicle.map(|v| v.model_name.clone()),
                    license_plate: vehicle.and_then(|v| v.license_plate.clone()),
                    client_name: vehicle
                        .and_then(|v| v.client_id)
                        .and_then(|id| clients.get(&id).cloned()),
                    franchise_name: franchise_id.and_then(|id| franchises.get(&id).cloned()),
                })
            })
            .collect()
    }
}

#[async_trait]
impl ValidationRepository for SeaOrmValidationRepository {
    async fn list_summaries(
        &self,
        filter: &SummaryFilter,
        limit: u64,
    ) -> Result<Vec<ValidationSummary>> {
        let mut query = supervisor_validation::Entity::find();

        if let Some(sid) = filter.supervisor_id {
            query = query.filter(supervisor_validation::Column::SupervisorId.eq(sid));
        }
        if !filter.statuses.is_empty() {
            query = query.filter(
                supervisor_validation::Column::Status
                    .is_in(filter.statuses.iter().map(|s| s.as_str())),
            );
        }
        if let Some(needle) = &filter.search {
            let inspection_ids = self.inspections_matching(needle).await?;
            if inspection_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(supervisor_validation::Column::InspectionId.is_in(inspection_ids));
        }

        let rows = query
            .order_by_desc(supervisor_validation::Column::CreatedAt)
            .limit(limit)
            .all(&*self.db)
            .await?;

        self.hydrate(rows).await
    }

    async fn find_summary(&self, validation_id: Uuid) -> Result<Option<ValidationSummary>> {
        let row = supervisor_validation::Entity::find_by_id(validation_id)
            .one(&*self.db)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn list_items(&self, validation_id: Uuid) -> Result<Vec<ValidationItem>> {
        let rows = validation_item::Entity::find()
            .filter(validation_item::Column::ValidationId.eq(validation_id))
            .order_by_asc(validation_item::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        convert(rows)
    }

    async fn find_item(&self, item_id: Uuid) -> Result<Option<ValidationItem>> {
        let row = validation_item::Entity::find_by_id(item_id)
            .one(&*self.db)
            .await?;

        row.map(ValidationItem::try_from).transpose()
    }

    async fn ensure_items(&self, validation_id: Uuid, detail_ids: &[Uuid]) -> Result<u64> {
        insert_pending_items(&*self.db, validation_id, detail_ids).await
    }

    async fn update_item(
        &self,
        item_id: Uuid,
        status: ItemStatus,
        comment: Option<String>,
    ) -> Result<ItemWrite<ValidationItem>> {
        let txn = self.db.begin().await?;

        let Some(item) = validation_item::Entity::find_by_id(item_id).one(&txn).await? else {
            return abort(txn, ItemWrite::Missing).await;
        };
        match lock_validation(&txn, item.validation_id).await? {
            None => return abort(txn, ItemWrite::Missing).await,
            Some(current) if current.is_terminal() => return abort(txn, ItemWrite::Closed).await,
            Some(_) => {}
        }

        validation_item::Entity::update_many()
            .col_expr(validation_item::Column::Status, Expr::value(status.as_str()))
            .col_expr(validation_item::Column::Comment, Expr::value(comment))
            .col_expr(validation_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(validation_item::Column::Id.eq(item_id))
            .exec(&txn)
            .await?;
        let updated = validation_item::Entity::find_by_id(item_id).one(&txn).await?;
        txn.commit().await?;

        match updated {
            Some(row) => Ok(ItemWrite::Applied(ValidationItem::try_from(row)?)),
            None => Ok(ItemWrite::Missing),
        }
    }

    async fn approve_pending(&self, validation_id: Uuid) -> Result<ItemWrite<u64>> {
        let txn = self.db.begin().await?;

        match lock_validation(&txn, validation_id).await? {
            None => return abort(txn, ItemWrite::Missing).await,
            Some(status) if status.is_terminal() => return abort(txn, ItemWrite::Closed).await,
            Some(_) => {}
        }

        let result = validation_item::Entity::update_many()
            .col_expr(
                validation_item::Column::Status,
                Expr::value(ItemStatus::Approved.as_str()),
            )
            .col_expr(
                validation_item::Column::Comment,
                Expr::value(Option::<String>::None),
            )
            .col_expr(validation_item::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(validation_item::Column::ValidationId.eq(validation_id))
            .filter(validation_item::Column::Status.eq(ItemStatus::Pending.as_str()))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        Ok(ItemWrite::Applied(result.rows_affected))
    }

    async fn complete(&self, record: &CompletionRecord) -> Result<CompletionWrite> {
        let txn = self.db.begin().await?;

        match lock_validation(&txn, record.validation_id).await? {
            None => return abort(txn, CompletionWrite::Missing).await,
            Some(status) if status.is_terminal() => {
                return abort(txn, CompletionWrite::AlreadyCompleted).await
            }
            Some(_) => {}
        }

        let pending = count_items(&txn, record.validation_id, ItemStatus::Pending).await?;
        if pending > 0 {
            return abort(txn, CompletionWrite::PendingItems(pending as usize)).await;
        }
        // The verdict was decided from a read outside this transaction
        let rejected = count_items(&txn, record.validation_id, ItemStatus::Rejected).await?;
        if rejected as usize != record.rejected_items {
            return abort(txn, CompletionWrite::DecisionsChanged).await;
        }

        // Only a non-terminal validation may be finalized; a lost race affects no rows
        let finalized = supervisor_validation::Entity::update_many()
            .col_expr(
                supervisor_validation::Column::Status,
                Expr::value(record.validation_status.as_str()),
            )
            .col_expr(
                supervisor_validation::Column::CompletedAt,
                Expr::value(Some(record.completed_at)),
            )
            .col_expr(
                supervisor_validation::Column::UpdatedAt,
                Expr::value(record.completed_at),
            )
            .filter(supervisor_validation::Column::Id.eq(record.validation_id))
            .filter(supervisor_validation::Column::Status.is_not_in([
                ValidationStatus::Approved.as_str(),
                ValidationStatus::Rejected.as_str(),
            ]))
            .exec(&txn)
            .await?;
        if finalized.rows_affected == 0 {
            return abort(txn, CompletionWrite::AlreadyCompleted).await;
        }

        let previous = inspection::Entity::find_by_id(record.inspection_id)
            .one(&txn)
            .await?
            .map(|i| i.status);

        inspection::Entity::update_many()
            .col_expr(
                inspection::Column::Status,
                Expr::value(record.inspection_status.as_str()),
            )
            .col_expr(inspection::Column::UpdatedAt, Expr::value(record.completed_at))
            .filter(inspection::Column::Id.eq(record.inspection_id))
            .exec(&txn)
            .await?;

        inspection_status_history::Entity::insert(mapper::status_change(
            record.inspection_id,
            previous.as_deref(),
            record.inspection_status.as_str(),
            record.changed_by,
            record.history_comment.clone(),
            record.completed_at,
        ))
        .exec_without_returning(&txn)
        .await?;

        notification::Entity::insert(mapper::new_notification(
            &record.notification,
            record.completed_at,
        ))
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(CompletionWrite::Committed)
    }

    async fn list_notifications(&self, target_user_id: Uuid) -> Result<Vec<Notification>> {
        let rows = notification::Entity::find()
            .filter(notification::Column::TargetUserId.eq(target_user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        convert(rows)
    }
}

// ===== Inspection Repository =====

pub struct SeaOrmInspectionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmInspectionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InspectionRepository for SeaOrmInspectionRepository {
    async fn find_inspection(&self, inspection_id: Uuid) -> Result<Option<Inspection>> {
        let row = inspection::Entity::find_by_id(inspection_id)
            .one(&*self.db)
            .await?;

        row.map(Inspection::try_from).transpose()
    }

    async fn list_details(&self, inspection_id: Uuid) -> Result<Vec<InspectionDetail>> {
        let rows = inspection_detail::Entity::find()
            .filter(inspection_detail::Column::InspectionId.eq(inspection_id))
            .order_by_asc(inspection_detail::Column::Section)
            .order_by_asc(inspection_detail::Column::Item)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionWrite> {
        let txn = self.db.begin().await?;

        let Some(current) = inspection::Entity::find_by_id(record.inspection_id)
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(SubmissionWrite::Missing);
        };
        let from: InspectionStatus = current.status.parse()?;
        if !record.allowed_from.contains(&from) {
            txn.rollback().await?;
            return Ok(SubmissionWrite::InvalidState(from));
        }

        // Guard on the status just read so a concurrent transition wins cleanly
        let moved = inspection::Entity::update_many()
            .col_expr(
                inspection::Column::Status,
                Expr::value(InspectionStatus::AwaitingValidation.as_str()),
            )
            .col_expr(
                inspection::Column::SupervisorId,
                Expr::value(Some(record.supervisor_id)),
            )
            .col_expr(inspection::Column::UpdatedAt, Expr::value(record.submitted_at))
            .filter(inspection::Column::Id.eq(record.inspection_id))
            .filter(inspection::Column::Status.eq(current.status.as_str()))
            .exec(&txn)
            .await?;
        if moved.rows_affected == 0 {
            let now = inspection::Entity::find_by_id(record.inspection_id)
                .one(&txn)
                .await?;
            txn.rollback().await?;
            return match now {
                Some(row) => Ok(SubmissionWrite::InvalidState(row.status.parse()?)),
                None => Ok(SubmissionWrite::Missing),
            };
        }

        let validation = SupervisorValidation {
            id: Uuid::new_v4(),
            inspection_id: record.inspection_id,
            supervisor_id: record.supervisor_id,
            status: ValidationStatus::Pending,
            notes: None,
            created_at: record.submitted_at,
            updated_at: record.submitted_at,
            completed_at: None,
        };
        supervisor_validation::Entity::insert(supervisor_validation::ActiveModel::from(
            &validation,
        ))
        .exec_without_returning(&txn)
        .await?;

        insert_pending_items(&txn, validation.id, &record.detail_ids).await?;

        inspection_status_history::Entity::insert(mapper::status_change(
            record.inspection_id,
            Some(current.status.as_str()),
            InspectionStatus::AwaitingValidation.as_str(),
            record.submitted_by,
            None,
            record.submitted_at,
        ))
        .exec_without_returning(&txn)
        .await?;

        notification::Entity::insert(mapper::new_notification(
            &record.notification,
            record.submitted_at,
        ))
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(SubmissionWrite::Created(validation))
    }
}
