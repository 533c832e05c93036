//! Common test utilities: in-memory repositories and a seeded workflow fixture

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use supervisor_validation::config::Config;
use supervisor_validation::contract::*;
use supervisor_validation::domain::repository::{
    CompletionRecord, CompletionWrite, InspectionRepository, ItemWrite, SubmissionRecord,
    SubmissionWrite, SummaryFilter, ValidationRepository,
};
use supervisor_validation::domain::{EventPublisher, Service, ValidationEvent};
use uuid::Uuid;

/// Display context joined onto a validation
#[derive(Debug, Clone, Default)]
pub struct VehicleContext {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub client_name: Option<String>,
    pub franchise_name: Option<String>,
}

/// One recorded inspection status change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub inspection_id: Uuid,
    pub from: InspectionStatus,
    pub to: InspectionStatus,
    pub changed_by: Uuid,
    pub comment: Option<String>,
}

#[derive(Default)]
struct State {
    inspections: HashMap<Uuid, Inspection>,
    contexts: HashMap<Uuid, VehicleContext>,
    details: Vec<InspectionDetail>,
    validations: Vec<SupervisorValidation>,
    items: Vec<ValidationItem>,
    notifications: Vec<Notification>,
    history: Vec<StatusChange>,
}

/// In-memory store implementing both repositories
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<State>>,
    failing: Arc<RwLock<bool>>,
    interleaved: Arc<Mutex<Vec<(Uuid, ItemStatus)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like a lost database connection
    pub fn fail_all(&self) {
        *self.failing.write() = true;
    }

    /// Queue a decision that lands right before the next completion takes its lock,
    /// like another session deciding the item concurrently
    pub fn decide_before_completion(&self, item_id: Uuid, status: ItemStatus) {
        self.interleaved.lock().push((item_id, status));
    }

    fn check(&self) -> anyhow::Result<()> {
        if *self.failing.read() {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }

    pub fn insert_inspection(&self, inspection: Inspection, context: VehicleContext) {
        let mut state = self.state.write();
        state.contexts.insert(inspection.id, context);
        state.inspections.insert(inspection.id, inspection);
    }

    pub fn insert_detail(&self, detail: InspectionDetail) {
        self.state.write().details.push(detail);
    }

    pub fn insert_validation(&self, validation: SupervisorValidation) {
        self.state.write().validations.push(validation);
    }

    pub fn inspection(&self, id: Uuid) -> Option<Inspection> {
        self.state.read().inspections.get(&id).cloned()
    }

    pub fn validation(&self, id: Uuid) -> Option<SupervisorValidation> {
        self.state.read().validations.iter().find(|v| v.id == id).cloned()
    }

    pub fn validations_for(&self, inspection_id: Uuid) -> Vec<SupervisorValidation> {
        self.state
            .read()
            .validations
            .iter()
            .filter(|v| v.inspection_id == inspection_id)
            .cloned()
            .collect()
    }

    pub fn items_of(&self, validation_id: Uuid) -> Vec<ValidationItem> {
        self.state
            .read()
            .items
            .iter()
            .filter(|i| i.validation_id == validation_id)
            .cloned()
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state.read().notifications.clone()
    }

    pub fn history(&self) -> Vec<StatusChange> {
        self.state.read().history.clone()
    }

    fn summary(state: &State, validation: &SupervisorValidation) -> ValidationSummary {
        let inspection = state.inspections.get(&validation.inspection_id);
        let context = state
            .contexts
            .get(&validation.inspection_id)
            .cloned()
            .unwrap_or_default();
        ValidationSummary {
            validation: validation.clone(),
            inspector_id: inspection.and_then(|i| i.inspector_id),
            franchise_id: inspection.and_then(|i| i.franchise_id),
            vehicle_brand: context.brand,
            vehicle_model: context.model,
            license_plate: context.license_plate,
            client_name: context.client_name,
            franchise_name: context.franchise_name,
        }
    }

    fn notify(state: &mut State, notification: &NewNotification) {
        state.notifications.push(Notification {
            id: Uuid::new_v4(),
            title: notification.title.clone(),
            content: notification.content.clone(),
            r#type: notification.r#type,
            target_user_id: notification.target_user_id,
            franchise_id: notification.franchise_id,
            is_read: false,
            created_at: Utc::now(),
        });
    }

    fn add_missing_items(state: &mut State, validation_id: Uuid, detail_ids: &[Uuid]) -> u64 {
        let mut created = 0;
        for detail_id in detail_ids {
            let exists = state
                .items
                .iter()
                .any(|i| i.validation_id == validation_id && i.inspection_detail_id == *detail_id);
            if !exists {
                let now = Utc::now();
                state.items.push(ValidationItem {
                    id: Uuid::new_v4(),
                    validation_id,
                    inspection_detail_id: *detail_id,
                    status: ItemStatus::Pending,
                    comment: None,
                    created_at: now,
                    updated_at: now,
                });
                created += 1;
            }
        }
        created
    }
}

#[async_trait]
impl InspectionRepository for MemoryStore {
    async fn find_inspection(&self, inspection_id: Uuid) -> anyhow::Result<Option<Inspection>> {
        self.check()?;
        Ok(self.inspection(inspection_id))
    }

    async fn list_details(&self, inspection_id: Uuid) -> anyhow::Result<Vec<InspectionDetail>> {
        self.check()?;
        let mut details: Vec<InspectionDetail> = self
            .state
            .read()
            .details
            .iter()
            .filter(|d| d.inspection_id == inspection_id)
            .cloned()
            .collect();
        details.sort_by(|a, b| (&a.section, &a.item).cmp(&(&b.section, &b.item)));
        Ok(details)
    }

    async fn submit(&self, record: &SubmissionRecord) -> anyhow::Result<SubmissionWrite> {
        self.check()?;
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(inspection) = state.inspections.get_mut(&record.inspection_id) else {
            return Ok(SubmissionWrite::Missing);
        };
        let from = inspection.status;
        if !record.allowed_from.contains(&from) {
            return Ok(SubmissionWrite::InvalidState(from));
        }
        inspection.status = InspectionStatus::AwaitingValidation;
        inspection.supervisor_id = Some(record.supervisor_id);
        inspection.updated_at = record.submitted_at;

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
        state.validations.push(validation.clone());
        Self::add_missing_items(state, validation.id, &record.detail_ids);
        state.history.push(StatusChange {
            inspection_id: record.inspection_id,
            from,
            to: InspectionStatus::AwaitingValidation,
            changed_by: record.submitted_by,
            comment: None,
        });
        Self::notify(state, &record.notification);

        Ok(SubmissionWrite::Created(validation))
    }
}

#[async_trait]
impl ValidationRepository for MemoryStore {
    async fn list_summaries(
        &self,
        filter: &SummaryFilter,
        limit: u64,
    ) -> anyhow::Result<Vec<ValidationSummary>> {
        self.check()?;
        let state = self.state.read();
        let mut rows: Vec<ValidationSummary> = state
            .validations
            .iter()
            .filter(|v| filter.supervisor_id.map_or(true, |sid| v.supervisor_id == sid))
            .filter(|v| filter.statuses.is_empty() || filter.statuses.contains(&v.status))
            .map(|v| Self::summary(&state, v))
            .filter(|s| {
                filter
                    .search
                    .as_deref()
                    .map_or(true, |term| s.matches_search(term))
            })
            .collect();
        rows.sort_by(|a, b| b.validation.created_at.cmp(&a.validation.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn find_summary(&self, validation_id: Uuid) -> anyhow::Result<Option<ValidationSummary>> {
        self.check()?;
        let state = self.state.read();
        Ok(state
            .validations
            .iter()
            .find(|v| v.id == validation_id)
            .map(|v| Self::summary(&state, v)))
    }

    async fn list_items(&self, validation_id: Uuid) -> anyhow::Result<Vec<ValidationItem>> {
        self.check()?;
        Ok(self.items_of(validation_id))
    }

    async fn find_item(&self, item_id: Uuid) -> anyhow::Result<Option<ValidationItem>> {
        self.check()?;
        Ok(self.state.read().items.iter().find(|i| i.id == item_id).cloned())
    }

    async fn ensure_items(&self, validation_id: Uuid, detail_ids: &[Uuid]) -> anyhow::Result<u64> {
        self.check()?;
        let mut state = self.state.write();
        Ok(Self::add_missing_items(&mut state, validation_id, detail_ids))
    }

    async fn update_item(
        &self,
        item_id: Uuid,
        status: ItemStatus,
        comment: Option<String>,
    ) -> anyhow::Result<ItemWrite<ValidationItem>> {
        self.check()?;
        let mut guard = self.state.write();
        let state = &mut *guard;

        let Some(item) = state.items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(ItemWrite::Missing);
        };
        match state.validations.iter().find(|v| v.id == item.validation_id) {
            None => return Ok(ItemWrite::Missing),
            Some(v) if v.status.is_terminal() => return Ok(ItemWrite::Closed),
            Some(_) => {}
        }

        item.status = status;
        item.comment = comment;
        item.updated_at = Utc::now();
        Ok(ItemWrite::Applied(item.clone()))
    }

    async fn approve_pending(&self, validation_id: Uuid) -> anyhow::Result<ItemWrite<u64>> {
        self.check()?;
        let mut guard = self.state.write();
        let state = &mut *guard;

        match state.validations.iter().find(|v| v.id == validation_id) {
            None => return Ok(ItemWrite::Missing),
            Some(v) if v.status.is_terminal() => return Ok(ItemWrite::Closed),
            Some(_) => {}
        }

        let mut changed = 0;
        for item in state
            .items
            .iter_mut()
            .filter(|i| i.validation_id == validation_id && i.status == ItemStatus::Pending)
        {
            item.status = ItemStatus::Approved;
            item.comment = None;
            changed += 1;
        }
        Ok(ItemWrite::Applied(changed))
    }

    async fn complete(&self, record: &CompletionRecord) -> anyhow::Result<CompletionWrite> {
        self.check()?;
        let mut guard = self.state.write();
        let state = &mut *guard;

        if let Some((item_id, status)) = self.interleaved.lock().pop() {
            if let Some(item) = state.items.iter_mut().find(|i| i.id == item_id) {
                item.status = status;
            }
        }

        match state.validations.iter().find(|v| v.id == record.validation_id) {
            None => return Ok(CompletionWrite::Missing),
            Some(v) if v.status.is_terminal() => return Ok(CompletionWrite::AlreadyCompleted),
            Some(_) => {}
        }

        let pending = state
            .items
            .iter()
            .filter(|i| i.validation_id == record.validation_id && i.status == ItemStatus::Pending)
            .count();
        if pending > 0 {
            return Ok(CompletionWrite::PendingItems(pending));
        }
        let rejected = state
            .items
            .iter()
            .filter(|i| i.validation_id == record.validation_id && i.status == ItemStatus::Rejected)
            .count();
        if rejected != record.rejected_items {
            return Ok(CompletionWrite::DecisionsChanged);
        }

        match state
            .validations
            .iter_mut()
            .find(|v| v.id == record.validation_id && !v.status.is_terminal())
        {
            Some(validation) => {
                validation.status = record.validation_status;
                validation.completed_at = Some(record.completed_at);
                validation.updated_at = record.completed_at;
            }
            None => return Ok(CompletionWrite::AlreadyCompleted),
        }

        if let Some(inspection) = state.inspections.get_mut(&record.inspection_id) {
            let from = inspection.status;
            inspection.status = record.inspection_status;
            state.history.push(StatusChange {
                inspection_id: record.inspection_id,
                from,
                to: record.inspection_status,
                changed_by: record.changed_by,
                comment: record.history_comment.clone(),
            });
        }
        Self::notify(state, &record.notification);

        Ok(CompletionWrite::Committed)
    }

    async fn list_notifications(&self, target_user_id: Uuid) -> anyhow::Result<Vec<Notification>> {
        self.check()?;
        let mut rows: Vec<Notification> = self
            .state
            .read()
            .notifications
            .iter()
            .filter(|n| n.target_user_id == Some(target_user_id))
            .cloned()
            .collect();
        rows.reverse();
        Ok(rows)
    }
}

/// Publisher that keeps every event for later assertions
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<ValidationEvent>>>,
}

impl RecordingPublisher {
    pub fn events(&self) -> Vec<ValidationEvent> {
        self.events.lock().clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: ValidationEvent) -> anyhow::Result<()> {
        self.events.lock().push(event);
        Ok(())
    }
}

/// Seeded actors plus a service over the in-memory store
pub struct Fixture {
    pub store: MemoryStore,
    pub events: RecordingPublisher,
    pub service: Arc<Service>,
    pub franchise_id: Uuid,
    pub admin: CurrentUser,
    pub supervisor: CurrentUser,
    pub other_supervisor: CurrentUser,
    pub inspector: CurrentUser,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let store = MemoryStore::new();
        let events = RecordingPublisher::default();
        let service = Arc::new(Service::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(events.clone()),
            config,
        ));

        Self {
            store,
            events,
            service,
            franchise_id: Uuid::new_v4(),
            admin: CurrentUser::new(Uuid::new_v4(), Role::Admin),
            supervisor: CurrentUser::new(Uuid::new_v4(), Role::Supervisor),
            other_supervisor: CurrentUser::new(Uuid::new_v4(), Role::Supervisor),
            inspector: CurrentUser::new(Uuid::new_v4(), Role::Inspector),
        }
    }

    /// Inspection by the fixture inspector with one checklist line per `(section, item)`
    pub fn inspection(&self, status: InspectionStatus, lines: &[(&str, &str)]) -> Uuid {
        self.inspection_with(status, lines, VehicleContext {
            brand: Some("Renault".to_string()),
            model: Some("Clio".to_string()),
            license_plate: Some("AB-123-CD".to_string()),
            client_name: Some("Garage Dupont".to_string()),
            franchise_name: Some("Paris Nord".to_string()),
        })
    }

    pub fn inspection_with(
        &self,
        status: InspectionStatus,
        lines: &[(&str, &str)],
        context: VehicleContext,
    ) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.store.insert_inspection(
            Inspection {
                id,
                status,
                inspector_id: Some(self.inspector.id),
                supervisor_id: None,
                franchise_id: Some(self.franchise_id),
                vehicle_id: Some(Uuid::new_v4()),
                created_at: now,
                updated_at: now,
            },
            context,
        );
        for (section, item) in lines {
            self.store.insert_detail(InspectionDetail {
                id: Uuid::new_v4(),
                inspection_id: id,
                section: section.to_string(),
                item: item.to_string(),
                status: Some("ok".to_string()),
                comment: None,
                photo_url: None,
            });
        }
        id
    }

    /// Pending validation with no items yet, as left by a legacy submission
    pub fn validation(&self, inspection_id: Uuid, supervisor_id: Uuid) -> Uuid {
        self.validation_with_status(inspection_id, supervisor_id, ValidationStatus::Pending)
    }

    pub fn validation_with_status(
        &self,
        inspection_id: Uuid,
        supervisor_id: Uuid,
        status: ValidationStatus,
    ) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.store.insert_validation(SupervisorValidation {
            id,
            inspection_id,
            supervisor_id,
            status,
            notes: None,
            created_at: now,
            updated_at: now,
            completed_at: status.is_terminal().then_some(now),
        });
        id
    }

    /// Inspection awaiting validation by the fixture supervisor
    pub fn assigned(&self, lines: &[(&str, &str)]) -> (Uuid, Uuid) {
        let inspection_id = self.inspection(InspectionStatus::AwaitingValidation, lines);
        let validation_id = self.validation(inspection_id, self.supervisor.id);
        (inspection_id, validation_id)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard three-line checklist
pub const CHECKLIST: &[(&str, &str)] = &[
    ("Carrosserie", "Pare-brise"),
    ("Carrosserie", "Rétroviseurs"),
    ("Mécanique", "Freins"),
];
