//! Module assembly: storage, domain service, native client and REST router

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::SupervisorValidationApi;
use crate::domain::{EventPublisher, Service};
use crate::infra::storage::{Migrator, SeaOrmInspectionRepository, SeaOrmValidationRepository};
use anyhow::Result;
use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Supervisor validation module wired against a database
pub struct SupervisorValidationModule {
    service: Arc<Service>,
}

impl SupervisorValidationModule {
    /// Apply pending migrations and build the service
    pub async fn init(
        db: Arc<DatabaseConnection>,
        config: Config,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self> {
        Migrator::up(db.as_ref(), None).await?;

        let validations = Arc::new(SeaOrmValidationRepository::new(db.clone()));
        let inspections = Arc::new(SeaOrmInspectionRepository::new(db));

        tracing::info!(
            list_limit = config.list_limit,
            materialize_on_submit = config.materialize_on_submit,
            "supervisor validation module initialized"
        );

        let service = Arc::new(Service::new(
            validations,
            inspections,
            event_publisher,
            config,
        ));
        Ok(Self { service })
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for callers that skip the HTTP layer
    pub fn client(&self) -> Arc<dyn SupervisorValidationApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// Register the REST endpoints on an existing router
    pub fn register_routes(&self, router: Router) -> Router {
        crate::api::rest::register_routes(router, self.service.clone())
    }
}
