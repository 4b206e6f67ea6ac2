//! Dashboard Service
//!
//! Composes a query source, the mutation layer, the query cache and the
//! toast queue. Reads are cache-first; every mutation settles exactly once:
//! its cache directives are applied (on success only) and its single
//! notification is queued.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use license_core::fixtures;
use license_core::{
    CachedValue, LicenseAction, LicenseId, LicenseInfo, LicenseItem, Notification,
    NotificationQueue, PackageOffer, ProjectOption, PurchaseOrder, QueryCache, QueryKey,
    RowAction,
};

use crate::config::{ClientConfig, SourceKind};
use crate::error::Result;
use crate::mutation::{
    CreateLicense, LicenseMutations, MakePayment, MutationOutcome, RenewLicense,
};
use crate::source::{LicenseSource, MockLicenseSource, RemoteLicenseSource};
use crate::transport::{HttpTransport, ReqwestTransport};

pub struct Dashboard {
    source: Arc<dyn LicenseSource>,
    mutations: LicenseMutations,
    cache: QueryCache,
    notifications: NotificationQueue,
}

impl Dashboard {
    pub fn new(source: Arc<dyn LicenseSource>, mutations: LicenseMutations) -> Self {
        Self {
            source,
            mutations,
            cache: QueryCache::new(),
            notifications: NotificationQueue::new(),
        }
    }

    /// Build from configuration. Mutations always go to the API; the source
    /// decides only where reads come from.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(config)?);

        let source: Arc<dyn LicenseSource> = match config.source {
            SourceKind::Mock => Arc::new(MockLicenseSource::with_latency(config.mock_latency)),
            SourceKind::Remote => Arc::new(RemoteLicenseSource::new(transport.clone())),
        };

        tracing::info!(
            source = source.name(),
            api_url = %config.api_url,
            "License dashboard configured"
        );

        Ok(Self::new(
            source,
            LicenseMutations::with_retry_delay(transport, config.retry_base_delay),
        ))
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    /// Take the toasts queued since the last call
    pub fn drain_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn licenses(&self) -> Result<Vec<LicenseItem>> {
        self.licenses_at(Utc::now()).await
    }

    pub async fn licenses_at(&self, now: DateTime<Utc>) -> Result<Vec<LicenseItem>> {
        if let Some(items) = self.cache.licenses(now) {
            return Ok(items);
        }
        let generation = self.cache.generation(&QueryKey::Licenses);
        let items = self.source.list_licenses().await?;
        self.cache.put_if_current(
            QueryKey::Licenses,
            CachedValue::Licenses(items.clone()),
            now,
            generation,
        );
        Ok(items)
    }

    pub async fn project_options(&self) -> Result<Vec<ProjectOption>> {
        self.project_options_at(Utc::now()).await
    }

    pub async fn project_options_at(&self, now: DateTime<Utc>) -> Result<Vec<ProjectOption>> {
        if let Some(options) = self.cache.project_options(now) {
            return Ok(options);
        }
        let generation = self.cache.generation(&QueryKey::ProjectOptions);
        let options = self.source.project_options().await?;
        tracing::debug!(count = options.len(), "Loaded project options");
        self.cache.put_if_current(
            QueryKey::ProjectOptions,
            CachedValue::ProjectOptions(options.clone()),
            now,
            generation,
        );
        Ok(options)
    }

    pub async fn package_offers(&self) -> Result<Vec<PackageOffer>> {
        self.source.package_offers().await
    }

    /// Detail for the info modal that always yields a record. A failed
    /// lookup queues one error toast and shows the fallback record.
    pub async fn license_info_or_fallback(&self, id: Option<&LicenseId>) -> LicenseInfo {
        match self.license_info(id).await {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!(license_id = ?id, error = %err, "License detail unavailable");
                self.notifications
                    .push(Notification::error(err.user_message("Failed to load license")));
                fixtures::fallback_license_info()
            }
        }
    }

    /// Detail for the info modal. `None` resolves to the fallback record
    /// and is never cached.
    pub async fn license_info(&self, id: Option<&LicenseId>) -> Result<LicenseInfo> {
        self.license_info_at(id, Utc::now()).await
    }

    pub async fn license_info_at(
        &self,
        id: Option<&LicenseId>,
        now: DateTime<Utc>,
    ) -> Result<LicenseInfo> {
        let Some(id) = id else {
            return self.source.license_info(None).await;
        };

        if let Some(info) = self.cache.license_detail(id, now) {
            return Ok(info);
        }
        let key = QueryKey::LicenseDetail(id.clone());
        let generation = self.cache.generation(&key);
        let info = self.source.license_info(Some(id)).await?;
        self.cache
            .put_if_current(key, CachedValue::LicenseDetail(info.clone()), now, generation);
        Ok(info)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Execute a confirmed row action
    pub async fn run_action(&self, action: &RowAction) -> MutationOutcome {
        match action.action {
            LicenseAction::Renew => {
                self.renew(RenewLicense::new(action.license_id.clone()))
                    .await
            }
            LicenseAction::MakePayment => {
                self.make_payment(MakePayment::new(
                    action.license_id.clone(),
                    action.order_no.clone(),
                ))
                .await
            }
        }
    }

    pub async fn renew(&self, request: RenewLicense) -> MutationOutcome {
        let outcome = self.mutations.renew_license(request).await;
        self.settle(outcome)
    }

    pub async fn make_payment(&self, request: MakePayment) -> MutationOutcome {
        let outcome = self.mutations.make_payment(request).await;
        self.settle(outcome)
    }

    /// Submit the order produced by the buy flow
    pub async fn create_license(&self, order: PurchaseOrder) -> MutationOutcome {
        let outcome = self
            .mutations
            .create_license(CreateLicense::from(order))
            .await;
        self.settle(outcome)
    }

    pub async fn delete_license(&self, license_id: &LicenseId) -> MutationOutcome {
        let outcome = self.mutations.delete_license(license_id).await;
        self.settle(outcome)
    }

    fn settle(&self, outcome: MutationOutcome) -> MutationOutcome {
        if outcome.is_success() {
            self.cache.apply(&outcome.directives);
        }
        self.notifications.push(outcome.notification.clone());
        outcome
    }
}
