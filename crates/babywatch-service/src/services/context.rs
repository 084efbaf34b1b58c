//! Service context - dependency container for services
//!
//! Holds the repositories, clock, auth helpers, live hub and the optional
//! change publisher. Built once at startup and shared by every request.

use std::sync::Arc;

use tracing::warn;

use babywatch_cache::ChangePublisher;
use babywatch_common::auth::{JwtService, PasscodeGate};
use babywatch_core::entities::PredictionFields;
use babywatch_core::traits::{
    NameRepository, PredictionRepository, SessionRepository, VoteRepository,
};
use babywatch_core::value_objects::{Clock, SystemClock};
use babywatch_core::DomainEvent;

use super::error::{ServiceError, ServiceResult};
use super::live::LiveHub;
use super::sessions::SessionRegistry;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    name_repo: Arc<dyn NameRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    prediction_repo: Arc<dyn PredictionRepository>,

    // Live state
    hub: Arc<LiveHub>,
    publisher: Option<ChangePublisher>,

    // Auth
    jwt_service: Arc<JwtService>,
    passcode_gate: PasscodeGate,
    sessions: SessionRegistry,

    clock: Arc<dyn Clock>,
    prediction_defaults: PredictionFields,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the name repository
    pub fn name_repo(&self) -> &dyn NameRepository {
        self.name_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the prediction repository
    pub fn prediction_repo(&self) -> &dyn PredictionRepository {
        self.prediction_repo.as_ref()
    }

    // === Live state ===

    /// Get the live hub
    pub fn hub(&self) -> &Arc<LiveHub> {
        &self.hub
    }

    /// Get the change publisher, if the change bus is enabled
    pub fn publisher(&self) -> Option<&ChangePublisher> {
        self.publisher.as_ref()
    }

    /// Announce a change to other instances. Failures are logged only.
    pub async fn announce(&self, event: &DomainEvent) {
        let Some(publisher) = &self.publisher else {
            return;
        };

        if let Err(e) = publisher.publish(event).await {
            warn!(
                event_type = event.event_type(),
                error = %e,
                "Failed to publish change"
            );
        }
    }

    // === Auth ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the sign-in gate
    pub fn passcode_gate(&self) -> &PasscodeGate {
        &self.passcode_gate
    }

    /// Get the session registry
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    // === Misc ===

    /// Current time in epoch seconds
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// Draft shown before a participant saves a prediction
    pub fn prediction_defaults(&self) -> &PredictionFields {
        &self.prediction_defaults
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("hub", &self.hub)
            .field("change_bus", &self.publisher.is_some())
            .field("passcode_required", &!self.passcode_gate.is_open())
            .field("clock", &self.clock)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    name_repo: Option<Arc<dyn NameRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    prediction_repo: Option<Arc<dyn PredictionRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    publisher: Option<ChangePublisher>,
    jwt_service: Option<Arc<JwtService>>,
    passcode_gate: Option<PasscodeGate>,
    clock: Option<Arc<dyn Clock>>,
    prediction_defaults: Option<PredictionFields>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_repo(mut self, repo: Arc<dyn NameRepository>) -> Self {
        self.name_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn prediction_repo(mut self, repo: Arc<dyn PredictionRepository>) -> Self {
        self.prediction_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    /// Use one store for all three collections and the sessions
    pub fn store<S>(self, store: Arc<S>) -> Self
    where
        S: NameRepository + VoteRepository + PredictionRepository + SessionRepository + 'static,
    {
        self.name_repo(store.clone())
            .vote_repo(store.clone())
            .prediction_repo(store.clone())
            .session_repo(store)
    }

    pub fn publisher(mut self, publisher: Option<ChangePublisher>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Defaults to an open gate
    pub fn passcode_gate(mut self, gate: PasscodeGate) -> Self {
        self.passcode_gate = Some(gate);
        self
    }

    /// Defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn prediction_defaults(mut self, defaults: PredictionFields) -> Self {
        self.prediction_defaults = Some(defaults);
        self
    }

    /// Build the ServiceContext
    ///
    /// The hub starts empty; call `hub().refresh_all()` before serving.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let name_repo = self
            .name_repo
            .ok_or_else(|| ServiceError::validation("name_repo is required"))?;
        let vote_repo = self
            .vote_repo
            .ok_or_else(|| ServiceError::validation("vote_repo is required"))?;
        let prediction_repo = self
            .prediction_repo
            .ok_or_else(|| ServiceError::validation("prediction_repo is required"))?;
        let session_repo = self
            .session_repo
            .ok_or_else(|| ServiceError::validation("session_repo is required"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::validation("jwt_service is required"))?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let sessions = SessionRegistry::new(
            session_repo,
            Arc::clone(&clock),
            jwt_service.refresh_token_expiry(),
        );

        let hub = Arc::new(LiveHub::new(
            Arc::clone(&name_repo),
            Arc::clone(&vote_repo),
            Arc::clone(&prediction_repo),
        ));

        Ok(ServiceContext {
            name_repo,
            vote_repo,
            prediction_repo,
            hub,
            publisher: self.publisher,
            jwt_service,
            passcode_gate: self.passcode_gate.unwrap_or_default(),
            sessions,
            clock,
            prediction_defaults: self.prediction_defaults.unwrap_or_default(),
        })
    }
}
