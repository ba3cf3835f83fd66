//! # Backbone Runtime Library
//!
//! Wires the token service and the broker channel registry together. The
//! `main.rs` binary drives it; tests use it directly.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (env)
//! 2. Initialize telemetry
//! 3. Build `TokenService` and `EventChannelRegistry`
//! 4. Self-check: mint a token, validate it, round-trip a `user_login`
//!    envelope through the bus
//! 5. Wait for Ctrl-C, then `close_all`

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, ensure, Context, Result};
use shared_bus::{BrokerConnector, EventChannelRegistry, ShutdownReport};
use shared_types::{EventEnvelope, EventTopic, EventType, Role, UserEvent};
use tracing::{error, info};
use wh_01_token_service::{TokenApi, TokenService};

pub use config::BackboneConfig;

/// Consumer group used by the startup self-check.
pub const SELF_CHECK_GROUP: &str = "backbone-self-check";

/// How long the self-check waits for its own event.
pub const SELF_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

const SELF_CHECK_SUBJECT: &str = "SYS-BACKBONE";

/// The running backbone: one token service, one channel registry.
pub struct BackboneRuntime<C: BrokerConnector> {
    tokens: Arc<TokenService>,
    registry: Arc<EventChannelRegistry<C>>,
}

impl<C: BrokerConnector> BackboneRuntime<C> {
    /// Build both components. Does not contact the broker.
    pub fn new(config: BackboneConfig, connector: C) -> Result<Self> {
        info!(
            issuer = %config.tokens.issuer,
            brokers = ?config.bus.brokers,
            "Creating warehouse backbone runtime"
        );

        let registry = EventChannelRegistry::from_config(&config.bus, connector)
            .context("Failed to create channel registry")?;

        Ok(Self {
            tokens: Arc::new(TokenService::new(config.tokens)),
            registry: Arc::new(registry),
        })
    }

    pub fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    pub fn registry(&self) -> &Arc<EventChannelRegistry<C>> {
        &self.registry
    }

    /// Exercise both components end to end.
    ///
    /// Mints and validates a short-lived admin token, then publishes a
    /// `user_login` event for it and waits for the self-check subscriber
    /// to receive and commit that exact event.
    pub async fn self_check(&self) -> Result<()> {
        let token = self
            .tokens
            .issue_with_default_tier(
                SELF_CHECK_SUBJECT,
                "backbone",
                Role::Admin,
                Duration::from_secs(60),
            )
            .context("Self-check token issue failed")?;
        let claims = self
            .tokens
            .validate(&token)
            .context("Self-check token did not validate")?;

        let topic = EventTopic::User.as_str();
        let subscriber = self.registry.subscriber(topic, SELF_CHECK_GROUP)?;
        let publisher = self.registry.publisher(topic)?;

        let mut changes = serde_json::Map::new();
        changes.insert("role".to_string(), claims.role.as_str().into());
        let envelope = EventEnvelope::wrap(
            EventType::UserLogin,
            UserEvent {
                user_id: claims.user_id,
                action: "login".to_string(),
                changes,
            },
        );
        publisher.publish(&envelope).await?;

        let (received, message) =
            tokio::time::timeout(SELF_CHECK_TIMEOUT, subscriber.recv_envelope::<UserEvent>())
                .await
                .context("Self-check event never arrived")??;
        ensure!(
            received.event_id == envelope.event_id,
            "Self-check received foreign event {}",
            received.event_id
        );
        subscriber.commit(&message).await?;

        info!(
            event_id = %envelope.event_id,
            offset = message.offset,
            "Self-check passed"
        );
        Ok(())
    }

    /// Close every broker client the registry created.
    pub async fn shutdown(&self) -> ShutdownReport {
        info!("Shutting down channel registry...");
        let report = self.registry.close_all().await;
        if report.is_clean() {
            info!(closed = report.attempted, "All channels closed");
        } else {
            for failure in &report.failures {
                error!(
                    kind = failure.kind.as_str(),
                    topic = %failure.topic,
                    group = ?failure.group,
                    reason = %failure.reason,
                    "Channel failed to close"
                );
            }
        }
        report
    }

    /// Shut down and turn any close failure into an error.
    pub async fn shutdown_checked(&self) -> Result<usize> {
        match self.shutdown().await.into_result() {
            Ok(closed) => Ok(closed),
            Err(e) => bail!("Shutdown incomplete: {e}"),
        }
    }
}
