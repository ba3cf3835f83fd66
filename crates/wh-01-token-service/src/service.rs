//! # Token Service
//!
//! Application service layer that implements the `TokenApi` trait.
//!
//! Validation order: header algorithm, signature, claim structure, issuer,
//! expiry, not-before. The first failing check decides the error.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use shared_types::{AccessTier, Role};
use tracing::{debug, warn};
use wh_telemetry::{
    metric_inc, time_histogram, TOKENS_ISSUED, TOKEN_VALIDATION_DURATION, TOKEN_VALIDATION_FAILURES,
};

use crate::config::TokenServiceConfig;
use crate::domain::claims::TokenClaims;
use crate::domain::errors::AuthError;
use crate::domain::header::require_expected_algorithm;
use crate::ports::inbound::TokenApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};

/// Stateless token issuer and verifier.
///
/// Immutable after construction; share it behind an `Arc`.
pub struct TokenService<T: TimeSource = SystemTimeSource> {
    config: TokenServiceConfig,
    validation: Validation,
    time_source: T,
}

impl TokenService<SystemTimeSource> {
    /// Create a service on the system clock.
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_time_source(config, SystemTimeSource)
    }
}

impl<T: TimeSource> TokenService<T> {
    /// Create a service with a custom time source.
    pub fn with_time_source(config: TokenServiceConfig, time_source: T) -> Self {
        // Window and issuer are checked against `time_source`, not the library clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf", "iss"]);

        Self {
            config,
            validation,
            time_source,
        }
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }

    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.config.default_ttl
    }

    fn now(&self) -> i64 {
        i64::try_from(self.time_source.now()).unwrap_or(i64::MAX)
    }

    fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let key = EncodingKey::from_secret(self.config.secret.expose());
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        require_expected_algorithm(token)?;

        let key = DecodingKey::from_secret(self.config.secret.expose());
        let claims = jsonwebtoken::decode::<TokenClaims>(token, &key, &self.validation)?.claims;

        if claims.iss != self.config.issuer {
            return Err(AuthError::InvalidIssuer {
                expected: self.config.issuer.clone(),
                actual: claims.iss,
            });
        }

        let now = self.now();
        let leeway = i64::try_from(self.config.leeway.as_secs()).unwrap_or(i64::MAX);
        if now > claims.exp.saturating_add(leeway) {
            return Err(AuthError::Expired {
                exp: claims.exp,
                now,
            });
        }
        if now < claims.nbf.saturating_sub(leeway) {
            return Err(AuthError::NotYetValid {
                nbf: claims.nbf,
                now,
            });
        }

        Ok(claims)
    }
}

impl<T: TimeSource> TokenApi for TokenService<T> {
    fn issue(
        &self,
        subject_id: &str,
        display_name: &str,
        role: Role,
        tier: AccessTier,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = self.now();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            user_id: subject_id.to_string(),
            username: display_name.to_string(),
            role,
            access_level: tier,
            iss: self.config.issuer.clone(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(ttl_secs),
        };

        let token = self.sign(&claims)?;
        metric_inc!(TOKENS_ISSUED);
        debug!(
            user_id = %subject_id,
            role = %role,
            tier = %tier,
            exp = claims.exp,
            "Token issued"
        );
        Ok(token)
    }

    fn refresh(&self, token: &str, new_ttl: Duration) -> Result<String, AuthError> {
        let claims = self.validate(token)?;
        self.issue(
            &claims.user_id,
            &claims.username,
            claims.role,
            claims.access_level,
            new_ttl,
        )
    }

    fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let _timer = time_histogram!(TOKEN_VALIDATION_DURATION);

        self.verify(token).inspect_err(|err| {
            metric_inc!(TOKEN_VALIDATION_FAILURES, &[err.reason()]);
            warn!(reason = err.reason(), error = %err, "Token rejected");
        })
    }
}
