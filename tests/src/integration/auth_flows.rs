//! # Token Flows
//!
//! Tokens are stateless: any instance sharing the secret and issuer accepts
//! what another instance minted.
//!
//! ## Flows Tested:
//!
//! 1. **Login → request**: issue on one instance, authorize on another
//! 2. **Refresh across instances**: identity survives, expiry moves forward
//! 3. **Role defaults vs endpoint tiers**: the full permission matrix
//! 4. **Shared service**: one `Arc<TokenService>` validating from many threads

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared_types::{has_permission, AccessTier, Role};
    use wh_01_token_service::{
        AuthError, ManualTimeSource, SigningSecret, TokenApi, TokenService, TokenServiceConfig,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const SECRET: &str = "integration-shared-secret";
    const LOGIN_TIME: u64 = 1_735_689_600;
    const HOUR: Duration = Duration::from_secs(3_600);

    fn instance(clock: &ManualTimeSource) -> TokenService<ManualTimeSource> {
        let config = TokenServiceConfig::new(SigningSecret::new(SECRET).unwrap());
        TokenService::with_time_source(config, clock.clone())
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_login_then_request_on_another_instance() {
        let clock = ManualTimeSource::new(LOGIN_TIME);
        let login = instance(&clock);
        let api = instance(&clock);

        let token = login
            .issue(
                "USR-2024-001",
                "operator",
                Role::WarehouseOperator,
                AccessTier::Level2,
                HOUR,
            )
            .unwrap();

        clock.advance(600);
        let claims = api.authorize(&token, AccessTier::Level2).unwrap();
        assert_eq!(claims.user_id, "USR-2024-001");

        assert!(matches!(
            api.authorize(&token, AccessTier::Level3),
            Err(AuthError::InsufficientTier { .. })
        ));

        clock.advance(3_600);
        assert!(matches!(
            api.authorize(&token, AccessTier::Level1),
            Err(AuthError::Expired { .. })
        ));
    }

    #[test]
    fn test_refresh_on_another_instance() {
        let clock = ManualTimeSource::new(LOGIN_TIME);
        let login = instance(&clock);
        let refresher = instance(&clock);

        let original = login
            .issue_with_default_tier("USR-9", "lead", Role::Manager, HOUR)
            .unwrap();
        clock.advance(3_000);
        let refreshed = refresher.refresh(&original, HOUR).unwrap();

        let before = login.validate(&original).unwrap();
        let after = login.validate(&refreshed).unwrap();
        assert_eq!(
            (&after.user_id, &after.username, after.role, after.access_level),
            (&before.user_id, &before.username, before.role, before.access_level)
        );
        assert_eq!(after.exp - before.exp, 3_000);

        // Original expires on schedule, refreshed keeps going
        clock.advance(1_000);
        assert!(login.validate(&original).is_err());
        assert!(login.validate(&refreshed).is_ok());
    }

    #[test]
    fn test_instance_with_rotated_secret_rejects_old_tokens() {
        let clock = ManualTimeSource::new(LOGIN_TIME);
        let token = instance(&clock)
            .issue_with_default_tier("USR-1", "admin", Role::Admin, HOUR)
            .unwrap();

        let rotated = TokenService::with_time_source(
            TokenServiceConfig::new(SigningSecret::new("rotated-secret").unwrap()),
            clock.clone(),
        );
        assert_eq!(rotated.validate(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_role_default_tiers_against_endpoint_tiers() {
        let expected = [
            (Role::ScannerUser, 1u8),
            (Role::WarehouseOperator, 2),
            (Role::Manager, 4),
            (Role::Admin, 5),
        ];

        for (role, rank) in expected {
            let tier = role.default_tier();
            assert_eq!(tier.rank(), rank, "{role}");
            for required in AccessTier::ALL {
                assert_eq!(
                    has_permission(tier.as_str(), required.as_str()),
                    rank >= required.rank(),
                    "{role} vs {required}"
                );
            }
        }

        // Supervisor tier exists only as an explicit grant
        assert!(has_permission("level_3", "level_3"));
        assert!(!has_permission("level_3", "level_4"));
    }

    #[test]
    fn test_shared_service_across_threads() {
        let service = Arc::new(TokenService::new(TokenServiceConfig::new(
            SigningSecret::new(SECRET).unwrap(),
        )));

        let tokens: Vec<String> = (0..8)
            .map(|i| {
                service
                    .issue_with_default_tier(&format!("USR-{i}"), "worker", Role::ScannerUser, HOUR)
                    .unwrap()
            })
            .collect();

        std::thread::scope(|scope| {
            for (i, token) in tokens.iter().enumerate() {
                let service = Arc::clone(&service);
                scope.spawn(move || {
                    let claims = service.validate(token).unwrap();
                    assert_eq!(claims.user_id, format!("USR-{i}"));
                });
            }
        });
    }
}
