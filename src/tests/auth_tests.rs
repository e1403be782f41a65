#[cfg(test)]
mod tests {
    use sqlx::migrate::MigrateDatabase;
    use sqlx::sqlite::SqlitePoolOptions;
    use tempfile::NamedTempFile;

    use crate::auth::{CredentialStore, SessionTokenService, TokenError};
    use crate::error::AppError;
    use crate::types::{Account, Role};

    async fn setup_store() -> (CredentialStore, NamedTempFile) {
        let temp_db = NamedTempFile::new().unwrap();
        let db_url = format!("sqlite:{}", temp_db.path().display());

        sqlx::Sqlite::create_database(&db_url).await.unwrap();

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await
            .unwrap();

        crate::db::init_db(&pool).await.unwrap();

        (CredentialStore::new(pool), temp_db)
    }

    fn sample_account() -> Account {
        Account {
            id: 7,
            email: "rev@praxis.de".to_string(),
            password_hash: String::new(),
            role: Role::Reviewer,
            created_at: "2025-07-01T10:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_verify_account() {
        let (store, _temp) = setup_store().await;

        let account = store.create("anna@praxis.de", "secret123", Role::Uploader).await.unwrap();
        assert_eq!(account.email, "anna@praxis.de");
        assert_eq!(account.role, Role::Uploader);
        assert!(!account.created_at.is_empty());
        // bcrypt digest, never the plain password
        assert!(account.password_hash.starts_with("$2"));

        let verified = store.verify("anna@praxis.de", "secret123").await.unwrap();
        assert_eq!(verified.id, account.id);
    }

    #[tokio::test]
    async fn test_verify_rejects_bad_credentials_identically() {
        let (store, _temp) = setup_store().await;
        store.create("anna@praxis.de", "secret123", Role::Uploader).await.unwrap();

        let wrong_password = store.verify("anna@praxis.de", "nope").await.unwrap_err();
        let unknown_email = store.verify("ghost@praxis.de", "secret123").await.unwrap_err();

        for err in [wrong_password, unknown_email] {
            match err {
                AppError::Unauthorized(msg) => assert_eq!(msg, "Invalid email or password"),
                other => panic!("expected Unauthorized, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let (store, _temp) = setup_store().await;
        store.create("anna@praxis.de", "secret123", Role::Uploader).await.unwrap();

        let err = store.create("anna@praxis.de", "other456", Role::Reviewer).await.unwrap_err();
        match err {
            AppError::Conflict(msg) => assert_eq!(msg, "Account with this email already exists"),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hashes_are_salted_per_account() {
        let (store, _temp) = setup_store().await;

        let a = store.create("a@praxis.de", "secret123", Role::Uploader).await.unwrap();
        let b = store.create("b@praxis.de", "secret123", Role::Uploader).await.unwrap();

        // Same password, distinct salts, distinct digests.
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[tokio::test]
    async fn test_find_by_id_and_email() {
        let (store, _temp) = setup_store().await;
        let created = store.create("anna@praxis.de", "secret123", Role::Reviewer).await.unwrap();

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "anna@praxis.de");

        let by_email = store.find_by_email("anna@praxis.de").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        assert!(store.find_by_id(9999).await.unwrap().is_none());
        assert!(store.find_by_email("ghost@praxis.de").await.unwrap().is_none());
    }

    #[test]
    fn test_token_roundtrip_carries_identity_and_lifetime() {
        let service = SessionTokenService::new("test-secret", 24);

        let token = service.issue(&sample_account()).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "rev@praxis.de");
        assert_eq!(claims.role, Role::Reviewer);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_expired_token_is_rejected_as_expired() {
        // A negative lifetime puts the expiry in the past without sleeping.
        let service = SessionTokenService::new("test-secret", -1);

        let token = service.issue(&sample_account()).unwrap();
        assert_eq!(service.verify(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_foreign_or_garbage_tokens_are_malformed() {
        let service = SessionTokenService::new("test-secret", 24);
        let other = SessionTokenService::new("other-secret", 24);

        // Signed under a different secret.
        let foreign = other.issue(&sample_account()).unwrap();
        assert_eq!(service.verify(&foreign).unwrap_err(), TokenError::Malformed);

        assert_eq!(service.verify("not-a-token").unwrap_err(), TokenError::Malformed);
        assert_eq!(service.verify("").unwrap_err(), TokenError::Malformed);
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let service = SessionTokenService::new("test-secret", 24);
        let token = service.issue(&sample_account()).unwrap();

        // Swap the payload segment for one from a different token.
        let donor = service
            .issue(&Account { id: 8, ..sample_account() })
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let donor_parts: Vec<&str> = donor.split('.').collect();
        let tampered = format!("{}.{}.{}", parts[0], donor_parts[1], parts[2]);

        assert_eq!(service.verify(&tampered).unwrap_err(), TokenError::Malformed);
    }
}
