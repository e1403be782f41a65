#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::sync::Mutex;

    use crate::config::{self, AppConfig, DEV_JWT_SECRET};

    // Environment variables are process-global; tests that touch them must
    // not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.url, "sqlite://data/zahnarchiv.db");
        assert_eq!(config.auth.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.auth.token_ttl_hours, 24);
        assert_eq!(config.pagination.reviewer_page_size, 10);
        assert_eq!(config.pagination.uploader_page_size, 8);
        assert_eq!(config.pagination.max_page_size, 100);
    }

    #[test]
    fn test_valid_config_does_not_error() {
        let _guard = env_lock();
        let result = config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_invalid_server_port() {
        let _guard = env_lock();
        env::set_var("ZAHNARCHIV__SERVER__PORT", "0");
        let result = config::load();
        env::remove_var("ZAHNARCHIV__SERVER__PORT");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("invalid server.port"));
    }

    #[test]
    fn test_empty_jwt_secret_is_rejected() {
        let _guard = env_lock();
        env::set_var("ZAHNARCHIV__AUTH__JWT_SECRET", "");
        let result = config::load();
        env::remove_var("ZAHNARCHIV__AUTH__JWT_SECRET");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("auth.jwt_secret must not be empty"));
    }

    #[test]
    fn test_non_positive_token_ttl_is_rejected() {
        let _guard = env_lock();
        env::set_var("ZAHNARCHIV__AUTH__TOKEN_TTL_HOURS", "0");
        let result = config::load();
        env::remove_var("ZAHNARCHIV__AUTH__TOKEN_TTL_HOURS");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("auth.token_ttl_hours must be > 0"));
    }

    #[test]
    fn test_page_size_validation() {
        let _guard = env_lock();

        env::set_var("ZAHNARCHIV__PAGINATION__REVIEWER_PAGE_SIZE", "0");
        let result = config::load();
        env::remove_var("ZAHNARCHIV__PAGINATION__REVIEWER_PAGE_SIZE");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("pagination.reviewer_page_size must be >= 1"));

        // The ceiling must not undercut the per-role defaults.
        env::set_var("ZAHNARCHIV__PAGINATION__MAX_PAGE_SIZE", "5");
        let result = config::load();
        env::remove_var("ZAHNARCHIV__PAGINATION__MAX_PAGE_SIZE");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("pagination.max_page_size must be >= both page-size defaults"));
    }

    #[test]
    fn test_config_from_env() {
        let _guard = env_lock();
        env::set_var("ZAHNARCHIV__SERVER__HOST", "0.0.0.0");
        env::set_var("ZAHNARCHIV__SERVER__PORT", "3000");
        env::set_var("ZAHNARCHIV__DATABASE__URL", "sqlite://test.db");
        env::set_var("ZAHNARCHIV__AUTH__JWT_SECRET", "env-secret");

        let config = config::load().unwrap();

        env::remove_var("ZAHNARCHIV__SERVER__HOST");
        env::remove_var("ZAHNARCHIV__SERVER__PORT");
        env::remove_var("ZAHNARCHIV__DATABASE__URL");
        env::remove_var("ZAHNARCHIV__AUTH__JWT_SECRET");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite://test.db");
        assert_eq!(config.auth.jwt_secret, "env-secret");
    }

    #[test]
    fn test_config_from_file() {
        let _guard = env_lock();
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("override.toml");
        fs::write(
            &config_path,
            r#"
[server]
host = "192.168.1.1"
port = 9000

[auth]
jwt_secret = "file-secret"
"#,
        )
        .unwrap();

        env::set_var("ZAHNARCHIV_CONFIG", config_path.to_str().unwrap());
        let config = config::load().unwrap();
        env::remove_var("ZAHNARCHIV_CONFIG");

        assert_eq!(config.server.host, "192.168.1.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.jwt_secret, "file-secret");
        // Sections the file omits keep their embedded defaults.
        assert_eq!(config.pagination.reviewer_page_size, 10);
    }

    #[test]
    fn test_env_overrides_file() {
        let _guard = env_lock();
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("override.toml");
        fs::write(&config_path, "[server]\nport = 7000\n").unwrap();

        env::set_var("ZAHNARCHIV_CONFIG", config_path.to_str().unwrap());
        env::set_var("ZAHNARCHIV__SERVER__PORT", "8888");
        let config = config::load().unwrap();
        env::remove_var("ZAHNARCHIV_CONFIG");
        env::remove_var("ZAHNARCHIV__SERVER__PORT");

        assert_eq!(config.server.port, 8888);
    }

    #[test]
    fn test_ensure_sqlite_parent_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("subdir/zahnarchiv.db");
        let db_url = format!("sqlite://{}", db_path.display());

        assert!(!db_path.parent().unwrap().exists());

        config::ensure_sqlite_parent_dir(&db_url).unwrap();

        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_ignores_other_schemes() {
        let result = config::ensure_sqlite_parent_dir("postgres://localhost/db");
        assert!(result.is_ok());
    }
}
