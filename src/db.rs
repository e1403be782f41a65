use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;

    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // accounts table. The CHECK repeats the closed role set so out-of-band
    // writes cannot widen it.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL CHECK (role IN ('Uploader', 'Reviewer')),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now'))
        )"#,
    )
    .execute(pool)
    .await?;

    // scans table. upload_date is server-assigned and never updated.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS scans (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_name TEXT NOT NULL,
            patient_id TEXT NOT NULL,
            scan_type TEXT NOT NULL DEFAULT 'RGB',
            region TEXT NOT NULL CHECK (region IN ('Frontal', 'Upper Arch', 'Lower Arch')),
            image_url TEXT NOT NULL,
            upload_date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now')),
            uploaded_by INTEGER NOT NULL,
            FOREIGN KEY(uploaded_by) REFERENCES accounts(id)
        )"#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        ("idx_scans_uploaded_by", "CREATE INDEX IF NOT EXISTS idx_scans_uploaded_by ON scans(uploaded_by)"),
        ("idx_scans_region", "CREATE INDEX IF NOT EXISTS idx_scans_region ON scans(region)"),
        ("idx_scans_upload_date", "CREATE INDEX IF NOT EXISTS idx_scans_upload_date ON scans(upload_date DESC, id DESC)"),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
