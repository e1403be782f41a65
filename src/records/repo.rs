use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};

use crate::error::{validation, AppError, AppResult};
use crate::types::{PatientSummary, Region, RegionCount, ScanPayload, ScanRecord, StatsSummary};

/// Which records an operation may see: everything, or one owner's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    All,
    Owner(i64),
}

/// Optional list filters. Empty strings are treated as absent by the engine
/// before they reach the repository.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    pub search: Option<String>,
    pub region: Option<String>,
}

const SCAN_COLUMNS: &str =
    "s.id, s.patient_name, s.patient_id, s.scan_type, s.region, s.image_url, s.upload_date, s.uploaded_by";

#[derive(Clone)]
pub struct ScanRepository {
    db: SqlitePool,
}

impl ScanRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Inserts a new record for `owner_id` and returns it as persisted, so
    /// the server-assigned upload timestamp comes back with the record.
    pub async fn create(&self, owner_id: i64, payload: &ScanPayload) -> AppResult<ScanRecord> {
        let region = validate_payload(payload)?;

        let result = sqlx::query(
            "INSERT INTO scans (patient_name, patient_id, scan_type, region, image_url, uploaded_by) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&payload.patient_name)
        .bind(&payload.patient_id)
        .bind(&payload.scan_type)
        .bind(region.as_str())
        .bind(&payload.image_url)
        .bind(owner_id)
        .execute(&self.db)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!(scan_id = id, owner_id, "scan record created");

        self.fetch_plain(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("scan {} missing directly after insert", id))
        })
    }

    /// Fetches one record with the owning account's email joined in.
    pub async fn get_with_uploader(&self, id: i64) -> AppResult<Option<ScanRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {}, a.email AS uploaded_by_email FROM scans s \
             LEFT JOIN accounts a ON s.uploaded_by = a.id WHERE s.id = ?",
            SCAN_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        row.map(|r| record_from_row(&r, true)).transpose()
    }

    /// Full-replace update, permitted only to the owner. A record that does
    /// not exist and a record owned by someone else produce the same
    /// NotFound so non-owners learn nothing about existence.
    pub async fn update(&self, id: i64, owner_id: i64, payload: &ScanPayload) -> AppResult<ScanRecord> {
        let region = validate_payload(payload)?;

        self.require_owned(id, owner_id).await?;

        sqlx::query(
            "UPDATE scans SET patient_name = ?, patient_id = ?, scan_type = ?, region = ?, image_url = ? \
             WHERE id = ? AND uploaded_by = ?",
        )
        .bind(&payload.patient_name)
        .bind(&payload.patient_id)
        .bind(&payload.scan_type)
        .bind(region.as_str())
        .bind(&payload.image_url)
        .bind(id)
        .bind(owner_id)
        .execute(&self.db)
        .await?;

        self.fetch_plain(id).await?.ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("scan {} missing directly after update", id))
        })
    }

    /// Deletes a record, with the same ownership conflation as `update`.
    pub async fn delete(&self, id: i64, owner_id: i64) -> AppResult<()> {
        self.require_owned(id, owner_id).await?;

        sqlx::query("DELETE FROM scans WHERE id = ? AND uploaded_by = ?")
            .bind(id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        tracing::info!(scan_id = id, owner_id, "scan record deleted");
        Ok(())
    }

    /// Total record count under the given scope and filters, ignoring any
    /// page/limit clause.
    pub async fn count(&self, scope: RecordScope, filter: &ScanFilter) -> AppResult<i64> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) AS cnt FROM scans s WHERE 1=1");
        push_filters(&mut qb, scope, filter);
        let row = qb.build().fetch_one(&self.db).await?;
        Ok(row.try_get::<i64, _>("cnt")?)
    }

    /// One page of records under the given scope and filters, newest upload
    /// first with insertion id as the tie-break.
    pub async fn page(
        &self,
        scope: RecordScope,
        filter: &ScanFilter,
        with_uploader_email: bool,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<ScanRecord>> {
        let mut qb = if with_uploader_email {
            QueryBuilder::new(format!(
                "SELECT {}, a.email AS uploaded_by_email FROM scans s \
                 LEFT JOIN accounts a ON s.uploaded_by = a.id WHERE 1=1",
                SCAN_COLUMNS
            ))
        } else {
            QueryBuilder::new(format!("SELECT {} FROM scans s WHERE 1=1", SCAN_COLUMNS))
        };
        push_filters(&mut qb, scope, filter);
        qb.push(" ORDER BY s.upload_date DESC, s.id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb.build().fetch_all(&self.db).await?;
        rows.iter().map(|r| record_from_row(r, with_uploader_email)).collect()
    }

    pub async fn distinct_regions(&self) -> AppResult<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT region FROM scans ORDER BY region")
            .fetch_all(&self.db)
            .await?;
        rows.iter()
            .map(|r| r.try_get::<String, _>("region").map_err(AppError::from))
            .collect()
    }

    /// Aggregate counts under the given scope: totals, per-region breakdown
    /// (largest first), and uploads dated today (UTC).
    pub async fn stats(&self, scope: RecordScope) -> AppResult<StatsSummary> {
        let total_scans =
            self.count_where("SELECT COUNT(*) AS cnt FROM scans s WHERE 1=1", scope).await?;
        let total_patients = self
            .count_where("SELECT COUNT(DISTINCT s.patient_id) AS cnt FROM scans s WHERE 1=1", scope)
            .await?;
        let today_uploads = self
            .count_where(
                "SELECT COUNT(*) AS cnt FROM scans s WHERE DATE(s.upload_date) = DATE('now')",
                scope,
            )
            .await?;

        let mut qb = QueryBuilder::new("SELECT s.region, COUNT(*) AS cnt FROM scans s WHERE 1=1");
        push_scope(&mut qb, scope);
        qb.push(" GROUP BY s.region ORDER BY cnt DESC");
        let rows = qb.build().fetch_all(&self.db).await?;
        let scans_by_region = rows
            .iter()
            .map(|r| {
                Ok(RegionCount { region: r.try_get("region")?, count: r.try_get("cnt")? })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(StatsSummary { total_scans, total_patients, scans_by_region, today_uploads })
    }

    /// Distinct (patient id, patient name) pairs under the given scope.
    pub async fn patients(&self, scope: RecordScope) -> AppResult<Vec<PatientSummary>> {
        let mut qb =
            QueryBuilder::new("SELECT DISTINCT s.patient_id, s.patient_name FROM scans s WHERE 1=1");
        push_scope(&mut qb, scope);
        qb.push(" ORDER BY s.patient_name");
        let rows = qb.build().fetch_all(&self.db).await?;
        rows.iter()
            .map(|r| {
                Ok(PatientSummary {
                    patient_id: r.try_get("patient_id")?,
                    patient_name: r.try_get("patient_name")?,
                })
            })
            .collect()
    }

    async fn fetch_plain(&self, id: i64) -> AppResult<Option<ScanRecord>> {
        let row = sqlx::query(&format!("SELECT {} FROM scans s WHERE s.id = ?", SCAN_COLUMNS))
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        row.map(|r| record_from_row(&r, false)).transpose()
    }

    async fn require_owned(&self, id: i64, owner_id: i64) -> AppResult<()> {
        let owned = sqlx::query("SELECT id FROM scans WHERE id = ? AND uploaded_by = ?")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.db)
            .await?;
        match owned {
            Some(_) => Ok(()),
            None => Err(not_found_or_denied()),
        }
    }

    async fn count_where(&self, base: &str, scope: RecordScope) -> AppResult<i64> {
        let mut qb = QueryBuilder::new(base);
        push_scope(&mut qb, scope);
        let row = qb.build().fetch_one(&self.db).await?;
        Ok(row.try_get::<i64, _>("cnt")?)
    }
}

fn push_scope(qb: &mut QueryBuilder<'_, Sqlite>, scope: RecordScope) {
    if let RecordScope::Owner(owner_id) = scope {
        qb.push(" AND s.uploaded_by = ").push_bind(owner_id);
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, scope: RecordScope, filter: &ScanFilter) {
    push_scope(qb, scope);
    if let Some(term) = &filter.search {
        // instr() keeps the substring match case-sensitive; LIKE would fold
        // ASCII case and needs escape handling on top.
        qb.push(" AND (instr(s.patient_name, ")
            .push_bind(term.clone())
            .push(") > 0 OR instr(s.patient_id, ")
            .push_bind(term.clone())
            .push(") > 0)");
    }
    if let Some(region) = &filter.region {
        qb.push(" AND s.region = ").push_bind(region.clone());
    }
}

fn validate_payload(payload: &ScanPayload) -> AppResult<Region> {
    validation::require_all_non_empty(
        &[&payload.patient_name, &payload.patient_id, &payload.region, &payload.image_url],
        "Patient name, patient ID, region, and image URL are required",
    )?;
    Region::parse(&payload.region).ok_or_else(|| {
        AppError::Validation("Region must be 'Frontal', 'Upper Arch', or 'Lower Arch'".to_string())
    })
}

fn not_found_or_denied() -> AppError {
    AppError::NotFound("Scan not found or access denied".to_string())
}

fn record_from_row(row: &SqliteRow, with_uploader_email: bool) -> AppResult<ScanRecord> {
    Ok(ScanRecord {
        id: row.try_get("id")?,
        patient_name: row.try_get("patient_name")?,
        patient_id: row.try_get("patient_id")?,
        scan_type: row.try_get("scan_type")?,
        region: row.try_get("region")?,
        image_url: row.try_get("image_url")?,
        upload_date: row.try_get("upload_date")?,
        uploaded_by: row.try_get("uploaded_by")?,
        uploaded_by_email: if with_uploader_email {
            row.try_get("uploaded_by_email")?
        } else {
            None
        },
    })
}
