use crate::auth::SessionClaims;
use crate::config::PaginationConfig;
use crate::error::AppResult;
use crate::types::{PageMeta, Role, ScanRecord};

use super::repo::{RecordScope, ScanFilter, ScanRepository};

/// Caller-supplied pagination knobs, before normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Turns an authenticated identity plus filters into a scoped, ordered page
/// of scan records with pagination metadata.
///
/// The role decides everything role-shaped: Uploaders are restricted to
/// their own records and get the smaller default page size; Reviewers see
/// all records, enriched with the uploader's email.
#[derive(Clone)]
pub struct ScanQueryEngine {
    repo: ScanRepository,
    pagination: PaginationConfig,
}

impl ScanQueryEngine {
    pub fn new(repo: ScanRepository, pagination: PaginationConfig) -> Self {
        Self { repo, pagination }
    }

    pub async fn list(
        &self,
        identity: &SessionClaims,
        search: Option<String>,
        region: Option<String>,
        page: PageRequest,
    ) -> AppResult<(Vec<ScanRecord>, PageMeta)> {
        let (scope, with_uploader_email, default_limit) = match identity.role {
            Role::Reviewer => (RecordScope::All, true, self.pagination.reviewer_page_size),
            Role::Uploader => {
                (RecordScope::Owner(identity.sub), false, self.pagination.uploader_page_size)
            }
        };

        let filter = ScanFilter {
            search: search.filter(|s| !s.is_empty()),
            region: region.filter(|r| !r.is_empty()),
        };

        // Out-of-range inputs normalize instead of erroring: page floors at 1,
        // a non-positive limit falls back to the endpoint default, an oversized
        // one clamps to the ceiling.
        let current_page = page.page.unwrap_or(1).max(1);
        let per_page = match page.limit {
            Some(l) if l >= 1 => l.min(self.pagination.max_page_size),
            _ => default_limit,
        };
        let offset = (current_page - 1).saturating_mul(per_page);

        let total_records = self.repo.count(scope, &filter).await?;
        let records =
            self.repo.page(scope, &filter, with_uploader_email, per_page, offset).await?;

        let total_pages =
            if total_records == 0 { 0 } else { (total_records + per_page - 1) / per_page };

        let meta = PageMeta { current_page, total_pages, total_records, per_page };
        Ok((records, meta))
    }
}
