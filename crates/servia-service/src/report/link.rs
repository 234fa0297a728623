//! Client-facing links for technical reports.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use servia_auth::access::AccessController;
use servia_auth::token;
use servia_core::error::AppError;
use servia_core::result::AppResult;
use servia_database::repositories::report::ReportRepository;

use crate::context::RequestContext;

/// Random bytes behind a client link token.
const CLIENT_TOKEN_BYTES: usize = 32;

/// Issues shareable client tokens for technical reports.
///
/// Each report gets at most one client token. Repeated requests return
/// the stored token instead of minting a new one, so previously shared
/// links keep working.
#[derive(Debug, Clone)]
pub struct ReportLinkService {
    /// Technical report repository.
    report_repo: Arc<ReportRepository>,
    /// Cross-tenant access control.
    access: Arc<AccessController>,
}

impl ReportLinkService {
    /// Creates a new report link service.
    pub fn new(report_repo: Arc<ReportRepository>, access: Arc<AccessController>) -> Self {
        Self {
            report_repo,
            access,
        }
    }

    /// Returns the report's client token, minting one if absent.
    pub async fn client_link(&self, ctx: &RequestContext, report_id: Uuid) -> AppResult<String> {
        let report = self
            .report_repo
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| AppError::not_found("Technical report not found"))?;

        self.access
            .ensure_tenant_access(&ctx.user, report.tenant_id)
            .await?;

        let had_token = report.client_token.is_some();

        // COALESCE in the store keeps an existing token over the candidate.
        let candidate = token::generate(CLIENT_TOKEN_BYTES);
        let stored = self
            .report_repo
            .set_client_token_if_absent(report_id, &candidate)
            .await?
            .ok_or_else(|| AppError::not_found("Technical report not found"))?;

        if !had_token {
            info!(
                report_id = %report_id,
                user_id = %ctx.user.id,
                "Issued client link token for technical report"
            );
        }

        Ok(stored)
    }
}
