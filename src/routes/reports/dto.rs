use serde::Deserialize;
use utoipa::IntoParams;

use crate::reports::{ReportFormat, ReportKind};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// `csv` (default) or `txt`
    pub format: Option<ReportFormat>,
}

/// `dinamizar-<kind>.<ext>`
pub fn attachment_name(kind: ReportKind, format: ReportFormat) -> String {
    format!("dinamizar-{}.{}", kind.slug(), format.extension())
}
