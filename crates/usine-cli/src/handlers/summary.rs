use serde::Serialize;
use usine_export::{record_count, ReportDomain};

use crate::context::CliContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct DomainSummary {
    pub domain: ReportDomain,
    pub slug: &'static str,
    pub title: &'static str,
    pub records: usize,
}

pub fn handle_summary(ctx: &CliContext) -> anyhow::Result<()> {
    let items = ReportDomain::ALL
        .iter()
        .map(|domain| DomainSummary {
            domain: *domain,
            slug: domain.slug(),
            title: domain.default_title(),
            records: record_count(*domain, &ctx.dataset),
        })
        .collect();
    output::output_list(items)
}
