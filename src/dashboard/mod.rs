//! Dashboard response shapes built from raw HubSpot deals.
//!
//! Everything here is pure: callers fetch, these functions reshape.

pub mod company;
pub mod pm;
pub mod rep;
pub mod stages;

use chrono::DateTime;
use serde::Serialize;

use crate::hubspot::CrmObject;
use crate::stage::{Bucket, Stage};

pub use company::{build_company_dashboard, AgentGroup, GmDashboard, UNASSIGNED};
pub use pm::{format_deal_for_pm_view, PmDeal, RepWithDeals};
pub use rep::{build_rep_dashboard, Alert, Alerts, RepDashboard};
pub use stages::{deals_in_stage, distinct_stages, stage_per_deal, DealStage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub pre_submittal: u32,
    pub post_submittal: u32,
    pub completed: u32,
}

impl Summary {
    pub fn record(&mut self, stage: &Stage) {
        match stage.bucket() {
            Some(Bucket::PreSubmittal) => self.pre_submittal += 1,
            Some(Bucket::PostSubmittal) => self.post_submittal += 1,
            Some(Bucket::Completed) => self.completed += 1,
            None => {}
        }
    }
}

/// Flat table row, one per deal whether or not it landed in a summary bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermitRow {
    pub deal_id: String,
    pub deal_name: Option<String>,
    pub stage: Stage,
    pub address: Option<String>,
    pub jurisdiction: Option<String>,
    pub dependency: Option<String>,
    pub permit_number: Option<String>,
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_agent: Option<String>,
}

impl PermitRow {
    pub fn new(deal: &CrmObject, stage: Stage) -> Self {
        Self {
            deal_id: deal.id.clone(),
            deal_name: owned(deal, "dealname"),
            stage,
            address: owned(deal, "project_address"),
            jurisdiction: owned(deal, "juridstiction"),
            dependency: owned(deal, "dependency"),
            permit_number: owned(deal, "permit_number"),
            last_modified: deal.property("hs_lastmodifieddate").map(calendar_date),
            sales_agent: None,
        }
    }
}

/// Stage of a deal. Searches request `dealstage`; the detail view only has
/// `permit_stage`.
pub fn deal_stage(deal: &CrmObject) -> Stage {
    Stage::parse(deal.non_empty("dealstage").or_else(|| deal.property("permit_stage")))
}

/// `YYYY-MM-DD` part of a HubSpot timestamp, without time of day.
pub fn calendar_date(value: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return ts.date_naive().to_string();
    }
    value.chars().take(10).collect()
}

fn owned(deal: &CrmObject, name: &str) -> Option<String> {
    deal.property(name).map(str::to_string)
}
