use serde::Serialize;

use super::{calendar_date, deal_stage, PermitRow, Summary};
use crate::hubspot::CrmObject;
use crate::stage::Bucket;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub id: String,
    pub project_name: Option<String>,
    pub last_modified: Option<String>,
    pub description: Option<String>,
}

impl Alert {
    fn from_deal(deal: &CrmObject) -> Self {
        Self {
            id: deal.id.clone(),
            project_name: deal.property("dealname").map(str::to_string),
            last_modified: deal.property("hs_lastmodifieddate").map(calendar_date),
            description: deal.property("description").map(str::to_string),
        }
    }
}

/// Deals still moving through the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alerts {
    pub pre_submittal: Vec<Alert>,
    pub post_submittal: Vec<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RepDashboard {
    /// Rep the dashboard was built for; `None` when the caller could not be
    /// resolved and this is an empty placeholder.
    pub sales_rep: Option<String>,
    pub summary: Summary,
    pub alerts: Alerts,
    pub permits: Vec<PermitRow>,
}

impl RepDashboard {
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn for_rep(mut self, sales_rep: impl Into<String>) -> Self {
        self.sales_rep = Some(sales_rep.into());
        self
    }
}

pub fn build_rep_dashboard(deals: &[CrmObject]) -> RepDashboard {
    let mut dashboard = RepDashboard::default();

    for deal in deals {
        let stage = deal_stage(deal);
        dashboard.summary.record(&stage);

        if stage.needs_attention() {
            let alert = Alert::from_deal(deal);
            match stage.bucket() {
                Some(Bucket::PreSubmittal) => dashboard.alerts.pre_submittal.push(alert),
                _ => dashboard.alerts.post_submittal.push(alert),
            }
        }

        dashboard.permits.push(PermitRow::new(deal, stage));
    }

    dashboard
}
