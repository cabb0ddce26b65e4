use std::collections::HashMap;

use serde::Serialize;

use super::{deal_stage, PermitRow, Summary};
use crate::hubspot::CrmObject;
use crate::services::sales_reps::SalesRepMap;

pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentGroup {
    pub name: String,
    pub email: String,
    pub count: u32,
    pub deal_ids: Vec<String>,
}

/// Company-wide view for a general manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GmDashboard {
    pub company: Option<String>,
    pub summary: Summary,
    /// One entry per sales agent, in order of first appearance.
    pub agents: Vec<AgentGroup>,
    pub permits: Vec<PermitRow>,
}

impl GmDashboard {
    pub fn placeholder() -> Self {
        Self::default()
    }
}

pub fn build_company_dashboard(company: &str, deals: &[CrmObject], rep_emails: &SalesRepMap) -> GmDashboard {
    let mut dashboard = GmDashboard {
        company: Some(company.to_string()),
        ..GmDashboard::default()
    };
    let mut agent_index: HashMap<String, usize> = HashMap::new();

    for deal in deals {
        let stage = deal_stage(deal);
        dashboard.summary.record(&stage);

        let agent_name = deal.non_empty("sales_rep").unwrap_or(UNASSIGNED).to_string();
        let slot = *agent_index.entry(agent_name.clone()).or_insert_with(|| {
            dashboard.agents.push(AgentGroup {
                email: rep_emails
                    .get(&agent_name)
                    .cloned()
                    .unwrap_or_else(|| UNASSIGNED.to_string()),
                name: agent_name.clone(),
                count: 0,
                deal_ids: Vec::new(),
            });
            dashboard.agents.len() - 1
        });

        let group = &mut dashboard.agents[slot];
        group.count += 1;
        group.deal_ids.push(deal.id.clone());

        let mut row = PermitRow::new(deal, stage);
        row.sales_agent = Some(agent_name);
        dashboard.permits.push(row);
    }

    dashboard
}
