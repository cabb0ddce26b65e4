use std::collections::BTreeSet;

use serde::Serialize;

use super::deal_stage;
use crate::hubspot::CrmObject;
use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealStage {
    pub deal_id: String,
    pub permit_stage: Stage,
}

pub fn stage_per_deal(deals: &[CrmObject]) -> Vec<DealStage> {
    deals
        .iter()
        .map(|deal| DealStage {
            deal_id: deal.id.clone(),
            permit_stage: deal_stage(deal),
        })
        .collect()
}

/// Sorted, de-duplicated stage names.
pub fn distinct_stages(deals: &[CrmObject]) -> Vec<String> {
    deals
        .iter()
        .map(|deal| deal_stage(deal).display().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Deals whose raw or normalized stage equals `wanted`, ignoring case.
pub fn deals_in_stage(deals: Vec<CrmObject>, wanted: &str) -> Vec<CrmObject> {
    let wanted = wanted.trim().to_lowercase();

    deals
        .into_iter()
        .filter(|deal| {
            let normalized = deal_stage(deal);
            let raw = deal.non_empty("dealstage").or_else(|| deal.property("permit_stage"));
            normalized.display().to_lowercase() == wanted
                || raw.map(|r| r.trim().to_lowercase() == wanted).unwrap_or(false)
        })
        .collect()
}
