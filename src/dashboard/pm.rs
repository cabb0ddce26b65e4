use serde::Serialize;

use super::calendar_date;
use crate::hubspot::CrmObject;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmDealProperties {
    /// Creation date only, `YYYY-MM-DD`.
    pub createdate: String,
    pub dealname: Option<String>,
    pub dealstage: Option<String>,
    pub juridstiction: Option<String>,
    pub permit_number: Option<String>,
    pub project_address: Option<String>,
    pub submittal_portal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PmDeal {
    pub id: String,
    pub properties: PmDealProperties,
}

/// A rep contact as HubSpot returned it, plus that rep's deals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepWithDeals {
    #[serde(flatten)]
    pub rep: CrmObject,
    pub deals: Vec<PmDeal>,
}

pub fn format_deal_for_pm_view(deal: &CrmObject) -> PmDeal {
    let prop = |name: &str| deal.property(name).map(str::to_string);

    PmDeal {
        id: deal.id.clone(),
        properties: PmDealProperties {
            createdate: deal.property("createdate").map(calendar_date).unwrap_or_default(),
            dealname: prop("dealname"),
            dealstage: prop("dealstage"),
            juridstiction: prop("juridstiction"),
            permit_number: prop("permit_number"),
            project_address: prop("project_address"),
            submittal_portal: prop("submittal_portal"),
        },
    }
}
