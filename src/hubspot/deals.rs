use super::{CrmObject, HubSpotClient, HubSpotError, SearchRequest};

/// Properties requested for the deal detail view. Several internal names are
/// misspelled in the HubSpot portal itself and must stay that way.
pub const DEAL_DETAIL_PROPERTIES: &[&str] = &[
    "dealname",
    "permit_stage",
    "juridstiction",
    "project_address",
    "dependency",
    "general_contractor",
    "finnace",
    "kickoff_invoice_status",
    "project_start_date",
    "floor_plan",
    "pier_plan",
    "chasis_plan",
    "elevations",
    "sprinkler_plan",
    "pending_articles",
    "sales_rep",
];

pub const REP_DEAL_PROPERTIES: &[&str] = &[
    "dealname",
    "dealstage",
    "project_address",
    "juridstiction",
    "dependency",
    "permit_number",
    "submittal_portal",
    "hs_lastmodifieddate",
    "description",
];

pub const CONTACT_DEAL_PROPERTIES: &[&str] = &[
    "dealname",
    "dealstage",
    "project_address",
    "juridstiction",
    "dependency",
    "permit_number",
    "submittal_portal",
    "hs_lastmodifieddate",
    "description",
    "amount",
];

/// Company searches need `sales_rep` to group deals by agent.
pub const COMPANY_DEAL_PROPERTIES: &[&str] = &[
    "dealname",
    "dealstage",
    "project_address",
    "juridstiction",
    "dependency",
    "permit_number",
    "sales_rep",
    "hs_lastmodifieddate",
    "description",
];

/// The single equality predicate a deal search runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealFilter<'a> {
    /// Deal's `sales_rep` property equals the rep's display name.
    SalesRep(&'a str),
    /// Deal is associated with the contact id.
    Contact(&'a str),
    /// Deal's custom `company` property equals the company name.
    Company(&'a str),
}

impl DealFilter<'_> {
    pub fn property_name(&self) -> &'static str {
        match self {
            DealFilter::SalesRep(_) => "sales_rep",
            DealFilter::Contact(_) => "associations.contact",
            DealFilter::Company(_) => "company",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            DealFilter::SalesRep(v) | DealFilter::Contact(v) | DealFilter::Company(v) => v,
        }
    }

    pub fn properties(&self) -> &'static [&'static str] {
        match self {
            DealFilter::SalesRep(_) => REP_DEAL_PROPERTIES,
            DealFilter::Contact(_) => CONTACT_DEAL_PROPERTIES,
            DealFilter::Company(_) => COMPANY_DEAL_PROPERTIES,
        }
    }

    pub fn to_search(&self) -> SearchRequest {
        SearchRequest::eq(self.property_name(), self.value()).properties(self.properties())
    }
}

impl HubSpotClient {
    /// `GET /crm/v3/objects/deals/{id}` with the detail property list.
    pub async fn get_deal(&self, deal_id: &str) -> Result<CrmObject, HubSpotError> {
        let query: Vec<(&str, &str)> = DEAL_DETAIL_PROPERTIES
            .iter()
            .map(|p| ("properties", *p))
            .collect();

        self.get(&["crm", "v3", "objects", "deals", deal_id], &query).await
    }

    /// One search, capped at [`super::SEARCH_LIMIT`] results. Paging metadata is
    /// dropped; matches past the cap are never fetched.
    pub async fn search_deals(&self, filter: DealFilter<'_>) -> Result<Vec<CrmObject>, HubSpotError> {
        let response = self.search::<CrmObject>("deals", &filter.to_search()).await?;
        Ok(response.results)
    }
}
