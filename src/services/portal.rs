use serde::Serialize;
use tracing::info;

use crate::dashboard::{self, GmDashboard, RepDashboard, RepWithDeals};
use crate::hubspot::{CrmObject, DealFilter, HubSpotClient, HubSpotError, PinnedNote};
use crate::identity;
use crate::stage::Stage;

use super::sales_reps::SalesRepDirectory;

/// Deal plus its most recent note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealDetail {
    pub deal: CrmObject,
    pub permit_stage: Stage,
    pub pinned_note: Option<PinnedNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactVerification {
    pub email: String,
    pub verified: bool,
    pub contact: Option<CrmObject>,
    pub dashboard: RepDashboard,
}

/// Request-level operations of the portal API. Cheap to clone; clones share
/// the sales rep directory.
#[derive(Debug, Clone)]
pub struct PortalService {
    client: HubSpotClient,
    sales_reps: SalesRepDirectory,
}

impl PortalService {
    pub fn new(client: HubSpotClient) -> Self {
        Self {
            client,
            sales_reps: SalesRepDirectory::new(),
        }
    }

    pub fn client(&self) -> &HubSpotClient {
        &self.client
    }

    pub async fn deals_for_rep(&self, sales_rep: &str) -> Result<Vec<CrmObject>, HubSpotError> {
        self.client.search_deals(DealFilter::SalesRep(sales_rep)).await
    }

    pub async fn rep_dashboard(&self, sales_rep: &str) -> Result<RepDashboard, HubSpotError> {
        let deals = self.deals_for_rep(sales_rep).await?;
        Ok(dashboard::build_rep_dashboard(&deals).for_rep(sales_rep))
    }

    /// Dashboard for a portal user. Unknown emails get an empty placeholder.
    pub async fn rep_dashboard_for_email(&self, email: &str) -> Result<RepDashboard, HubSpotError> {
        match identity::resolve_sales_rep(&self.client, email).await? {
            Some(sales_rep) => self.rep_dashboard(&sales_rep).await,
            None => Ok(RepDashboard::placeholder()),
        }
    }

    pub async fn deal_detail(&self, deal_id: &str) -> Result<DealDetail, HubSpotError> {
        let deal = self.client.get_deal(deal_id).await?;
        let pinned_note = self.client.get_pinned_note_for_deal(deal_id).await?;

        Ok(DealDetail {
            permit_stage: dashboard::deal_stage(&deal),
            deal,
            pinned_note,
        })
    }

    /// Confirm an external user exists as a contact and build their dashboard
    /// from the deals associated with that contact.
    pub async fn verify_contact(&self, email: &str) -> Result<ContactVerification, HubSpotError> {
        let Some(contact) = identity::resolve_contact(&self.client, email).await? else {
            return Ok(ContactVerification {
                email: email.to_string(),
                verified: false,
                contact: None,
                dashboard: RepDashboard::placeholder(),
            });
        };

        let deals = self.client.search_deals(DealFilter::Contact(&contact.id)).await?;
        info!("Verified contact {} ({}) with {} deals", email, contact.id, deals.len());

        Ok(ContactVerification {
            email: email.to_string(),
            verified: true,
            dashboard: dashboard::build_rep_dashboard(&deals),
            contact: Some(contact),
        })
    }

    /// Reps reporting to the project manager behind `email`, each with their
    /// deals. Empty when the email is unknown or not a project manager. Rep
    /// deals are fetched one rep at a time and any failure fails the whole list.
    pub async fn pm_sales_reps(&self, email: &str) -> Result<Vec<RepWithDeals>, HubSpotError> {
        let Some(pm_name) = identity::resolve_project_manager(&self.client, email).await? else {
            return Ok(Vec::new());
        };

        let reps = self.client.search_reps_by_project_manager(&pm_name).await?;
        let mut result = Vec::with_capacity(reps.len());

        for rep in reps {
            let rep_name = rep.full_name();
            let deals = self.client.search_deals(DealFilter::SalesRep(&rep_name)).await?;
            result.push(RepWithDeals {
                deals: deals.iter().map(dashboard::format_deal_for_pm_view).collect(),
                rep,
            });
        }

        Ok(result)
    }

    /// Company dashboard for a general manager. Unknown emails and contacts
    /// without a company get an empty placeholder.
    pub async fn gm_dashboard(&self, email: &str) -> Result<GmDashboard, HubSpotError> {
        let Some(company) = identity::resolve_gm_company(&self.client, email).await? else {
            return Ok(GmDashboard::placeholder());
        };

        let deals = self.client.search_deals(DealFilter::Company(&company)).await?;
        let rep_emails = self.sales_reps.get_or_load(&self.client).await?;

        Ok(dashboard::build_company_dashboard(&company, &deals, &rep_emails))
    }
}
