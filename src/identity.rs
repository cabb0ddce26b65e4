//! Email -> CRM identity.
//!
//! Roles are not first-class in the CRM; they are read off a contact's free-text
//! job title or company field. Every resolver returns `Ok(None)` when the email
//! does not resolve, and only CRM failures are errors.

use tracing::{info, warn};

use crate::hubspot::{CrmObject, HubSpotClient, HubSpotError};

const PROJECT_MANAGER_MARKER: &str = "project manager";

/// Contact record for `email`, if any.
pub async fn resolve_contact(client: &HubSpotClient, email: &str) -> Result<Option<CrmObject>, HubSpotError> {
    let contact = client.get_contact_by_email(email).await?;
    if contact.is_none() {
        warn!("No HubSpot contact found for {}", email);
    }
    Ok(contact)
}

/// Sales rep display name for a portal user, looked up among CRM owners.
pub async fn resolve_sales_rep(client: &HubSpotClient, email: &str) -> Result<Option<String>, HubSpotError> {
    client.find_owner_name_by_email(email).await
}

pub fn is_project_manager(contact: &CrmObject) -> bool {
    contact
        .property("jobtitle")
        .map(|title| title.to_lowercase().contains(PROJECT_MANAGER_MARKER))
        .unwrap_or(false)
}

/// Full name of the project manager behind `email`. Contacts whose job title
/// does not mention "project manager" do not resolve.
pub async fn resolve_project_manager(client: &HubSpotClient, email: &str) -> Result<Option<String>, HubSpotError> {
    let Some(contact) = resolve_contact(client, email).await? else {
        return Ok(None);
    };

    if !is_project_manager(&contact) {
        warn!("{} is not a Project Manager", email);
        return Ok(None);
    }

    let name = contact.trimmed_full_name();
    info!("Resolved project manager {} -> '{}'", email, name);
    Ok(Some(name))
}

/// Company a general manager is assigned to, from the contact's `company` field.
pub async fn resolve_gm_company(client: &HubSpotClient, email: &str) -> Result<Option<String>, HubSpotError> {
    let Some(contact) = resolve_contact(client, email).await? else {
        return Ok(None);
    };

    match contact.non_empty("company") {
        Some(company) => {
            info!("Resolved general manager {} -> company '{}'", email, company);
            Ok(Some(company.to_string()))
        }
        None => {
            warn!("Contact {} has no assigned company value", email);
            Ok(None)
        }
    }
}
