use tracing::{info, warn};

use super::{HubSpotClient, HubSpotError, Owner, SearchResponse};

impl HubSpotClient {
    /// `GET /crm/v3/owners`. The endpoint has no email filter.
    pub async fn list_owners(&self) -> Result<Vec<Owner>, HubSpotError> {
        let response: SearchResponse<Owner> = self.get(&["crm", "v3", "owners"], &[] as &[(&str, &str)]).await?;
        Ok(response.results)
    }

    /// Display name of the owner whose email matches, ignoring case and
    /// surrounding whitespace.
    pub async fn find_owner_name_by_email(&self, email: &str) -> Result<Option<String>, HubSpotError> {
        let owners = self.list_owners().await?;

        match owner_name_for_email(&owners, email) {
            Some(name) => {
                info!("Mapped email '{}' -> sales rep '{}'", email, name);
                Ok(Some(name))
            }
            None => {
                warn!("No HubSpot owner found for email: {}", email);
                Ok(None)
            }
        }
    }
}

pub fn owner_name_for_email(owners: &[Owner], email: &str) -> Option<String> {
    let wanted = email.trim().to_lowercase();

    owners
        .iter()
        .find(|owner| {
            owner
                .email
                .as_deref()
                .map(|e| e.trim().to_lowercase() == wanted)
                .unwrap_or(false)
        })
        .map(Owner::full_name)
}
