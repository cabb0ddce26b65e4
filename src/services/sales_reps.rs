use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::hubspot::contacts::SALES_REP_JOB_TITLE;
use crate::hubspot::{CrmObject, HubSpotClient, HubSpotError};

/// Rep display name -> email.
pub type SalesRepMap = HashMap<String, String>;

/// Process-lifetime cache of every contact titled "Sales Rep".
///
/// Loaded on first use and never refreshed; CRM edits made afterwards are not
/// seen until restart. Concurrent first callers may each load it; the loads are
/// equivalent and the last one written is kept.
#[derive(Debug, Clone, Default)]
pub struct SalesRepDirectory {
    cache: Arc<RwLock<Option<Arc<SalesRepMap>>>>,
}

impl SalesRepDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_load(&self, client: &HubSpotClient) -> Result<Arc<SalesRepMap>, HubSpotError> {
        // Fast path: already populated
        if let Some(map) = self.cached().await {
            return Ok(map);
        }

        let reps = client.search_contacts_by_job_title(SALES_REP_JOB_TITLE).await?;
        let map = Arc::new(build_sales_rep_map(&reps));
        info!("Loaded {} sales reps into the directory", map.len());

        {
            let mut cache = self.cache.write().await;
            *cache = Some(map.clone());
        }

        Ok(map)
    }

    pub async fn cached(&self) -> Option<Arc<SalesRepMap>> {
        self.cache.read().await.clone()
    }
}

/// Reps without an email are left out; lookups for them fall back the same way
/// as for unknown names.
pub fn build_sales_rep_map(reps: &[CrmObject]) -> SalesRepMap {
    reps.iter()
        .filter_map(|rep| {
            let email = rep.non_empty("email")?;
            Some((rep.full_name(), email.to_string()))
        })
        .collect()
}
