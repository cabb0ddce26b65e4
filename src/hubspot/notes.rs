use serde_json::Value;
use tracing::debug;

use super::{CrmObject, HubSpotClient, HubSpotError, PinnedNote, SearchRequest};

pub const DEFAULT_NOTES_PAGE_SIZE: u32 = 100;

impl HubSpotClient {
    /// Most recently created note associated with the deal.
    ///
    /// HubSpot's pin flag is not consulted; recency stands in for it. `None`
    /// when the deal has no notes.
    pub async fn get_pinned_note_for_deal(&self, deal_id: &str) -> Result<Option<PinnedNote>, HubSpotError> {
        let search = SearchRequest::eq("associations.deal", deal_id)
            .sort_descending("hs_createdate")
            .limit(1);

        let response = self.search::<CrmObject>("notes", &search).await?;
        let Some(latest) = response.results.into_iter().next() else {
            debug!("Deal {} has no notes", deal_id);
            return Ok(None);
        };

        let note: CrmObject = self
            .get(
                &["crm", "v3", "objects", "notes", latest.id.as_str()],
                &[("properties", "hs_note_body,hs_createdate")],
            )
            .await?;

        Ok(Some(PinnedNote {
            body: note.property("hs_note_body").map(str::to_string),
            created_at: note.property("hs_createdate").map(str::to_string),
            id: latest.id,
        }))
    }

    /// Account-wide notes page, returned exactly as HubSpot sent it
    /// (`results` plus `paging.next.after`).
    pub async fn list_notes(&self, limit: u32, after: Option<&str>) -> Result<Value, HubSpotError> {
        let limit = limit.to_string();
        let mut query = vec![("limit", limit.as_str())];
        if let Some(after) = after.filter(|a| !a.is_empty()) {
            query.push(("after", after));
        }

        self.get(&["crm", "v3", "objects", "notes"], &query).await
    }

    /// Body text of a single note.
    pub async fn get_note_body(&self, note_id: &str) -> Result<Option<String>, HubSpotError> {
        let note: CrmObject = self
            .get(&["crm", "v3", "objects", "notes", note_id], &[("properties", "hs_note_body")])
            .await?;

        Ok(note.property("hs_note_body").map(str::to_string))
    }
}
