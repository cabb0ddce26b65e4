use axum::extract::{rejection::QueryRejection, Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::hubspot::notes::DEFAULT_NOTES_PAGE_SIZE;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub after: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoteBody {
    pub id: String,
    pub body: Option<String>,
}

/// GET /api/notes?limit=&after= - one page of account-wide notes
///
/// Paging is left to the caller: pass `paging.next.after` back as `after`.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_NOTES_PAGE_SIZE);
    let page = state.portal.client().list_notes(limit, query.after.as_deref()).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/notes/:note_id - body of a single note
pub async fn get(State(state): State<AppState>, Path(note_id): Path<String>) -> ApiResult<NoteBody> {
    let body = state.portal.client().get_note_body(&note_id).await?;
    Ok(ApiResponse::success(NoteBody { id: note_id, body }))
}
