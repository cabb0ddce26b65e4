use axum::extract::{Path, State};

use crate::dashboard::{distinct_stages, stage_per_deal, DealStage};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/stages/:sales_rep - distinct normalized stages across a rep's deals
pub async fn distinct(State(state): State<AppState>, Path(sales_rep): Path<String>) -> ApiResult<Vec<String>> {
    let deals = state.portal.deals_for_rep(&sales_rep).await?;
    Ok(ApiResponse::success(distinct_stages(&deals)))
}

/// GET /api/stages/:sales_rep/deals - normalized stage of each of a rep's deals
pub async fn per_deal(State(state): State<AppState>, Path(sales_rep): Path<String>) -> ApiResult<Vec<DealStage>> {
    let deals = state.portal.deals_for_rep(&sales_rep).await?;
    Ok(ApiResponse::success(stage_per_deal(&deals)))
}
