use axum::extract::{Path, State};

use crate::dashboard::{deals_in_stage, RepDashboard};
use crate::hubspot::CrmObject;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::DealDetail;
use crate::state::AppState;

/// GET /api/deals/by-sales-rep/:sales_rep - raw deals for a rep
pub async fn by_sales_rep(State(state): State<AppState>, Path(sales_rep): Path<String>) -> ApiResult<Vec<CrmObject>> {
    let deals = state.portal.deals_for_rep(&sales_rep).await?;
    Ok(ApiResponse::success(deals))
}

/// GET /api/deals/:sales_rep/stage/:permit_stage - stage drill-down for a rep
pub async fn by_stage(
    State(state): State<AppState>,
    Path((sales_rep, permit_stage)): Path<(String, String)>,
) -> ApiResult<Vec<CrmObject>> {
    let deals = state.portal.deals_for_rep(&sales_rep).await?;
    Ok(ApiResponse::success(deals_in_stage(deals, &permit_stage)))
}

/// GET /api/deal/:deal_id - deal detail with its most recent note
pub async fn detail(State(state): State<AppState>, Path(deal_id): Path<String>) -> ApiResult<DealDetail> {
    let detail = state.portal.deal_detail(&deal_id).await?;
    Ok(ApiResponse::success(detail))
}

/// GET /api/dashboard/:sales_rep - dashboard for a rep by display name
pub async fn dashboard(State(state): State<AppState>, Path(sales_rep): Path<String>) -> ApiResult<RepDashboard> {
    let dashboard = state.portal.rep_dashboard(&sales_rep).await?;
    Ok(ApiResponse::success(dashboard))
}
