// Endpoints keyed by a portal user's email. Unknown emails produce empty
// placeholders, never errors.

use axum::extract::{Path, State};
use serde::Serialize;

use crate::dashboard::{GmDashboard, RepDashboard, RepWithDeals};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ContactVerification;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct OwnerLookup {
    pub email: String,
    pub sales_rep: Option<String>,
}

/// GET /api/dashboard/by-email/:email - rep dashboard for a portal user
pub async fn dashboard_by_email(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<RepDashboard> {
    let dashboard = state.portal.rep_dashboard_for_email(&email).await?;
    Ok(ApiResponse::success(dashboard))
}

/// GET /api/me/dashboard - rep dashboard for the token's subject
pub async fn my_dashboard(State(state): State<AppState>, user: AuthUser) -> ApiResult<RepDashboard> {
    let dashboard = state.portal.rep_dashboard_for_email(&user.email).await?;
    Ok(ApiResponse::success(dashboard))
}

/// GET /api/owners/by-email/:email - HubSpot owner name for an email
pub async fn owner_by_email(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<OwnerLookup> {
    let sales_rep = state.portal.client().find_owner_name_by_email(&email).await?;
    Ok(ApiResponse::success(OwnerLookup { email, sales_rep }))
}

/// GET /api/contacts/verify/:email - confirm a contact exists and return their dashboard
pub async fn verify_contact(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<ContactVerification> {
    let verification = state.portal.verify_contact(&email).await?;
    Ok(ApiResponse::success(verification))
}

/// GET /api/pm/:email/sales-reps - reps reporting to a project manager
pub async fn pm_sales_reps(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<Vec<RepWithDeals>> {
    let reps = state.portal.pm_sales_reps(&email).await?;
    Ok(ApiResponse::success(reps))
}

/// GET /api/gm/:email/dashboard - company dashboard for a general manager
pub async fn gm_dashboard(State(state): State<AppState>, Path(email): Path<String>) -> ApiResult<GmDashboard> {
    let dashboard = state.portal.gm_dashboard(&email).await?;
    Ok(ApiResponse::success(dashboard))
}
