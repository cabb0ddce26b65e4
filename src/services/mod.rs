pub mod portal;
pub mod sales_reps;

pub use portal::{ContactVerification, DealDetail, PortalService};
pub use sales_reps::{SalesRepDirectory, SalesRepMap};
