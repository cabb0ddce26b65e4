use super::{CrmObject, HubSpotClient, HubSpotError, SearchRequest};

pub const SALES_REP_JOB_TITLE: &str = "Sales Rep";

const IDENTITY_PROPERTIES: &[&str] = &["email", "firstname", "lastname", "jobtitle", "company"];
const SALES_REP_PROPERTIES: &[&str] = &["firstname", "lastname", "email"];
const PM_REP_PROPERTIES: &[&str] = &["firstname", "lastname", "email", "jobtitle"];

impl HubSpotClient {
    /// First contact whose email matches exactly. Duplicates upstream are ignored.
    pub async fn get_contact_by_email(&self, email: &str) -> Result<Option<CrmObject>, HubSpotError> {
        let search = SearchRequest::eq("email", email)
            .properties(IDENTITY_PROPERTIES)
            .limit(1);

        let response = self.search::<CrmObject>("contacts", &search).await?;
        Ok(response.results.into_iter().next())
    }

    /// Contacts whose `jobtitle` equals `job_title` exactly.
    pub async fn search_contacts_by_job_title(&self, job_title: &str) -> Result<Vec<CrmObject>, HubSpotError> {
        let search = SearchRequest::eq("jobtitle", job_title).properties(SALES_REP_PROPERTIES);

        let response = self.search::<CrmObject>("contacts", &search).await?;
        Ok(response.results)
    }

    /// Reps assigned to a project manager.
    ///
    /// The portal stores the PM's *full name* in the `project_manager_email`
    /// property, so that is what gets matched.
    pub async fn search_reps_by_project_manager(&self, pm_name: &str) -> Result<Vec<CrmObject>, HubSpotError> {
        let search = SearchRequest::eq("project_manager_email", pm_name).properties(PM_REP_PROPERTIES);

        let response = self.search::<CrmObject>("contacts", &search).await?;
        Ok(response.results)
    }
}
