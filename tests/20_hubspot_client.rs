mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use hubspot_middleware::hubspot::{DealFilter, HubSpotError, SEARCH_LIMIT};
use hubspot_middleware::services::SalesRepDirectory;

use common::FakeHubSpot;

#[tokio::test]
async fn rep_search_sends_one_capped_equality_query() -> Result<()> {
    let fake = FakeHubSpot::new();
    for i in 0..150 {
        fake.with_deal(&format!("d{}", i), common::props(&[("sales_rep", "Jordan Lee")]));
    }
    let client = common::client_for(&fake).await?;

    let deals = client.search_deals(DealFilter::SalesRep("Jordan Lee")).await?;

    assert_eq!(deals.len(), SEARCH_LIMIT as usize, "results are capped, not paginated");

    let calls = fake.calls_to("POST", "/crm/v3/objects/deals/search");
    assert_eq!(calls.len(), 1);
    assert_eq!(fake.call_count(), 1);

    let body = calls[0].body.clone().unwrap_or_default();
    assert_eq!(
        body["filterGroups"],
        json!([{ "filters": [{ "propertyName": "sales_rep", "operator": "EQ", "value": "Jordan Lee" }] }])
    );
    assert_eq!(body["limit"], 100);
    let properties: Vec<&str> = body["properties"]
        .as_array()
        .map(|p| p.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();
    assert!(properties.contains(&"dealstage"));
    assert!(properties.contains(&"hs_lastmodifieddate"));
    Ok(())
}

#[tokio::test]
async fn contact_search_filters_on_the_association() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.with_contact_deal("d1", "c42", common::props(&[("dealname", "Oak St ADU")]))
        .with_contact_deal("d2", "c7", common::props(&[("dealname", "Elsewhere")]));
    let client = common::client_for(&fake).await?;

    let deals = client.search_deals(DealFilter::Contact("c42")).await?;

    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0].id, "d1");
    assert_eq!(fake.calls()[0].filter_property(), Some("associations.contact"));
    Ok(())
}

#[tokio::test]
async fn deal_detail_requests_named_properties() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.with_deal("123", common::props(&[("dealname", "Oak St ADU"), ("permit_stage", "Intake")]));
    let client = common::client_for(&fake).await?;

    let deal = client.get_deal("123").await?;
    assert_eq!(deal.property("dealname"), Some("Oak St ADU"));

    let calls = fake.calls_to("GET", "/crm/v3/objects/deals/123");
    assert_eq!(calls.len(), 1);
    let query = calls[0].query.clone().unwrap_or_default();
    assert!(query.contains("properties=dealname"), "query was {}", query);
    assert!(query.contains("properties=juridstiction"), "query was {}", query);
    Ok(())
}

#[tokio::test]
async fn deal_without_notes_has_no_pinned_note() -> Result<()> {
    let fake = FakeHubSpot::new();
    let client = common::client_for(&fake).await?;

    let note = client.get_pinned_note_for_deal("d1").await?;

    assert!(note.is_none());
    assert_eq!(fake.call_count(), 1, "no detail fetch when the search is empty");
    assert_eq!(fake.calls()[0].path, "/crm/v3/objects/notes/search");
    Ok(())
}

#[tokio::test]
async fn pinned_note_is_the_most_recent_one() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.with_note("n-old", "d1", "First call", "2024-01-05T09:00:00Z")
        .with_note("n-new", "d1", "Permit issued", "2024-03-10T09:00:00Z")
        .with_note("n-other", "d2", "Unrelated", "2024-04-01T09:00:00Z");
    let client = common::client_for(&fake).await?;

    let note = client.get_pinned_note_for_deal("d1").await?.expect("note expected");

    assert_eq!(note.id, "n-new");
    assert_eq!(note.body.as_deref(), Some("Permit issued"));
    assert_eq!(fake.call_count(), 2);

    let search = &fake.calls()[0];
    let body = search.body.clone().unwrap_or_default();
    assert_eq!(body["sorts"][0]["propertyName"], "hs_createdate");
    assert_eq!(body["sorts"][0]["direction"], "DESCENDING");
    assert_eq!(body["limit"], 1);
    Ok(())
}

#[tokio::test]
async fn notes_listing_forwards_paging_cursor() -> Result<()> {
    let fake = FakeHubSpot::new();
    for i in 0..5 {
        fake.with_note(&format!("n{}", i), "d1", "body", "2024-01-01T00:00:00Z");
    }
    let client = common::client_for(&fake).await?;

    let page = client.list_notes(2, Some("2")).await?;

    assert_eq!(common::ids(&page["results"]), vec!["n2", "n3"]);
    assert_eq!(page["paging"]["next"]["after"], "4");
    assert_eq!(fake.calls()[0].query.as_deref(), Some("limit=2&after=2"));
    Ok(())
}

#[tokio::test]
async fn upstream_failure_surfaces_status_and_body() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.fail_path("/crm/v3/objects/deals/search", 500);
    let client = common::client_for(&fake).await?;

    let err = client
        .search_deals(DealFilter::SalesRep("Jordan Lee"))
        .await
        .expect_err("search should fail");

    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    match err {
        HubSpotError::Status { body, .. } => assert!(body.contains("injected failure"), "body: {}", body),
        other => panic!("unexpected error: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn owner_lookup_ignores_case() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.with_owner("Jordan.Lee@Example.com", "Jordan", "Lee");
    let client = common::client_for(&fake).await?;

    assert_eq!(
        client.find_owner_name_by_email("jordan.lee@example.com").await?,
        Some("Jordan Lee".to_string())
    );
    assert_eq!(client.find_owner_name_by_email("nobody@example.com").await?, None);
    Ok(())
}

#[tokio::test]
async fn sales_rep_directory_loads_once() -> Result<()> {
    let fake = FakeHubSpot::new();
    fake.with_contact(
        "c1",
        common::props(&[("firstname", "Jordan"), ("lastname", "Lee"), ("email", "jordan@example.com"), ("jobtitle", "Sales Rep")]),
    )
    .with_contact(
        "c2",
        common::props(&[("firstname", "Sam"), ("lastname", "Ortiz"), ("email", "sam@example.com"), ("jobtitle", "Sales Rep")]),
    )
    .with_contact(
        "c3",
        common::props(&[("firstname", "Pat"), ("lastname", "Kim"), ("email", "pat@example.com"), ("jobtitle", "Project Manager")]),
    );
    let client = common::client_for(&fake).await?;
    let directory = SalesRepDirectory::new();

    let (first, second) = tokio::join!(directory.get_or_load(&client), directory.get_or_load(&client));
    let (first, second) = (first?, second?);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first.get("Jordan Lee").map(String::as_str), Some("jordan@example.com"));

    let loads = fake.call_count();
    assert!((1..=2).contains(&loads), "concurrent first loads: {}", loads);

    let third = directory.get_or_load(&client).await?;
    assert_eq!(fake.call_count(), loads, "populated directory must not call HubSpot");
    assert!(Arc::ptr_eq(&third, &directory.cached().await.expect("cached")));
    Ok(())
}
