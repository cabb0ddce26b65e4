#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use hubspot_middleware::auth::{generate_jwt, Claims};
use hubspot_middleware::config::AppConfig;
use hubspot_middleware::hubspot::HubSpotClient;
use hubspot_middleware::{app, AppState};

pub const TEST_SECRET: &str = "test-signing-secret-0123456789";
pub const HUBSPOT_TOKEN: &str = "pat-test-token";

/// One request the fake HubSpot received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl RecordedCall {
    pub fn filter_value(&self) -> Option<&str> {
        self.body.as_ref()?["filterGroups"][0]["filters"][0]["value"].as_str()
    }

    pub fn filter_property(&self) -> Option<&str> {
        self.body.as_ref()?["filterGroups"][0]["filters"][0]["propertyName"].as_str()
    }
}

#[derive(Default)]
struct Fixtures {
    deals: Vec<Value>,
    contacts: Vec<Value>,
    notes: Vec<Value>,
    owners: Vec<Value>,
    failing_paths: Vec<(String, u16)>,
    failing_filter_values: Vec<String>,
}

#[derive(Default)]
struct Inner {
    fixtures: Mutex<Fixtures>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// In-process stand-in for the HubSpot CRM v3 API.
#[derive(Clone, Default)]
pub struct FakeHubSpot {
    inner: Arc<Inner>,
}

impl FakeHubSpot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deal(&self, id: &str, properties: Value) -> &Self {
        self.push_deal(json!({ "id": id, "properties": properties, "archived": false }))
    }

    pub fn with_contact_deal(&self, id: &str, contact_id: &str, properties: Value) -> &Self {
        self.push_deal(json!({
            "id": id,
            "properties": properties,
            "associations": { "contact": [contact_id] }
        }))
    }

    fn push_deal(&self, deal: Value) -> &Self {
        self.inner.fixtures.lock().unwrap().deals.push(deal);
        self
    }

    pub fn with_contact(&self, id: &str, properties: Value) -> &Self {
        self.inner
            .fixtures
            .lock()
            .unwrap()
            .contacts
            .push(json!({ "id": id, "properties": properties }));
        self
    }

    pub fn with_note(&self, id: &str, deal_id: &str, body: &str, created: &str) -> &Self {
        self.inner.fixtures.lock().unwrap().notes.push(json!({
            "id": id,
            "properties": { "hs_note_body": body, "hs_createdate": created },
            "associations": { "deal": [deal_id] }
        }));
        self
    }

    pub fn with_owner(&self, email: &str, first: &str, last: &str) -> &Self {
        self.inner.fixtures.lock().unwrap().owners.push(json!({
            "id": format!("owner-{}", email),
            "email": email,
            "firstName": first,
            "lastName": last,
            "archived": false
        }));
        self
    }

    /// Every request to `path` answers with `status`.
    pub fn fail_path(&self, path: &str, status: u16) -> &Self {
        self.inner
            .fixtures
            .lock()
            .unwrap()
            .failing_paths
            .push((path.to_string(), status));
        self
    }

    /// Searches filtering on `value` answer 500.
    pub fn fail_search_for(&self, value: &str) -> &Self {
        self.inner
            .fixtures
            .lock()
            .unwrap()
            .failing_filter_values
            .push(value.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, method: &str, path: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    /// Serve on an ephemeral local port and return the base URL.
    pub async fn spawn(&self) -> Result<String> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake HubSpot")?;
        let addr = listener.local_addr()?;

        let router = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(format!("http://{}", addr))
    }

    fn record(&self, call: RecordedCall) {
        self.inner.calls.lock().unwrap().push(call);
    }
}

async fn handle(State(fake): State<FakeHubSpot>, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
    let body: Option<Value> = serde_json::from_slice(&body).ok();
    let call = RecordedCall {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    fake.record(call.clone());

    let fixtures = fake.inner.fixtures.lock().unwrap();

    if let Some((_, status)) = fixtures.failing_paths.iter().find(|(p, _)| *p == call.path) {
        let status = StatusCode::from_u16(*status).unwrap();
        return (status, Json(json!({ "status": "error", "message": "injected failure" }))).into_response();
    }
    if let Some(value) = call.filter_value() {
        if fixtures.failing_filter_values.iter().any(|v| v == value) {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": "injected search failure" })),
            )
                .into_response();
        }
    }

    let segments: Vec<&str> = call.path.trim_start_matches('/').split('/').collect();
    match (call.method.as_str(), segments.as_slice()) {
        ("POST", ["crm", "v3", "objects", object, "search"]) => {
            let collection = match *object {
                "deals" => &fixtures.deals,
                "contacts" => &fixtures.contacts,
                "notes" => &fixtures.notes,
                _ => return StatusCode::NOT_FOUND.into_response(),
            };
            Json(search(collection, call.body.as_ref().unwrap_or(&Value::Null))).into_response()
        }
        ("GET", ["crm", "v3", "objects", "deals", id]) => find_by_id(&fixtures.deals, id),
        ("GET", ["crm", "v3", "objects", "notes", id]) => find_by_id(&fixtures.notes, id),
        ("GET", ["crm", "v3", "objects", "notes"]) => Json(list_page(&fixtures.notes, call.query.as_deref())).into_response(),
        ("GET", ["crm", "v3", "owners"]) => Json(json!({ "results": fixtures.owners })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

fn public_view(object: &Value) -> Value {
    let mut object = object.clone();
    if let Some(map) = object.as_object_mut() {
        map.remove("associations");
    }
    object
}

fn find_by_id(collection: &[Value], id: &str) -> Response {
    match collection.iter().find(|o| o["id"] == json!(id)) {
        Some(object) => Json(public_view(object)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "status": "error", "message": "Object not found" }))).into_response(),
    }
}

fn search(collection: &[Value], body: &Value) -> Value {
    let filter = &body["filterGroups"][0]["filters"][0];
    let property = filter["propertyName"].as_str().unwrap_or_default();
    let value = filter["value"].as_str().unwrap_or_default();
    let limit = body["limit"].as_u64().unwrap_or(10) as usize;

    let mut matched: Vec<&Value> = collection
        .iter()
        .filter(|object| match property.strip_prefix("associations.") {
            Some(kind) => object["associations"][kind]
                .as_array()
                .map(|ids| ids.iter().any(|id| id == value))
                .unwrap_or(false),
            None => object["properties"][property].as_str() == Some(value),
        })
        .collect();

    if let Some(sort) = body["sorts"].get(0) {
        let key = sort["propertyName"].as_str().unwrap_or_default().to_string();
        matched.sort_by(|a, b| {
            let a = a["properties"][&key].as_str().unwrap_or_default();
            let b = b["properties"][&key].as_str().unwrap_or_default();
            if sort["direction"] == json!("DESCENDING") {
                b.cmp(a)
            } else {
                a.cmp(b)
            }
        });
    }

    let total = matched.len();
    let results: Vec<Value> = matched.into_iter().take(limit).map(public_view).collect();
    let mut response = json!({ "total": total, "results": results });
    if total > limit {
        response["paging"] = json!({ "next": { "after": limit.to_string() } });
    }
    response
}

fn list_page(collection: &[Value], query: Option<&str>) -> Value {
    let mut limit = 10usize;
    let mut after = 0usize;
    for pair in query.unwrap_or_default().split('&') {
        match pair.split_once('=') {
            Some(("limit", v)) => limit = v.parse().unwrap_or(limit),
            Some(("after", v)) => after = v.parse().unwrap_or(after),
            _ => {}
        }
    }

    let results: Vec<Value> = collection.iter().skip(after).take(limit).map(public_view).collect();
    let mut response = json!({ "results": results });
    if after + limit < collection.len() {
        response["paging"] = json!({ "next": { "after": (after + limit).to_string() } });
    }
    response
}

/// Development config pointed at the fake, with a known signing secret.
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::development();
    config.hubspot.base_url = base_url.to_string();
    config.hubspot.token = HUBSPOT_TOKEN.to_string();
    config.security.jwt_secret = Some(TEST_SECRET.to_string());
    config.api.enable_request_logging = false;
    config
}

pub async fn client_for(fake: &FakeHubSpot) -> Result<HubSpotClient> {
    let base_url = fake.spawn().await?;
    Ok(HubSpotClient::new(&test_config(&base_url).hubspot)?)
}

pub async fn app_for(fake: &FakeHubSpot) -> Result<Router> {
    let base_url = fake.spawn().await?;
    app_with_config(test_config(&base_url))
}

pub fn app_with_config(config: AppConfig) -> Result<Router> {
    Ok(app(AppState::from_config(config)?))
}

pub fn bearer(email: &str) -> String {
    let claims = Claims::new(email, Some("sales_rep".to_string()), 1).unwrap();
    format!("Bearer {}", generate_jwt(&claims, Some(TEST_SECRET)).unwrap())
}

/// Issue a GET through the router and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str, authorization: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut request = Request::builder().uri(uri);
    if let Some(value) = authorization {
        request = request.header("authorization", value);
    }

    let response = app.clone().oneshot(request.body(Body::empty())?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    // Extractor rejections are plain text
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    Ok((status, body))
}

/// GET with a valid token for `rep@example.com`.
pub async fn get_authed(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    get_json(app, uri, Some(&bearer("rep@example.com"))).await
}

pub fn ids(values: &Value) -> Vec<String> {
    values
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["id"].as_str().or_else(|| item["deal_id"].as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn props(pairs: &[(&str, &str)]) -> Value {
    let map: Map<String, Value> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    Value::Object(map)
}
