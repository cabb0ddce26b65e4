use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A HubSpot CRM object (deal, contact, note) as returned by the v3 API.
///
/// Only `id` and `properties` are interpreted; everything else (`createdAt`,
/// `archived`, ...) rides along in `extra` so records can be passed through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrmObject {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CrmObject {
    /// String value of a property. Missing, null and non-string values are `None`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(Value::as_str)
    }

    /// Non-empty string value of a property.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.property(name).filter(|v| !v.is_empty())
    }

    /// "firstname lastname", trimmed only at the ends. Reps are matched against
    /// deals' `sales_rep` exactly, so inner whitespace is kept.
    pub fn full_name(&self) -> String {
        join_name(self.property("firstname"), self.property("lastname"))
    }

    /// Like [`CrmObject::full_name`] but each part is trimmed first.
    pub fn trimmed_full_name(&self) -> String {
        join_name(
            self.property("firstname").map(str::trim),
            self.property("lastname").map(str::trim),
        )
    }
}

fn join_name(first: Option<&str>, last: Option<&str>) -> String {
    format!("{} {}", first.unwrap_or(""), last.unwrap_or(""))
        .trim()
        .to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub paging: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Descending,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub property_name: String,
    pub direction: SortDirection,
}

/// Body of `POST /crm/v3/objects/{type}/search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    pub limit: u32,
}

impl SearchRequest {
    /// Single filter group with one equality filter.
    pub fn eq(property_name: &str, value: &str) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: property_name.to_string(),
                    operator: FilterOperator::Eq,
                    value: value.to_string(),
                }],
            }],
            sorts: Vec::new(),
            properties: Vec::new(),
            limit: super::SEARCH_LIMIT,
        }
    }

    pub fn properties(mut self, properties: &[&str]) -> Self {
        self.properties = properties.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn sort_descending(mut self, property_name: &str) -> Self {
        self.sorts.push(Sort {
            property_name: property_name.to_string(),
            direction: SortDirection::Descending,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// A HubSpot user who can own records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Owner {
    pub fn full_name(&self) -> String {
        join_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// Most recent note on a deal, standing in for the pinned note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PinnedNote {
    pub id: String,
    pub body: Option<String>,
    pub created_at: Option<String>,
}
