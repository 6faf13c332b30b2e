//! Wire types for the trace service.
//!
//! Request bodies are serialized as-is. Response fields the server may omit
//! default to empty values so a sparse payload still decodes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NameSearchRequest<'a> {
    pub name: &'a str,
    pub page: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IdLookupRequest {
    pub id: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct IdentityNumberRequest<'a> {
    pub nric: &'a str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RelationsRequest {
    pub id: i64,
    pub offset: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HistoryRequest {
    pub page: u32,
}

// ============================================================================
// Records
// ============================================================================

/// One row of a name search.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct NameRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mykad: String,
}

/// Full person record returned by id, identity-number and relation lookups.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PersonRecord {
    pub id: i64,
    pub name: String,
    pub mykad: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    pub phone: String,
    pub gender: String,
    pub mobile: String,
    pub race: String,
    pub religion: String,
    pub income: String,
    pub occupations: String,
    pub addresses: String,
}

impl PersonRecord {
    /// Labelled fields shown on the detail card, in display order.
    pub fn display_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("Name", self.name.as_str()),
            ("Mykad", self.mykad.as_str()),
            ("Address", self.address.as_str()),
            ("Gender", self.gender.as_str()),
            ("Mobile", self.mobile.as_str()),
            ("Phone", self.phone.as_str()),
            ("Race", self.race.as_str()),
            ("Religion", self.religion.as_str()),
            ("Income", self.income.as_str()),
        ]
    }
}

/// An edge between two person records.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Relation {
    pub user_id: i64,
    pub related_user_id: i64,
    pub relation: String,
}

/// One past query made with the current token.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub email: String,
    pub query: String,
    #[serde(rename = "result_summary")]
    pub result: String,
    pub cost: f64,
}

// ============================================================================
// Account
// ============================================================================

/// The account the token belongs to, echoed back by most lookups.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub balance: f64,
    pub subscriptions: Vec<Subscription>,
}

impl Account {
    /// First active subscription, if any.
    pub fn active_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.active)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Subscription {
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub active: bool,
    /// An unreadable timestamp decodes as `None` rather than failing the lookup.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub expired_at: Option<DateTime<Utc>>,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct NameSearchResponse {
    pub data: Vec<NameRecord>,
    pub message: String,
    pub user: Option<Account>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DetailResponse {
    pub data: Vec<PersonRecord>,
    pub message: String,
    pub user: Option<Account>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RelationsResponse {
    pub data: Vec<PersonRecord>,
    pub relationships: Relation,
    pub user: Option<Account>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HistoryResponse {
    pub data: Vec<HistoryEntry>,
    pub message: String,
}
