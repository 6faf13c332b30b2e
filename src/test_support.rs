//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::types::{DetailResponse, HistoryResponse, NameSearchResponse, RelationsResponse};
use crate::api::{ApiError, HistoryEntry, NameRecord, PersonRecord, Relation, TraceService};
use crate::core::action::{Action, Completion, Effect, Key, Payload, update};
use crate::core::query::QueryContext;
use crate::core::state::App;

/// A canned service that records every call as `"<op>:<args>:<token>"`.
#[derive(Default)]
pub struct StubService {
    names: Vec<NameRecord>,
    details: Vec<PersonRecord>,
    relation: Relation,
    history: Vec<HistoryEntry>,
    error: Option<ApiError>,
    calls: Mutex<Vec<String>>,
}

impl StubService {
    pub fn failing(error: ApiError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn with_names(mut self, names: Vec<NameRecord>) -> Self {
        self.names = names;
        self
    }

    pub fn with_details(mut self, details: Vec<PersonRecord>) -> Self {
        self.details = details;
        self
    }

    pub fn with_relations(mut self, details: Vec<PersonRecord>, relation: Relation) -> Self {
        self.details = details;
        self.relation = relation;
        self
    }

    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TraceService for StubService {
    async fn search_by_name(
        &self,
        token: &str,
        term: &str,
        page: u32,
    ) -> Result<NameSearchResponse, ApiError> {
        self.record(format!("name:{term}:{page}:{token}"))?;
        Ok(NameSearchResponse {
            data: self.names.clone(),
            ..Default::default()
        })
    }

    async fn lookup_by_id(&self, token: &str, id: i64) -> Result<DetailResponse, ApiError> {
        self.record(format!("id:{id}:{token}"))?;
        Ok(DetailResponse {
            data: self.details.clone(),
            ..Default::default()
        })
    }

    async fn lookup_by_identity_number(
        &self,
        token: &str,
        number: &str,
    ) -> Result<DetailResponse, ApiError> {
        self.record(format!("nric:{number}:{token}"))?;
        Ok(DetailResponse {
            data: self.details.clone(),
            ..Default::default()
        })
    }

    async fn fetch_relations(
        &self,
        token: &str,
        id: i64,
        offset: u32,
    ) -> Result<RelationsResponse, ApiError> {
        self.record(format!("relations:{id}:{offset}:{token}"))?;
        Ok(RelationsResponse {
            data: self.details.clone(),
            relationships: self.relation.clone(),
            user: None,
        })
    }

    async fn fetch_history(&self, token: &str, page: u32) -> Result<HistoryResponse, ApiError> {
        self.record(format!("history:{page}:{token}"))?;
        Ok(HistoryResponse {
            data: self.history.clone(),
            ..Default::default()
        })
    }
}

/// An app that already holds the token `tok123`, sitting on the main menu.
pub fn authenticated_app() -> App {
    App::new(Some("tok123".to_string()))
}

pub fn press(app: &mut App, key: Key) -> Effect {
    update(app, Action::Key(key))
}

pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, Key::Char(c));
    }
}

pub fn completed(query: QueryContext, payload: Payload) -> Action {
    Action::Completed(Completion {
        query,
        outcome: Ok(payload),
    })
}

pub fn names(records: Vec<NameRecord>) -> Payload {
    Payload::Names {
        records,
        account: None,
    }
}

pub fn name_record(id: i64, name: &str) -> NameRecord {
    NameRecord {
        id,
        name: name.to_string(),
        mykad: format!("900101-01-{id:04}"),
    }
}

pub fn person(id: i64, name: &str) -> PersonRecord {
    PersonRecord {
        id,
        name: name.to_string(),
        mykad: format!("900101-01-{id:04}"),
        address: "12 Jalan Ampang".to_string(),
        gender: "F".to_string(),
        ..Default::default()
    }
}

pub fn history_entry(query: &str) -> HistoryEntry {
    HistoryEntry {
        kind: "name".to_string(),
        email: "ops@example.com".to_string(),
        query: query.to_string(),
        result: "1 result".to_string(),
        cost: 0.5,
    }
}
