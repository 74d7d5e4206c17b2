//! Deal filter parameters shared by the action bar, the URL and the queries.
//!
//! DESIGN
//! ======
//! The URL query string is the single source of truth for filters: the
//! deals page parses it into a [`DealFilter`], the action bar edits a copy
//! and writes it back, and the stage/item queries derive their GraphQL
//! variables from the same struct. Id lists travel in the URL as
//! comma-separated values.

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use serde_json::{Map, Value, json};

/// Id-list filters selectable from the filter box.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdFilter {
    Customers,
    Companies,
    AssignedUsers,
    Products,
}

impl IdFilter {
    /// URL parameter and GraphQL variable name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Customers => "customerIds",
            Self::Companies => "companyIds",
            Self::AssignedUsers => "assignedUserIds",
            Self::Products => "productIds",
        }
    }
}

/// Close-date shortcut flags accepted by the stage and item queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueFilter {
    NextDay,
    NextWeek,
    NoCloseDate,
}

impl DueFilter {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::NextDay => "nextDay",
            Self::NextWeek => "nextWeek",
            Self::NoCloseDate => "noCloseDate",
        }
    }
}

/// Start or end of the date range filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateBound {
    Start,
    End,
}

impl DateBound {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Start => "startDate",
            Self::End => "endDate",
        }
    }
}

/// Every filter the deals board understands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DealFilter {
    pub search: Option<String>,
    pub customer_ids: Vec<String>,
    pub company_ids: Vec<String>,
    pub assigned_user_ids: Vec<String>,
    pub product_ids: Vec<String>,
    /// `YYYY-MM-DD HH:mm`, as produced by the date inputs.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub next_day: bool,
    pub next_week: bool,
    pub no_close_date: bool,
}

impl DealFilter {
    /// Parse filters from URL parameters; `get` returns the decoded value for a key.
    pub fn from_query(get: impl Fn(&str) -> Option<String>) -> Self {
        let text = |key: &str| get(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let ids = |filter: IdFilter| get(filter.key()).map(|v| split_ids(&v)).unwrap_or_default();
        let flag = |due: DueFilter| get(due.key()).is_some_and(|v| v == "true");

        Self {
            search: text("search"),
            customer_ids: ids(IdFilter::Customers),
            company_ids: ids(IdFilter::Companies),
            assigned_user_ids: ids(IdFilter::AssignedUsers),
            product_ids: ids(IdFilter::Products),
            start_date: text(DateBound::Start.key()),
            end_date: text(DateBound::End.key()),
            next_day: flag(DueFilter::NextDay),
            next_week: flag(DueFilter::NextWeek),
            no_close_date: flag(DueFilter::NoCloseDate),
        }
    }

    /// Non-empty filters as URL parameters, in a stable order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        for filter in [IdFilter::Customers, IdFilter::Companies, IdFilter::AssignedUsers, IdFilter::Products] {
            let ids = self.ids(filter);
            if !ids.is_empty() {
                pairs.push((filter.key(), ids.join(",")));
            }
        }
        for bound in [DateBound::Start, DateBound::End] {
            if let Some(date) = self.date(bound) {
                pairs.push((bound.key(), date.to_owned()));
            }
        }
        for due in [DueFilter::NextDay, DueFilter::NextWeek, DueFilter::NoCloseDate] {
            if self.due(due) {
                pairs.push((due.key(), "true".to_owned()));
            }
        }
        pairs
    }

    #[must_use]
    pub fn ids(&self, filter: IdFilter) -> &[String] {
        match filter {
            IdFilter::Customers => &self.customer_ids,
            IdFilter::Companies => &self.company_ids,
            IdFilter::AssignedUsers => &self.assigned_user_ids,
            IdFilter::Products => &self.product_ids,
        }
    }

    pub fn set_ids(&mut self, filter: IdFilter, ids: Vec<String>) {
        let ids = ids.into_iter().filter(|id| !id.trim().is_empty()).collect();
        match filter {
            IdFilter::Customers => self.customer_ids = ids,
            IdFilter::Companies => self.company_ids = ids,
            IdFilter::AssignedUsers => self.assigned_user_ids = ids,
            IdFilter::Products => self.product_ids = ids,
        }
    }

    #[must_use]
    pub fn date(&self, bound: DateBound) -> Option<&str> {
        match bound {
            DateBound::Start => self.start_date.as_deref(),
            DateBound::End => self.end_date.as_deref(),
        }
    }

    /// Set or clear (`""`) one end of the date range.
    pub fn set_date(&mut self, bound: DateBound, value: &str) {
        let value = Some(value.trim().to_owned()).filter(|v| !v.is_empty());
        match bound {
            DateBound::Start => self.start_date = value,
            DateBound::End => self.end_date = value,
        }
    }

    #[must_use]
    pub fn due(&self, due: DueFilter) -> bool {
        match due {
            DueFilter::NextDay => self.next_day,
            DueFilter::NextWeek => self.next_week,
            DueFilter::NoCloseDate => self.no_close_date,
        }
    }

    pub fn set_due(&mut self, due: DueFilter, on: bool) {
        match due {
            DueFilter::NextDay => self.next_day = on,
            DueFilter::NextWeek => self.next_week = on,
            DueFilter::NoCloseDate => self.no_close_date = on,
        }
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = Some(search.trim().to_owned()).filter(|s| !s.is_empty());
    }

    /// Whether any filter beyond the search box is set.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        let mut copy = self.clone();
        copy.search = None;
        copy != Self::default()
    }

    /// Variables for the stages query of `pipeline_id`.
    #[must_use]
    pub fn stage_variables(&self, pipeline_id: &str) -> Value {
        let mut vars = self.common_variables();
        vars.insert("pipelineId".to_owned(), json!(pipeline_id));
        if let Some(search) = &self.search {
            vars.insert("search".to_owned(), json!(search));
        }
        Value::Object(vars)
    }

    /// Variables for one page of items in `stage_id`.
    #[must_use]
    pub fn item_variables(&self, pipeline_id: &str, stage_id: &str, skip: usize) -> Value {
        let mut vars = self.common_variables();
        vars.insert("pipelineId".to_owned(), json!(pipeline_id));
        vars.insert("stageId".to_owned(), json!(stage_id));
        vars.insert("skip".to_owned(), json!(skip));
        if let Some(search) = &self.search {
            vars.insert("search".to_owned(), json!(search));
        }
        Value::Object(vars)
    }

    /// Variables for the pipeline-wide totals query.
    #[must_use]
    pub fn total_amount_variables(&self, pipeline_id: &str) -> Value {
        let mut vars = self.common_variables();
        vars.insert("pipelineId".to_owned(), json!(pipeline_id));
        Value::Object(vars)
    }

    fn common_variables(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        for filter in [IdFilter::Customers, IdFilter::Companies, IdFilter::AssignedUsers, IdFilter::Products] {
            let ids = self.ids(filter);
            if !ids.is_empty() {
                vars.insert(filter.key().to_owned(), json!(ids));
            }
        }
        for due in [DueFilter::NextDay, DueFilter::NextWeek, DueFilter::NoCloseDate] {
            if self.due(due) {
                vars.insert(due.key().to_owned(), json!("true"));
            }
        }
        vars
    }
}

/// Split a comma-separated id list, dropping blanks and duplicates.
#[must_use]
pub fn split_ids(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|id| !id.is_empty()) {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_owned());
        }
    }
    out
}
