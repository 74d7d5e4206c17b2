//! Wire DTOs for the CRM GraphQL API.
//!
//! DESIGN
//! ======
//! These types mirror the GraphQL response shapes (`_id` keys, camelCase
//! fields) so query payloads deserialize without an intermediate layer.
//! Optional collections default to empty and loosely typed numbers are
//! normalized at the boundary, so rendering code never branches on `null`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Per-currency totals, e.g. `{"USD": 1200.0, "EUR": 80.0}`.
pub type Amounts = BTreeMap<String, f64>;

/// A board groups pipelines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub pipelines: Vec<Pipeline>,
}

/// A pipeline is an ordered workflow of stages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub board_id: Option<String>,
}

/// A stage is one column of a pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pipeline_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub order: i64,
    /// Aggregate item amount per currency.
    #[serde(default, deserialize_with = "deserialize_amounts")]
    pub amount: Amounts,
    /// Total number of items in the stage, including ones not loaded yet.
    #[serde(default, rename = "dealsTotalCount", deserialize_with = "deserialize_i64_lenient")]
    pub items_total_count: i64,
}

/// A deal card living in exactly one stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub stage_id: String,
    #[serde(default)]
    pub pipeline: Option<Pipeline>,
    #[serde(default)]
    pub board_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub companies: Vec<Company>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub customers: Vec<Customer>,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub assigned_users: Vec<AssignedUser>,
    #[serde(default, deserialize_with = "deserialize_amounts")]
    pub amount: Amounts,
    /// Close date as sent by the API: ISO string or epoch milliseconds.
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub close_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub stage: Option<StageProbability>,
}

/// Win probability attached to an item's current stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProbability {
    #[serde(default)]
    pub probability: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub primary_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub primary_email: Option<String>,
    #[serde(default)]
    pub primary_phone: Option<String>,
}

/// A team member assigned to an item, also returned by the `users` query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub details: Option<UserDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl AssignedUser {
    /// Best available display label: full name, then username, then email.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.details
            .as_ref()
            .and_then(|d| d.full_name.clone())
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.username.clone())
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Pipeline-wide totals returned by `dealsTotalAmounts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalAmounts {
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub deal_count: i64,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub deal_amounts: Vec<CurrencyAmount>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub currency: String,
    pub amount: f64,
}

/// A conversation message exactly as the API sends it.
///
/// Variant payloads are optional and may overlap; see
/// [`crate::state::inbox::MessageKind`] for the resolved variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub internal: bool,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub form_widget_data: Option<serde_json::Value>,
    #[serde(default)]
    pub facebook_data: Option<serde_json::Value>,
    #[serde(default)]
    pub twitter_data: Option<serde_json::Value>,
    #[serde(default)]
    pub messenger_app_data: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,
}

/// Progress record of one import job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHistory {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub success: i64,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub failed: i64,
    #[serde(default, deserialize_with = "deserialize_i64_lenient")]
    pub total: i64,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_date")]
    pub date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default, deserialize_with = "deserialize_vec_or_null")]
    pub error_msgs: Vec<String>,
}

/// Body returned by the import upload endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

fn deserialize_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept integers, integral floats and numeric strings; `null` maps to 0.
fn deserialize_i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {raw:?}"))),
        _ => Err(D::Error::custom("expected number")),
    }
}

/// Amount maps arrive as `{currency: number}`; non-numeric entries are dropped.
fn deserialize_amounts<'de, D>(deserializer: D) -> Result<Amounts, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(Amounts::new()),
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(currency, amount)| amount.as_f64().map(|a| (currency, a)))
            .collect()),
        _ => Err(D::Error::custom("expected currency amount object")),
    }
}

fn deserialize_opt_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(raw) if raw.is_empty() => Ok(None),
        serde_json::Value::String(raw) => Ok(Some(raw)),
        serde_json::Value::Number(number) => Ok(Some(number.to_string())),
        _ => Err(D::Error::custom("expected date string or epoch milliseconds")),
    }
}
