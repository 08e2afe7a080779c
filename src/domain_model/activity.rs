use super::{Related, Slug};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Draft,
    Published,
    Cancelled,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Draft => "draft",
            ActivityStatus::Published => "published",
            ActivityStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ActivityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ActivityStatus::Draft),
            "published" => Ok(ActivityStatus::Published),
            "cancelled" => Ok(ActivityStatus::Cancelled),
            other => Err(format!("unknown activity status: {other}")),
        }
    }
}

/// An event listing. The backend has shipped two serializers, one with
/// `activity_`-prefixed field names; both shapes decode into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    #[serde(alias = "activity_name")]
    pub name: String,
    #[serde(alias = "activity_slug")]
    pub slug: Slug,
    #[serde(default, alias = "activity_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "activity_time")]
    pub time: Option<NaiveTime>,
    #[serde(default, alias = "activity_summary")]
    pub summary: Option<String>,
    #[serde(default, alias = "activity_description")]
    pub description: Option<String>,
    #[serde(default, alias = "activity_poster")]
    pub poster: Option<String>,
    #[serde(default, alias = "activity_price", deserialize_with = "decimal_string")]
    pub price: Option<String>,
    #[serde(default, alias = "activity_site")]
    pub website: Option<String>,
    pub status: ActivityStatus,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default)]
    pub organizer: Option<Related>,
    #[serde(default)]
    pub category: Option<Related>,
    #[serde(default)]
    pub days_until_event: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Activity {
    /// Free when no price is set or the price is zero.
    pub fn is_free(&self) -> bool {
        match &self.price {
            None => true,
            Some(price) => price.trim().parse::<f64>().map(|p| p == 0.0).unwrap_or(false),
        }
    }
}

// DRF renders decimals as strings by default, but a number is accepted too.
fn decimal_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected decimal string or number, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_name: Option<String>,
}

/// Extra picture attached to an activity, listed in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPhoto {
    pub id: i64,
    pub image: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Fields accepted when creating or partially updating an activity.
/// `category` and `organizer` are primary keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceFilter {
    Free,
    Paid,
}

/// Filters understood by the activity list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ActivityQuery {
    pub category: Option<String>,
    pub organizer: Option<String>,
    pub status: Option<ActivityStatus>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub when: Option<TimeFilter>,
    pub price: Option<PriceFilter>,
}

impl ActivityQuery {
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };
        push("category", self.category.clone());
        push("organizer", self.organizer.clone());
        push("status", self.status.map(|s| s.as_str().to_string()));
        push("search", self.search.clone());
        push("ordering", self.ordering.clone());
        push("date_from", self.date_from.map(|d| d.format("%Y-%m-%d").to_string()));
        push("date_to", self.date_to.map(|d| d.format("%Y-%m-%d").to_string()));
        push(
            "filter",
            self.when.map(|w| match w {
                TimeFilter::Upcoming => "upcoming".to_string(),
                TimeFilter::Past => "past".to_string(),
            }),
        );
        push(
            "price",
            self.price.map(|p| match p {
                PriceFilter::Free => "free".to_string(),
                PriceFilter::Paid => "paid".to_string(),
            }),
        );
        pairs
    }
}
