use super::Slug;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organizer as returned by detail and list endpoints. List responses carry
/// only a subset of fields, so everything past the identity is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organizer {
    pub id: i64,
    pub name: String,
    pub slug: Slug,
    #[serde(default)]
    pub organizer_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub activities_count: Option<u64>,
    #[serde(default)]
    pub upcoming_activities_count: Option<u64>,
    #[serde(default)]
    pub total_views: Option<u64>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizerDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizer_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
