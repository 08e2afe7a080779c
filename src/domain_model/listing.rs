use serde::Deserialize;

/// A list endpoint answers either with a bare array or, when pagination is
/// enabled on the backend, with an envelope around `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paginated {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paginated { results, .. } => results,
            Listing::Plain(items) => items,
        }
    }
}

/// Reference to another resource, either as a bare primary key or as an
/// embedded summary object.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related {
    Id(i64),
    Summary(RelatedSummary),
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct RelatedSummary {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl Related {
    pub fn id(&self) -> i64 {
        match self {
            Related::Id(id) => *id,
            Related::Summary(summary) => summary.id,
        }
    }
}
