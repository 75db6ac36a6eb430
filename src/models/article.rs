use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored article row. Articles are written once by the supplementation
/// pipeline and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub url: String,
    pub summary: String,
    pub query: String,
    pub tags: Vec<String>,
    pub retrieval_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub url: String,
    pub summary: String,
    pub query: String,
    pub tags: Vec<String>,
}
