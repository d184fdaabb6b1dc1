// src/models/review.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub rating: u8,          // 1..=5
    pub description: String,
    pub author: String,      // username of the reviewer
}

/// Body posted when a logged-in user reviews a listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub rating: u8,
    pub description: String,
    pub service_id: i64,
}
