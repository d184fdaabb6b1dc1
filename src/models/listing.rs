use serde::{Deserialize, Serialize};

use super::review::Review;
use super::user::PublicUserData;

/// Card-sized view of a listing, as returned by the list and search endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePreview {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub service_category: String,
    pub user: PublicUserData,
    #[serde(default)]
    pub main_picture: Option<String>,
}

/// Full listing shown on the detail page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub service_category: String,
    pub location: String,
    pub user: PublicUserData,
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Filter body for `POST /api/services/getByCriteria`. Unset fields are
/// left out of the JSON entirely.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// Text fields of the create-listing form. Images travel separately as
/// multipart file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewService {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub service_category: String,
    pub location: String,
    pub username: String,
    pub video_links: Vec<String>,
}

impl NewService {
    /// Video links with blank entries removed, as sent to the server.
    pub fn non_blank_video_links(&self) -> impl Iterator<Item = &str> {
        self.video_links
            .iter()
            .map(|link| link.trim())
            .filter(|link| !link.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_omits_unset_fields() {
        let criteria = SearchCriteria {
            service_category: Some("Plumbing".into()),
            max_price: Some(50.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "serviceCategory": "Plumbing", "maxPrice": 50.0 })
        );
    }

    #[test]
    fn detail_parses_backend_payload() {
        let payload = r#"{
            "id": 7,
            "title": "Garden care",
            "description": "Weekly lawn mowing and hedge trimming",
            "price": 25.5,
            "serviceCategory": "Gardening",
            "location": "Lisbon",
            "user": {"username": "ana", "email": "ana@example.com",
                     "firstName": "Ana", "lastName": "Silva", "dateOfBirth": "1990-02-01"},
            "pictures": ["http://img/1.png"],
            "videos": [],
            "reviews": [{"id": 1, "rating": 4, "description": "Very tidy work", "author": "bob"}]
        }"#;
        let detail: ServiceDetail = serde_json::from_str(payload).unwrap();
        assert_eq!(detail.service_category, "Gardening");
        assert_eq!(detail.reviews[0].rating, 4);
        assert_eq!(detail.user.first_name, "Ana");
    }

    #[test]
    fn blank_video_links_are_skipped() {
        let service = NewService {
            video_links: vec!["  ".into(), "https://youtu.be/abc".into(), String::new()],
            ..Default::default()
        };
        let links: Vec<_> = service.non_blank_video_links().collect();
        assert_eq!(links, vec!["https://youtu.be/abc"]);
    }
}
