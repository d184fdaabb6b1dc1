use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{error, log};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::{File, FormData};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::listing::{NewService, SearchCriteria, ServiceDetail, ServicePreview};
use crate::models::metadata::{Category, Location};
use crate::models::review::NewReview;
use crate::models::user::{LoginRequest, LoginResponse, UserProfile};
use crate::session::Session;

pub const SERVICES_ALL: &str = "/api/services/getAll";
pub const SERVICES_GET: &str = "/api/services/get";
pub const SERVICES_BY_CRITERIA: &str = "/api/services/getByCriteria";
pub const SERVICES_CREATE: &str = "/api/services/create";
pub const METADATA_CATEGORIES: &str = "/api/metadata/categories";
pub const METADATA_LOCATIONS: &str = "/api/metadata/locations";
pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const REVIEWS_CREATE: &str = "/api/reviews/create";

/// Client for the marketplace REST API. Every request goes through
/// [`ApiClient::authorize`], which adds the bearer token while the session is
/// valid.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Session) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_header() {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::get(&self.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::post(&self.endpoint(path)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        log!("[API] GET {}", path);
        let response = self.get(path).send().await.map_err(ApiError::from)?;
        read_json(path, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        log!("[API] POST {}", path);
        let response = self.post(path).json(body)?.send().await?;
        read_json(path, response).await
    }

    /// POST whose response body is not needed.
    async fn post_json_ignore<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        log!("[API] POST {}", path);
        let response = self.post(path).json(body)?.send().await?;
        ensure_success(path, response).await.map(|_| ())
    }

    pub async fn get_all_services(&self) -> Result<Vec<ServicePreview>, ApiError> {
        self.get_json(SERVICES_ALL).await
    }

    pub async fn get_service(&self, id: &str) -> Result<ServiceDetail, ApiError> {
        let path = format!("{SERVICES_GET}/{}", urlencoding::encode(id));
        self.get_json(&path).await
    }

    pub async fn get_by_criteria(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<ServicePreview>, ApiError> {
        self.post_json(SERVICES_BY_CRITERIA, criteria).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(METADATA_CATEGORIES).await
    }

    pub async fn get_locations(&self) -> Result<Vec<Location>, ApiError> {
        self.get_json(METADATA_LOCATIONS).await
    }

    pub async fn register(&self, profile: &UserProfile) -> Result<(), ApiError> {
        self.post_json_ignore(AUTH_REGISTER, profile).await
    }

    /// Logs in and keeps the returned token in the session.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.post_json(AUTH_LOGIN, request).await?;
        self.session
            .store_token(&response.token)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(response)
    }

    pub async fn submit_review(&self, review: &NewReview) -> Result<(), ApiError> {
        self.post_json_ignore(REVIEWS_CREATE, review).await
    }

    /// Multipart upload of a new listing with its images.
    pub async fn create_service(&self, service: &NewService, images: &[File]) -> Result<(), ApiError> {
        let form = build_service_form(service, images)?;
        log!(
            "[API] POST {} ({} images, {} video links)",
            SERVICES_CREATE,
            images.len(),
            service.non_blank_video_links().count()
        );
        // No content-type header: the browser adds the multipart boundary.
        let response = self.post(SERVICES_CREATE).body(form)?.send().await?;
        ensure_success(SERVICES_CREATE, response).await.map(|_| ())
    }
}

/// Text parts of the create-listing form, in upload order. Each video link
/// is its own `videoLinks` part.
pub fn service_form_fields(service: &NewService) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("title", service.title.clone()),
        ("description", service.description.clone()),
        ("price", service.price.to_string()),
        ("serviceCategory", service.service_category.clone()),
        ("location", service.location.clone()),
        ("username", service.username.clone()),
    ];
    fields.extend(
        service
            .non_blank_video_links()
            .map(|link| ("videoLinks", link.to_string())),
    );
    fields
}

fn build_service_form(service: &NewService, images: &[File]) -> Result<FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Request(format!("{e:?}"));
    let form = FormData::new().map_err(js_err)?;
    for (name, value) in service_form_fields(service) {
        form.append_with_str(name, &value).map_err(js_err)?;
    }
    for image in images {
        form.append_with_blob_and_filename("images", image, &image.name())
            .map_err(js_err)?;
    }
    Ok(form)
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    error!("[API ERROR] {} returned {}: {}", path, status, message);
    Err(ApiError::from_status(status, message))
}

async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let response = ensure_success(path, response).await?;
    response.json::<T>().await.map_err(|e| {
        error!("[API ERROR] {} sent an unexpected body: {:?}", path, e);
        ApiError::Decode(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{make_token, test_session, NOW};

    fn client() -> ApiClient {
        ApiClient::new(&AppConfig::with_base_url("http://api.test/"), test_session())
    }

    #[test]
    fn endpoints_join_without_double_slash() {
        let api = client();
        assert_eq!(api.endpoint(SERVICES_ALL), "http://api.test/api/services/getAll");
        assert_eq!(api.endpoint("api/x"), "http://api.test/api/x");
    }

    #[test]
    fn bearer_only_for_live_tokens() {
        let api = client();
        assert_eq!(api.session().bearer_header(), None);

        let token = make_token(&format!(r#"{{"exp":{},"sub":"ana"}}"#, NOW + 60));
        api.session().store_token(&token).unwrap();
        assert_eq!(api.session().bearer_header(), Some(format!("Bearer {token}")));
    }

    #[test]
    fn multipart_fields_follow_form_order() {
        let service = NewService {
            title: "Piano lessons".into(),
            description: "Beginner friendly piano lessons".into(),
            price: 30.0,
            service_category: "Music".into(),
            location: "Braga".into(),
            username: "ana".into(),
            video_links: vec!["".into(), " https://youtu.be/x1 ".into()],
        };
        let fields = service_form_fields(&service);
        let names: Vec<_> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["title", "description", "price", "serviceCategory", "location", "username", "videoLinks"]
        );
        assert_eq!(fields[2].1, "30");
        assert_eq!(fields[6].1, "https://youtu.be/x1");
    }
}
