//! Form validation for the sign-up, login, filter, create-listing and review
//! forms, plus the image picker rules.
//!
//! Each `validate_*_form` returns a [`FormErrors`] collection so pages can show
//! the first problem next to each field; an empty collection means the form
//! may be submitted.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::models::listing::SearchCriteria;
use crate::models::user::{LoginRequest, UserProfile};

pub const MAX_IMAGES: usize = 5;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];
pub const MIN_PRICE: f64 = 0.01;

lazy_static! {
    /// Watch or short-link YouTube URLs with an optional trailing query pair
    static ref YOUTUBE_LINK_REGEX: Regex = Regex::new(
        r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/)[A-Za-z0-9_-]+(&[A-Za-z0-9_=]*)?$"
    ).unwrap();

    /// Loose email shape: something@something.tld
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

/// One reason a field was rejected. The `Display` text is what the form shows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} must not exceed {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must be greater than {min}")]
    BelowMinimum { field: &'static str, min: f64 },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: u8, max: u8 },
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid date (YYYY-MM-DD) that is not in the future")]
    InvalidDate,
    #[error("Please enter a valid YouTube URL")]
    InvalidVideoLink,
    #[error("Minimum price cannot exceed maximum price")]
    PriceRange,
    #[error("Only JPEG, PNG, and JPG files are allowed")]
    UnsupportedImageType,
    #[error("File size must be less than 5MB")]
    ImageTooLarge,
    #[error("Please select at least one image")]
    NoImages,
}

/// Field-keyed validation results, in the order they were found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors(Vec<(&'static str, ValidationError)>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, field: &'static str, error: ValidationError) {
        self.0.push((field, error));
    }

    fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(e) = result {
            self.push(field, e);
        }
    }

    /// First error recorded for `field`.
    pub fn field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|(name, _)| *name == field).map(|(_, e)| e)
    }

    /// Message for `field`, or an empty string when it is fine.
    pub fn message(&self, field: &str) -> String {
        self.field(field).map(ToString::to_string).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, ValidationError)> {
        self.0.iter()
    }

    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub fn validate_required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

/// Required text with a character-count window.
pub fn validate_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: Option<usize>,
) -> Result<(), ValidationError> {
    validate_required(field, value)?;
    let count = value.chars().count();
    if count < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if let Some(max) = max {
        if count > max {
            return Err(ValidationError::TooLong { field, max });
        }
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    validate_required("email", email)?;
    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Optional ISO date that must not lie after `today`.
pub fn validate_birth_date(value: &str, today: NaiveDate) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) if date <= today => Ok(()),
        _ => Err(ValidationError::InvalidDate),
    }
}

/// Blank links are allowed (they are dropped on submit); anything else must
/// look like a YouTube watch or short link.
pub fn validate_video_link(link: &str) -> Result<(), ValidationError> {
    let link = link.trim();
    if link.is_empty() || YOUTUBE_LINK_REGEX.is_match(link) {
        Ok(())
    } else {
        Err(ValidationError::InvalidVideoLink)
    }
}

/// Parses a required price and checks it against [`MIN_PRICE`].
pub fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    validate_required(field, raw)?;
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotANumber(field))?;
    if !price.is_finite() || price < MIN_PRICE {
        return Err(ValidationError::BelowMinimum { field, min: MIN_PRICE });
    }
    Ok(price)
}

/// Parses an optional, non-negative filter bound. Blank input means unset.
pub fn parse_price_bound(field: &'static str, raw: &str) -> Result<Option<f64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(|_| ValidationError::NotANumber(field))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::BelowMinimum { field, min: 0.0 });
    }
    Ok(Some(value))
}

pub fn validate_price_range(min: Option<f64>, max: Option<f64>) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::PriceRange),
        _ => Ok(()),
    }
}

pub fn validate_sign_up_form(profile: &UserProfile, today: NaiveDate) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.check("username", validate_required("username", &profile.username));
    errors.check("password", validate_length("password", &profile.password, 6, None));
    errors.check("email", validate_email(&profile.email));
    errors.check("firstName", validate_required("firstName", &profile.first_name));
    errors.check("lastName", validate_required("lastName", &profile.last_name));
    errors.check("phoneNumber", validate_required("phoneNumber", &profile.phone_number));
    errors.check("dateOfBirth", validate_birth_date(&profile.date_of_birth, today));
    errors
}

pub fn validate_login_form(request: &LoginRequest) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.check("username", validate_required("username", &request.username));
    errors.check("password", validate_required("password", &request.password));
    errors
}

/// Raw values of the listing filter form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterInput {
    pub title: String,
    pub service_category: String,
    pub location: String,
    pub min_price: String,
    pub max_price: String,
}

/// Turns the filter form into search criteria, refusing a min price above
/// the max price.
pub fn build_search_criteria(input: &FilterInput) -> Result<SearchCriteria, FormErrors> {
    let mut errors = FormErrors::default();
    let min_price = parse_price_bound("minPrice", &input.min_price)
        .map_err(|e| errors.push("minPrice", e))
        .ok()
        .flatten();
    let max_price = parse_price_bound("maxPrice", &input.max_price)
        .map_err(|e| errors.push("maxPrice", e))
        .ok()
        .flatten();
    errors.check("minPrice", validate_price_range(min_price, max_price));
    errors.into_result()?;

    let non_blank = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    Ok(SearchCriteria {
        title: non_blank(&input.title),
        service_category: non_blank(&input.service_category),
        location: non_blank(&input.location),
        min_price,
        max_price,
    })
}

/// Raw values of the create-listing form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFormInput {
    pub title: String,
    pub description: String,
    pub price: String,
    pub service_category: String,
    pub location: String,
    pub video_links: Vec<String>,
}

/// Field rules for the create-listing form. Images and login state are
/// checked separately at submit time.
pub fn validate_service_form(input: &ServiceFormInput) -> FormErrors {
    let mut errors = FormErrors::default();
    errors.check("title", validate_length("title", &input.title, 3, Some(100)));
    errors.check(
        "description",
        validate_length("description", &input.description, 10, Some(1000)),
    );
    errors.check("price", parse_price("price", &input.price).map(|_| ()));
    errors.check(
        "serviceCategory",
        validate_required("serviceCategory", &input.service_category),
    );
    errors.check("location", validate_required("location", &input.location));
    for link in &input.video_links {
        errors.check("videoLinks", validate_video_link(link));
    }
    errors
}

pub fn validate_review_form(rating: u8, description: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    if !(1..=5).contains(&rating) {
        errors.push(
            "rating",
            ValidationError::OutOfRange { field: "rating", min: 1, max: 5 },
        );
    }
    errors.check("description", validate_length("description", description, 10, None));
    errors
}

/// What the picker needs to know about a candidate file.
pub trait ImageFile {
    fn mime_type(&self) -> String;
    fn size_bytes(&self) -> u64;
}

impl ImageFile for web_sys::File {
    fn mime_type(&self) -> String {
        self.type_()
    }

    fn size_bytes(&self) -> u64 {
        self.size() as u64
    }
}

/// Result of offering a batch of files to the image picker.
#[derive(Debug)]
pub struct ImageSelection<F> {
    pub accepted: Vec<F>,
    /// Last rejection reason, if any file was dropped.
    pub error: Option<ValidationError>,
}

/// Keeps at most [`MAX_IMAGES`] of the offered files, dropping any that are
/// not JPEG/PNG or exceed [`MAX_IMAGE_BYTES`]. Files past the cap are ignored
/// without an error.
pub fn select_images<F: ImageFile>(files: impl IntoIterator<Item = F>) -> ImageSelection<F> {
    let mut selection = ImageSelection {
        accepted: Vec::new(),
        error: None,
    };
    for file in files.into_iter().take(MAX_IMAGES) {
        if !ALLOWED_IMAGE_TYPES.contains(&file.mime_type().as_str()) {
            selection.error = Some(ValidationError::UnsupportedImageType);
            continue;
        }
        if file.size_bytes() > MAX_IMAGE_BYTES {
            selection.error = Some(ValidationError::ImageTooLarge);
            continue;
        }
        selection.accepted.push(file);
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        name: &'static str,
        mime: &'static str,
        size: u64,
    }

    impl ImageFile for FakeFile {
        fn mime_type(&self) -> String {
            self.mime.to_string()
        }

        fn size_bytes(&self) -> u64 {
            self.size
        }
    }

    fn png(name: &'static str) -> FakeFile {
        FakeFile { name, mime: "image/png", size: 1024 }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn filter_rejects_min_above_max() {
        let input = FilterInput {
            min_price: "50".into(),
            max_price: "10".into(),
            ..Default::default()
        };
        let errors = build_search_criteria(&input).unwrap_err();
        assert_eq!(errors.field("minPrice"), Some(&ValidationError::PriceRange));
    }

    #[test]
    fn filter_accepts_equal_bounds_and_blank_fields() {
        let input = FilterInput {
            title: "  ".into(),
            location: "Porto".into(),
            min_price: "10".into(),
            max_price: "10".into(),
            ..Default::default()
        };
        let criteria = build_search_criteria(&input).unwrap();
        assert_eq!(criteria.title, None);
        assert_eq!(criteria.location.as_deref(), Some("Porto"));
        assert_eq!(criteria.min_price, Some(10.0));
        assert_eq!(criteria.max_price, Some(10.0));
    }

    #[test]
    fn filter_rejects_garbage_and_negative_bounds() {
        let input = FilterInput {
            min_price: "cheap".into(),
            max_price: "-3".into(),
            ..Default::default()
        };
        let errors = build_search_criteria(&input).unwrap_err();
        assert_eq!(
            errors.field("minPrice"),
            Some(&ValidationError::NotANumber("minPrice"))
        );
        assert!(matches!(
            errors.field("maxPrice"),
            Some(ValidationError::BelowMinimum { .. })
        ));
    }

    #[test]
    fn picker_drops_wrong_types_and_large_files() {
        let files = vec![
            png("a.png"),
            FakeFile { name: "b.gif", mime: "image/gif", size: 10 },
            FakeFile { name: "c.jpg", mime: "image/jpeg", size: MAX_IMAGE_BYTES + 1 },
            FakeFile { name: "d.jpg", mime: "image/jpg", size: MAX_IMAGE_BYTES },
        ];
        let selection = select_images(files);
        let names: Vec<_> = selection.accepted.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["a.png", "d.jpg"]);
        assert_eq!(selection.error, Some(ValidationError::ImageTooLarge));
    }

    #[test]
    fn picker_caps_at_five() {
        let files = vec![
            png("1"), png("2"), png("3"), png("4"), png("5"), png("6"), png("7"),
        ];
        let selection = select_images(files);
        assert_eq!(selection.accepted.len(), MAX_IMAGES);
        assert_eq!(selection.accepted.last().unwrap().name, "5");
        assert!(selection.error.is_none());
    }

    #[test]
    fn sign_up_reports_each_bad_field() {
        let profile = UserProfile {
            username: "ana".into(),
            password: "12345".into(),
            email: "ana.example.com".into(),
            first_name: "Ana".into(),
            last_name: String::new(),
            phone_number: "+351 900 000 000".into(),
            date_of_birth: "2030-01-01".into(),
        };
        let errors = validate_sign_up_form(&profile, today());
        assert_eq!(errors.message("password"), "password must be at least 6 characters");
        assert_eq!(errors.field("email"), Some(&ValidationError::InvalidEmail));
        assert_eq!(errors.message("lastName"), "lastName is required");
        assert_eq!(errors.field("dateOfBirth"), Some(&ValidationError::InvalidDate));
        assert!(errors.field("username").is_none());
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn login_requires_both_fields() {
        let errors = validate_login_form(&LoginRequest {
            username: "ana".into(),
            password: " ".into(),
        });
        assert_eq!(errors.message("password"), "password is required");
        assert!(errors.field("username").is_none());
    }

    #[test]
    fn service_form_rules() {
        let input = ServiceFormInput {
            title: "ab".into(),
            description: "x".repeat(1001),
            price: "0".into(),
            service_category: "Cleaning".into(),
            location: String::new(),
            video_links: vec![
                String::new(),
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ".into(),
                "https://vimeo.com/123".into(),
            ],
        };
        let errors = validate_service_form(&input);
        assert_eq!(errors.message("title"), "title must be at least 3 characters");
        assert_eq!(
            errors.message("description"),
            "description must not exceed 1000 characters"
        );
        assert_eq!(errors.message("price"), "price must be greater than 0.01");
        assert_eq!(errors.message("location"), "location is required");
        assert_eq!(errors.message("videoLinks"), "Please enter a valid YouTube URL");
        assert!(errors.field("serviceCategory").is_none());
    }

    #[test]
    fn youtube_link_shapes() {
        assert!(validate_video_link("youtu.be/abc_DEF-1").is_ok());
        assert!(validate_video_link("http://youtube.com/watch?v=abc&t=10").is_ok());
        assert!(validate_video_link("https://www.youtube.com/embed/abc").is_err());
    }

    #[test]
    fn video_ids_are_ascii_only() {
        assert_eq!(
            validate_video_link("https://youtu.be/ñandú"),
            Err(ValidationError::InvalidVideoLink)
        );
        assert_eq!(
            validate_video_link("https://www.youtube.com/watch?v=abc&t=é"),
            Err(ValidationError::InvalidVideoLink)
        );
    }

    #[test]
    fn review_rules() {
        assert!(validate_review_form(5, "Great service overall").is_empty());
        let errors = validate_review_form(0, "meh");
        assert!(matches!(errors.field("rating"), Some(ValidationError::OutOfRange { .. })));
        assert_eq!(
            errors.message("description"),
            "description must be at least 10 characters"
        );
    }
}
