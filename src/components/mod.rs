pub mod create_service;
pub mod filter_form;
pub mod home;
pub mod image_picker;
pub mod login;
pub mod review_form;
pub mod reviews_list;
pub mod service_card;
pub mod service_detail;
pub mod sign_up;
pub mod top_bar;
pub mod video_links;
