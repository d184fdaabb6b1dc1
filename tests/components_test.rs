#![cfg(target_arch = "wasm32")]
// Run with: wasm-pack test --headless --firefox --features wasm-test

use leptos::*;
use talent_finder::components::image_picker::{ImagePicker, SelectedImage};
use talent_finder::components::reviews_list::ReviewsList;
use talent_finder::components::video_links::VideoLinkEditor;
use talent_finder::models::review::Review;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
    div.unchecked_into()
}

#[wasm_bindgen_test]
fn reviews_render_stars_and_authors() {
    let parent = container("reviews-test");
    let reviews = vec![Review {
        id: 1,
        rating: 3,
        description: "Arrived on time and did a great job".into(),
        author: "bob".into(),
    }];
    mount_to(parent.clone(), move || view! { <ReviewsList reviews=reviews.clone()/> });

    let text = parent.text_content().unwrap_or_default();
    assert!(text.contains("Reviews (1)"));
    assert!(text.contains("★★★☆☆"));
    assert!(text.contains("bob"));
    parent.remove();
}

#[wasm_bindgen_test]
fn empty_reviews_show_placeholder() {
    let parent = container("no-reviews-test");
    mount_to(parent.clone(), || view! { <ReviewsList reviews=vec![]/> });
    assert!(parent.text_content().unwrap_or_default().contains("No reviews yet."));
    parent.remove();
}

#[wasm_bindgen_test]
fn last_video_link_cannot_be_removed() {
    let parent = container("video-links-test");
    let links = create_rw_signal(vec![String::new()]);
    mount_to(parent.clone(), move || view! { <VideoLinkEditor links=links/> });

    let remove = parent
        .query_selector("li button")
        .unwrap()
        .unwrap()
        .unchecked_into::<web_sys::HtmlElement>();
    remove.click();
    assert_eq!(links.get_untracked().len(), 1);
    parent.remove();
}

#[wasm_bindgen_test]
fn cancelled_file_dialog_keeps_earlier_error() {
    let parent = container("image-picker-test");
    let images = create_rw_signal(Vec::<SelectedImage>::new());
    let (error, set_error) = create_signal(Some("Failed to load categories".to_string()));
    mount_to(parent.clone(), move || {
        view! { <ImagePicker images=images on_error={move |e: String| set_error.set(Some(e))}/> }
    });

    let input = parent
        .query_selector("input[type=file]")
        .unwrap()
        .unwrap();
    let change = web_sys::Event::new("change").unwrap();
    input.dispatch_event(&change).unwrap();

    assert_eq!(
        error.get_untracked().as_deref(),
        Some("Failed to load categories")
    );
    assert!(images.get_untracked().is_empty());
    parent.remove();
}
