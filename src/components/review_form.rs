use leptos::logging::{error, log};
use leptos::*;
use leptos::ev::SubmitEvent;

use crate::app::use_api;
use crate::models::review::NewReview;
use crate::validation::{validate_review_form, FormErrors};

const DEFAULT_RATING: u8 = 5;

#[component]
pub fn ReviewForm(service_id: i64, #[prop(into)] on_submitted: Callback<()>) -> impl IntoView {
    let api = use_api();
    let (rating, set_rating) = create_signal(DEFAULT_RATING);
    let (description, set_description) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (submitting, set_submitting) = create_signal(false);
    let (failure, set_failure) = create_signal(None::<String>);

    let submit_review = move |ev: SubmitEvent| {
        ev.prevent_default();
        let found = validate_review_form(rating.get(), &description.get());
        if !found.is_empty() {
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_submitting.set(true);
        set_failure.set(None);

        let review = NewReview {
            rating: rating.get(),
            description: description.get().trim().to_string(),
            service_id,
        };
        let api = api.clone();
        spawn_local(async move {
            match api.submit_review(&review).await {
                Ok(()) => {
                    log!("[REVIEW] Submitted review for service {}", service_id);
                    set_rating.set(DEFAULT_RATING);
                    set_description.set(String::new());
                    on_submitted.call(());
                }
                Err(e) => {
                    error!("[REVIEW] Failed to submit review: {}", e);
                    set_failure.set(Some(e.user_message("submit review")));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="review-form" on:submit=submit_review>
            <h3>{ "Write a Review" }</h3>
            <label>
                { "Rating" }
                <select
                    prop:value=move || rating.get().to_string()
                    on:change=move |e| set_rating.set(event_target_value(&e).parse::<u8>().unwrap_or(DEFAULT_RATING))
                >
                    {(1..=5u8).map(|n| view! { <option value=n.to_string()>{ n }</option> }).collect::<Vec<_>>()}
                </select>
            </label>
            <span class="error">{ move || errors.get().message("rating") }</span>
            <textarea
                placeholder="Share your experience (at least 10 characters)"
                prop:value=move || description.get()
                on:input=move |e| set_description.set(event_target_value(&e))
            />
            <span class="error">{ move || errors.get().message("description") }</span>
            <button type="submit" disabled=move || submitting.get()>{ "Submit Review" }</button>
            {move || failure.get().map(|f| view! { <p class="error">{ f }</p> })}
        </form>
    }
}
