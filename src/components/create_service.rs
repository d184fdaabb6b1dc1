/// Form for publishing a new listing with images and YouTube links.
use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::*;

use crate::app::{use_api, use_auth};
use crate::components::image_picker::{ImagePicker, SelectedImage};
use crate::components::video_links::VideoLinkEditor;
use crate::models::listing::NewService;
use crate::models::metadata::{Category, Location};
use crate::validation::{
    parse_price, validate_service_form, FormErrors, ServiceFormInput, ValidationError,
};

#[component]
pub fn CreateService() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();

    let title = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let price = create_rw_signal(String::new());
    let category = create_rw_signal(String::new());
    let location = create_rw_signal(String::new());
    let video_links = create_rw_signal(vec![String::new()]);
    let images = create_rw_signal(Vec::<SelectedImage>::new());

    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    let (locations, set_locations) = create_signal(Vec::<Location>::new());
    let (loading, set_loading) = create_signal(true);
    let (submitting, set_submitting) = create_signal(false);
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (error_message, set_error_message) = create_signal(None::<String>);

    if !api.session().is_logged_in() {
        auth.sync(api.session());
        navigate("/login", Default::default());
    }

    {
        let api = api.clone();
        spawn_local(async move {
            let (loaded_categories, loaded_locations) =
                futures::join!(api.get_categories(), api.get_locations());
            match loaded_categories {
                Ok(data) => {
                    log!("[CREATE] Categories loaded: {}", data.len());
                    set_categories.set(data);
                }
                Err(e) => {
                    error!("[CREATE] Error loading categories: {}", e);
                    set_error_message.set(Some("Failed to load categories".to_string()));
                }
            }
            match loaded_locations {
                Ok(data) => {
                    log!("[CREATE] Locations loaded: {}", data.len());
                    set_locations.set(data);
                }
                Err(e) => {
                    error!("[CREATE] Error loading locations: {}", e);
                    set_error_message.set(Some("Failed to load locations".to_string()));
                }
            }
            set_loading.set(false);
        });
    }

    let on_submit = {
        let navigate = navigate.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let input = ServiceFormInput {
                title: title.get(),
                description: description.get(),
                price: price.get(),
                service_category: category.get(),
                location: location.get(),
                video_links: video_links.get(),
            };
            let found = validate_service_form(&input);
            if !found.is_empty() {
                set_errors.set(found);
                return;
            }
            set_errors.set(FormErrors::default());

            if !api.session().is_logged_in() {
                auth.sync(api.session());
                set_error_message.set(Some("You must be logged in to create a service".to_string()));
                navigate("/login", Default::default());
                return;
            }

            let files = images.with(|i| i.iter().map(|s| s.file.clone()).collect::<Vec<_>>());
            if files.is_empty() {
                set_error_message.set(Some(ValidationError::NoImages.to_string()));
                return;
            }

            let Ok(amount) = parse_price("price", &input.price) else {
                return;
            };
            let service = NewService {
                title: input.title.trim().to_string(),
                description: input.description.trim().to_string(),
                price: amount,
                service_category: input.service_category,
                location: input.location,
                username: api.session().username().unwrap_or_default(),
                video_links: input.video_links,
            };

            set_submitting.set(true);
            set_error_message.set(None);
            log!("[CREATE] Submitting service data to create endpoint...");

            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match api.create_service(&service, &files).await {
                    Ok(()) => {
                        log!("[CREATE] Service created successfully");
                        navigate("/", Default::default());
                    }
                    Err(e) => {
                        error!("[CREATE] Error creating service: {}", e);
                        set_error_message
                            .set(Some("Failed to create service. Please try again.".to_string()));
                        set_submitting.set(false);
                    }
                }
            });
        }
    };

    let on_cancel = move |_| navigate("/", Default::default());

    view! {
        <section class="create-service">
            <h1>{ "Create a service" }</h1>
            <Show when=move || loading.get()>
                <div class="spinner">{ "Loading form data..." }</div>
            </Show>
            <form on:submit=on_submit>
                <label>
                    { "Title" }
                    <input
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |e| title.set(event_target_value(&e))
                    />
                </label>
                <span class="error">{ move || errors.get().message("title") }</span>

                <label>
                    { "Description" }
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |e| description.set(event_target_value(&e))
                    />
                </label>
                <span class="error">{ move || errors.get().message("description") }</span>

                <label>
                    { "Price" }
                    <input
                        type="number"
                        min="0.01"
                        step="0.01"
                        prop:value=move || price.get()
                        on:input=move |e| price.set(event_target_value(&e))
                    />
                </label>
                <span class="error">{ move || errors.get().message("price") }</span>

                <label>
                    { "Category" }
                    <select
                        prop:value=move || category.get()
                        on:change=move |e| category.set(event_target_value(&e))
                    >
                        <option value="">{ "Select a category" }</option>
                        {move || categories.get().into_iter().map(|c| view! {
                            <option value=c.name.clone()>{ c.name }</option>
                        }).collect::<Vec<_>>()}
                    </select>
                </label>
                <span class="error">{ move || errors.get().message("serviceCategory") }</span>

                <label>
                    { "Location" }
                    <select
                        prop:value=move || location.get()
                        on:change=move |e| location.set(event_target_value(&e))
                    >
                        <option value="">{ "Select a location" }</option>
                        {move || locations.get().into_iter().map(|l| view! {
                            <option value=l.location_name.clone()>{ l.location_name }</option>
                        }).collect::<Vec<_>>()}
                    </select>
                </label>
                <span class="error">{ move || errors.get().message("location") }</span>

                <ImagePicker images=images on_error={move |e: String| set_error_message.set(Some(e))}/>
                <VideoLinkEditor links=video_links/>

                {move || error_message.get().map(|e| view! { <p class="error">{ e }</p> })}
                <div class="actions">
                    <button type="button" on:click=on_cancel>{ "Cancel" }</button>
                    <button type="submit" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Creating..." } else { "Create Service" }}
                    </button>
                </div>
            </form>
        </section>
    }
}
