/// Detail page for one listing: gallery, videos, reviews and the review form.
use leptos::logging::error;
use leptos::*;
use leptos_router::*;

use crate::app::{use_api, use_auth};
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::media::{format_price, full_name, youtube_embed_url};
use crate::models::listing::ServiceDetail as Listing;

#[component]
pub fn ServiceDetail() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let params = use_params_map();
    let navigate = use_navigate();

    let (service, set_service) = create_signal(None::<Listing>);
    let (loading, set_loading) = create_signal(true);
    let (error_message, set_error_message) = create_signal(None::<String>);
    let (selected_image, set_selected_image) = create_signal(0usize);

    let service_id = move || {
        params.with_untracked(|p| p.get("id").cloned())
            .filter(|id| !id.trim().is_empty())
    };

    let load_service = move || {
        let Some(id) = service_id() else {
            set_error_message.set(Some("Invalid service ID".to_string()));
            set_loading.set(false);
            return;
        };
        let api = api.clone();
        set_loading.set(true);
        set_error_message.set(None);
        spawn_local(async move {
            match api.get_service(&id).await {
                Ok(data) => {
                    set_selected_image.update(|i| {
                        if *i >= data.pictures.len() {
                            *i = 0;
                        }
                    });
                    set_service.set(Some(data));
                }
                Err(e) => {
                    error!("[DETAIL] Error loading service {}: {}", id, e);
                    set_error_message.set(Some(e.user_message("load service details")));
                }
            }
            set_loading.set(false);
        });
    };
    load_service();

    let go_back = move |_| navigate("/", Default::default());

    view! {
        <section class="service-detail">
            <button class="back" on:click=go_back>{ "← Back" }</button>
            {move || {
                if loading.get() {
                    return view! { <div class="spinner">{ "Loading..." }</div> }.into_view();
                }
                if let Some(message) = error_message.get() {
                    return view! { <div class="error">{ message }</div> }.into_view();
                }
                let Some(listing) = service.get() else {
                    return ().into_view();
                };
                let pictures = listing.pictures.clone();
                let main_picture = {
                    let pictures = pictures.clone();
                    move || pictures.get(selected_image.get()).cloned()
                };
                let listing_id = listing.id;
                let reload = load_service.clone();

                view! {
                    <h1>{ listing.title.clone() }</h1>
                    <div class="meta">
                        <span class="chip">{ listing.service_category.clone() }</span>
                        <span class="location">{ listing.location.clone() }</span>
                        <span class="price">{ format_price(listing.price) }</span>
                    </div>
                    <div class="gallery">
                        {move || main_picture().map(|src| view! { <img class="main-image" src=src/> })}
                        <div class="thumbnails">
                            {pictures.into_iter().enumerate().map(|(index, src)| view! {
                                <img
                                    src=src
                                    class:selected=move || selected_image.get() == index
                                    on:click=move |_| set_selected_image.set(index)
                                />
                            }).collect::<Vec<_>>()}
                        </div>
                    </div>
                    <p class="description">{ listing.description.clone() }</p>
                    <p class="owner">
                        { "Offered by " }{ full_name(&listing.user) }
                        { format!(" (@{})", listing.user.username) }
                    </p>
                    <div class="videos">
                        {listing.videos.iter().map(|url| view! {
                            <iframe
                                src=youtube_embed_url(url)
                                width="560"
                                height="315"
                                allowfullscreen=true
                            ></iframe>
                        }).collect::<Vec<_>>()}
                    </div>
                    <ReviewsList reviews=listing.reviews.clone()/>
                    <Show
                        when=move || auth.logged_in.get()
                        fallback=|| view! { <p>{ "Log in to leave a review." }</p> }
                    >
                        <ReviewForm service_id=listing_id on_submitted={
                            let reload = reload.clone();
                            move |_: ()| reload()
                        }/>
                    </Show>
                }.into_view()
            }}
        </section>
    }
}
