use leptos::*;

use crate::media::{format_price, full_name};
use crate::models::listing::ServicePreview;

const PLACEHOLDER_IMAGE: &str = "assets/images/placeholder-service.jpg";

#[component]
pub fn ServiceCard(service: ServicePreview, on_open: Callback<i64>) -> impl IntoView {
    let id = service.id;
    let picture = service
        .main_picture
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    view! {
        <article class="service-card" on:click=move |_| on_open.call(id)>
            <img
                src=picture
                alt=service.title.clone()
                on:error=|e| {
                    let img: web_sys::HtmlImageElement = event_target(&e);
                    img.set_src(PLACEHOLDER_IMAGE);
                }
            />
            <h3>{ service.title }</h3>
            <span class="chip">{ service.service_category }</span>
            <p class="price">{ format_price(service.price) }</p>
            <p class="owner">{ full_name(&service.user) }</p>
        </article>
    }
}
