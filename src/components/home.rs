/// Landing page: the grid of all listings with a filter form on top.
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::*;

use crate::app::use_api;
use crate::components::filter_form::FilterForm;
use crate::components::service_card::ServiceCard;
use crate::models::listing::{SearchCriteria, ServicePreview};
use crate::models::metadata::{Category, Location};
use crate::media::grid_columns;

#[component]
pub fn Home() -> impl IntoView {
    let api = use_api();
    let (services, set_services) = create_signal(Vec::<ServicePreview>::new());
    let (categories, set_categories) = create_signal(Vec::<Category>::new());
    let (locations, set_locations) = create_signal(Vec::<Location>::new());
    let (loading, set_loading) = create_signal(true);
    let (error_message, set_error_message) = create_signal(None::<String>);

    let load_all = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_loading.set(true);
            set_error_message.set(None);
            spawn_local(async move {
                match api.get_all_services().await {
                    Ok(data) => {
                        log!("[HOME] Loaded {} services", data.len());
                        set_services.set(data);
                    }
                    Err(e) => {
                        error!("[HOME] Error loading services: {}", e);
                        set_error_message.set(Some(e.user_message("load services")));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    let search = {
        let api = api.clone();
        move |criteria: SearchCriteria| {
            let api = api.clone();
            set_loading.set(true);
            set_error_message.set(None);
            spawn_local(async move {
                match api.get_by_criteria(&criteria).await {
                    Ok(data) => {
                        log!("[HOME] Filter matched {} services", data.len());
                        set_services.set(data);
                    }
                    Err(e) => {
                        error!("[HOME] Error filtering services: {}", e);
                        set_error_message.set(Some(e.user_message("filter services")));
                    }
                }
                set_loading.set(false);
            });
        }
    };

    // Filter options are optional; the grid still works without them.
    {
        let api = api.clone();
        spawn_local(async move {
            match futures::join!(api.get_categories(), api.get_locations()) {
                (Ok(c), Ok(l)) => {
                    set_categories.set(c);
                    set_locations.set(l);
                }
                (c, l) => {
                    if let Ok(c) = c {
                        set_categories.set(c);
                    }
                    if let Ok(l) = l {
                        set_locations.set(l);
                    }
                    error!("[HOME] Could not load all filter options");
                }
            }
        });
    }
    load_all();

    let navigate = use_navigate();
    let open_service = Callback::new(move |id: i64| {
        navigate(&format!("/service/{id}"), Default::default());
    });

    let columns = window()
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .map(grid_columns)
        .unwrap_or(4);

    view! {
        <section class="home">
            <FilterForm
                categories=categories
                locations=locations
                on_search=search
                on_reset={move |_: ()| load_all()}
            />
            {move || {
                if loading.get() {
                    view! { <div class="spinner">{ "Loading services..." }</div> }.into_view()
                } else if let Some(message) = error_message.get() {
                    view! { <div class="error">{ message }</div> }.into_view()
                } else if services.get().is_empty() {
                    view! { <p>{ "No services found." }</p> }.into_view()
                } else {
                    view! {
                        <div
                            class="service-grid"
                            style=format!("grid-template-columns: repeat({columns}, 1fr)")
                        >
                            <For
                                each=move || services.get()
                                key=|service| service.id
                                children=move |service| view! {
                                    <ServiceCard service=service on_open=open_service/>
                                }
                            />
                        </div>
                    }.into_view()
                }
            }}
        </section>
    }
}
