use leptos::*;
use leptos::ev::SubmitEvent;

use crate::models::listing::SearchCriteria;
use crate::models::metadata::{Category, Location};
use crate::validation::{build_search_criteria, FilterInput};

/// Listing filter. Emits validated criteria on submit; a min price above the
/// max price keeps the form from submitting.
#[component]
pub fn FilterForm(
    categories: ReadSignal<Vec<Category>>,
    locations: ReadSignal<Vec<Location>>,
    #[prop(into)] on_search: Callback<SearchCriteria>,
    #[prop(into)] on_reset: Callback<()>,
) -> impl IntoView {
    let (title, set_title) = create_signal(String::new());
    let (category, set_category) = create_signal(String::new());
    let (location, set_location) = create_signal(String::new());
    let (min_price, set_min_price) = create_signal(String::new());
    let (max_price, set_max_price) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let input = FilterInput {
            title: title.get(),
            service_category: category.get(),
            location: location.get(),
            min_price: min_price.get(),
            max_price: max_price.get(),
        };
        match build_search_criteria(&input) {
            Ok(criteria) => {
                set_error.set(None);
                on_search.call(criteria);
            }
            Err(errors) => {
                let message = errors
                    .iter()
                    .map(|(_, e)| e.to_string())
                    .collect::<Vec<_>>()
                    .join(". ");
                set_error.set(Some(message));
            }
        }
    };

    let reset = move |_| {
        set_title.set(String::new());
        set_category.set(String::new());
        set_location.set(String::new());
        set_min_price.set(String::new());
        set_max_price.set(String::new());
        set_error.set(None);
        on_reset.call(());
    };

    view! {
        <form class="filter-form" on:submit=handle_submit>
            <input
                type="text"
                placeholder="Search by title"
                prop:value=move || title.get()
                on:input=move |e| set_title.set(event_target_value(&e))
            />
            <select on:change=move |e| set_category.set(event_target_value(&e)) prop:value=move || category.get()>
                <option value="">{ "All categories" }</option>
                {move || categories.get().into_iter().map(|c| view! {
                    <option value=c.name.clone()>{ c.name }</option>
                }).collect::<Vec<_>>()}
            </select>
            <select on:change=move |e| set_location.set(event_target_value(&e)) prop:value=move || location.get()>
                <option value="">{ "All locations" }</option>
                {move || locations.get().into_iter().map(|l| view! {
                    <option value=l.location_name.clone()>{ l.location_name }</option>
                }).collect::<Vec<_>>()}
            </select>
            <input
                type="number"
                min="0"
                step="0.01"
                placeholder="Min price"
                prop:value=move || min_price.get()
                on:input=move |e| set_min_price.set(event_target_value(&e))
            />
            <input
                type="number"
                min="0"
                step="0.01"
                placeholder="Max price"
                prop:value=move || max_price.get()
                on:input=move |e| set_max_price.set(event_target_value(&e))
            />
            <button type="submit">{ "Filter" }</button>
            <button type="button" on:click=reset>{ "Reset" }</button>
            {move || error.get().map(|e| view! { <p class="error">{ e }</p> })}
        </form>
    }
}
