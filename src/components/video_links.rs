use leptos::*;

use crate::validation::validate_video_link;

/// Editable list of YouTube links. At least one (possibly blank) row stays.
#[component]
pub fn VideoLinkEditor(links: RwSignal<Vec<String>>) -> impl IntoView {
    let add_link = move |_| links.update(|l| l.push(String::new()));
    let remove_link = move |index: usize| {
        links.update(|l| {
            if l.len() > 1 && index < l.len() {
                l.remove(index);
            }
        })
    };

    view! {
        <div class="video-links">
            <h3>{ "Video links" }</h3>
            <ul>
                {move || links.get().into_iter().enumerate().map(|(index, link)| {
                    let error = validate_video_link(&link).err().map(|e| e.to_string());
                    view! {
                        <li>
                            <input
                                placeholder="https://www.youtube.com/watch?v=..."
                                value=link
                                on:change=move |e| {
                                    let value = event_target_value(&e);
                                    links.update(|l| {
                                        if let Some(slot) = l.get_mut(index) {
                                            *slot = value;
                                        }
                                    });
                                }
                            />
                            <button
                                type="button"
                                disabled=move || links.with(|l| l.len() <= 1)
                                on:click=move |_| remove_link(index)
                            >
                                { "Remove" }
                            </button>
                            {error.map(|e| view! { <span class="error">{ e }</span> })}
                        </li>
                    }
                }).collect::<Vec<_>>()}
            </ul>
            <button type="button" on:click=add_link>{ "Add video link" }</button>
        </div>
    }
}
