use leptos::logging::log;
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlInputElement};

use crate::media::{create_preview_url, revoke_preview_url};
use crate::validation::{select_images, MAX_IMAGES};

/// A file chosen for upload together with its local preview URL.
#[derive(Clone, Debug)]
pub struct SelectedImage {
    pub file: File,
    pub preview: Option<String>,
}

fn release(images: &[SelectedImage]) {
    for url in images.iter().filter_map(|i| i.preview.as_deref()) {
        revoke_preview_url(url);
    }
}

/// Image chooser with previews. A new, non-empty selection replaces the
/// previous one; rejected files are reported through `on_error`.
#[component]
pub fn ImagePicker(
    images: RwSignal<Vec<SelectedImage>>,
    #[prop(into)] on_error: Callback<String>,
) -> impl IntoView {
    let on_change = move |ev: ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        // Cancelling the file dialog fires `change` with nothing selected
        let Some(list) = input.files().filter(|l| l.length() > 0) else {
            return;
        };
        let offered = (0..list.length()).filter_map(|i| list.get(i));
        let selection = select_images(offered);
        log!(
            "[IMAGES] {} of {} files accepted",
            selection.accepted.len(),
            list.length()
        );
        if let Some(e) = selection.error {
            on_error.call(e.to_string());
        }

        let chosen = selection
            .accepted
            .into_iter()
            .map(|file| SelectedImage {
                preview: create_preview_url(&file),
                file,
            })
            .collect::<Vec<_>>();
        images.update(|current| {
            release(current);
            *current = chosen;
        });
    };

    let remove_image = move |index: usize| {
        images.update(|current| {
            if index < current.len() {
                let removed = current.remove(index);
                release(std::slice::from_ref(&removed));
            }
        });
    };

    on_cleanup(move || images.with_untracked(|current| release(current)));

    view! {
        <div class="image-picker">
            <label>
                { format!("Images (JPEG or PNG, up to {MAX_IMAGES}, max 5MB each)") }
                <input
                    type="file"
                    accept="image/jpeg,image/png,image/jpg"
                    multiple=true
                    on:change=on_change
                />
            </label>
            <div class="previews">
                {move || images.get().into_iter().enumerate().map(|(index, image)| view! {
                    <figure>
                        {image.preview.map(|src| view! { <img src=src/> })}
                        <figcaption>{ image.file.name() }</figcaption>
                        <button type="button" on:click=move |_| remove_image(index)>{ "Remove" }</button>
                    </figure>
                }).collect::<Vec<_>>()}
            </div>
        </div>
    }
}
