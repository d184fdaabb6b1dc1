use gloo_timers::future::sleep;
use leptos::*;
use leptos_router::*;
use std::time::Duration;

use crate::app::{use_api, use_auth};

const LOGOUT_NOTICE_MS: u64 = 3000;

/// Navigation bar shown above every page.
#[component]
pub fn TopBar() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();
    let (notice, set_notice) = create_signal(None::<String>);

    // A token can expire while the page is open; re-read it on every navigation.
    {
        let api = api.clone();
        let location = use_location();
        create_effect(move |_| {
            location.pathname.track();
            auth.sync(api.session());
        });
    }

    let logout = move |_| {
        api.session().logout();
        auth.sync(api.session());
        set_notice.set(Some("You have been logged out successfully".to_string()));
        spawn_local(async move {
            sleep(Duration::from_millis(LOGOUT_NOTICE_MS)).await;
            set_notice.set(None);
        });
        navigate("/login", Default::default());
    };

    view! {
        <header class="top-bar">
            <A href="/" class="brand">{ "Talent Finder" }</A>
            <nav>
                <Show
                    when=move || auth.logged_in.get()
                    fallback=|| view! {
                        <A href="/login">{ "Login" }</A>
                        <A href="/sign-up">{ "Sign up" }</A>
                    }
                >
                    <span class="user">{ move || auth.username.get().unwrap_or_default() }</span>
                    <A href="/create">{ "Create" }</A>
                    <button on:click=logout.clone()>{ "Logout" }</button>
                </Show>
            </nav>
            {move || notice.get().map(|text| view! {
                <div class="snackbar success-snackbar">
                    { text }
                    <button on:click=move |_| set_notice.set(None)>{ "Close" }</button>
                </div>
            })}
        </header>
    }
}
