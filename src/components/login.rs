use leptos::ev::SubmitEvent;
use leptos::logging::{error, log};
use leptos::*;
use leptos_router::*;

use crate::app::{use_api, use_auth};
use crate::error::ApiError;
use crate::models::user::LoginRequest;
use crate::validation::{validate_login_form, FormErrors};

#[component]
pub fn Login() -> impl IntoView {
    let api = use_api();
    let auth = use_auth();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (failure, set_failure) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_login = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = LoginRequest {
            username: username.get().trim().to_string(),
            password: password.get(),
        };
        let found = validate_login_form(&request);
        if !found.is_empty() {
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_failure.set(None);
        set_submitting.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.login(&request).await {
                Ok(_) => {
                    log!("[LOGIN] Logged in as {}", request.username);
                    auth.sync(api.session());
                    navigate("/", Default::default());
                }
                Err(e) => {
                    error!("[LOGIN] Login failed: {}", e);
                    let message = match e {
                        ApiError::Unauthorized => "Invalid username or password".to_string(),
                        other => other.user_message("log in"),
                    };
                    set_failure.set(Some(message));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="login-container">
            <h1>{ "Login" }</h1>
            <form on:submit=on_login>
                <input
                    type="text"
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |e| set_username.set(event_target_value(&e))
                />
                <span class="error">{ move || errors.get().message("username") }</span>
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |e| set_password.set(event_target_value(&e))
                />
                <span class="error">{ move || errors.get().message("password") }</span>
                <button type="submit" disabled=move || submitting.get()>{ "Login" }</button>
                {move || failure.get().map(|f| view! { <p class="error">{ f }</p> })}
            </form>
            <p>{ "No account yet? " }<A href="/sign-up">{ "Sign up" }</A></p>
        </section>
    }
}
