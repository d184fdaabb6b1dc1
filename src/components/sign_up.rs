use leptos::ev::SubmitEvent;
use leptos::logging::{error, log, warn};
use leptos::*;
use leptos_router::*;

use crate::app::use_api;
use crate::models::user::UserProfile;
use crate::validation::{validate_sign_up_form, FormErrors};

/// One labelled input bound to a string signal, with its error line.
#[component]
fn Field(
    label: &'static str,
    name: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    value: RwSignal<String>,
    errors: ReadSignal<FormErrors>,
) -> impl IntoView {
    view! {
        <label class="field">
            { label }
            <input
                type=input_type
                name=name
                prop:value=move || value.get()
                on:input=move |e| value.set(event_target_value(&e))
            />
            <span class="error">{ move || errors.get().message(name) }</span>
        </label>
    }
}

#[component]
pub fn SignUp() -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let username = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let first_name = create_rw_signal(String::new());
    let last_name = create_rw_signal(String::new());
    let phone_number = create_rw_signal(String::new());
    let date_of_birth = create_rw_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (failure, set_failure) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let profile = UserProfile {
            username: username.get().trim().to_string(),
            password: password.get(),
            email: email.get().trim().to_string(),
            first_name: first_name.get().trim().to_string(),
            last_name: last_name.get().trim().to_string(),
            phone_number: phone_number.get().trim().to_string(),
            date_of_birth: date_of_birth.get().trim().to_string(),
        };
        let found = validate_sign_up_form(&profile, chrono::Utc::now().date_naive());
        if !found.is_empty() {
            warn!("[SIGN-UP] Form is invalid ({} problems)", found.len());
            set_errors.set(found);
            return;
        }
        set_errors.set(FormErrors::default());
        set_failure.set(None);
        set_submitting.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api.register(&profile).await {
                Ok(()) => {
                    log!("[SIGN-UP] Registered {}", profile.username);
                    navigate("/login", Default::default());
                }
                Err(e) => {
                    error!("[SIGN-UP] Registration error: {}", e);
                    set_failure.set(Some(e.user_message("register")));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="sign-up-container">
            <h1>{ "Create an account" }</h1>
            <form on:submit=on_submit>
                <Field label="Username" name="username" value=username errors=errors/>
                <Field label="Password" name="password" input_type="password" value=password errors=errors/>
                <Field label="Email" name="email" input_type="email" value=email errors=errors/>
                <Field label="First name" name="firstName" value=first_name errors=errors/>
                <Field label="Last name" name="lastName" value=last_name errors=errors/>
                <Field label="Phone number" name="phoneNumber" input_type="tel" value=phone_number errors=errors/>
                <Field label="Date of birth" name="dateOfBirth" input_type="date" value=date_of_birth errors=errors/>
                <button type="submit" disabled=move || submitting.get()>{ "Sign up" }</button>
                {move || failure.get().map(|f| view! { <p class="error">{ f }</p> })}
            </form>
            <p>{ "Already registered? " }<A href="/login">{ "Login" }</A></p>
        </section>
    }
}
