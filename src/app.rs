/// Main application entry point for talent-finder.
/// Provides the API client and login state to every page and wires up the routes.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::api::ApiClient;
use crate::components::{
    create_service::CreateService, home::Home, login::Login, service_detail::ServiceDetail,
    sign_up::SignUp, top_bar::TopBar,
};
use crate::config::AppConfig;
use crate::session::Session;

/// Reactive mirror of the stored session, so the top bar and guarded pages
/// update on login and logout.
#[derive(Clone, Copy, Debug)]
pub struct AuthState {
    pub logged_in: RwSignal<bool>,
    pub username: RwSignal<Option<String>>,
}

impl AuthState {
    pub fn from_session(session: &Session) -> Self {
        Self {
            logged_in: create_rw_signal(session.is_logged_in()),
            username: create_rw_signal(session.username()),
        }
    }

    /// Re-reads the session after it changed.
    pub fn sync(&self, session: &Session) {
        self.logged_in.set(session.is_logged_in());
        self.username.set(session.username());
    }
}

pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
        .unwrap_or_else(|| ApiClient::new(&AppConfig::from_env(), Session::browser()))
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>().unwrap_or_else(|| AuthState::from_session(use_api().session()))
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = ApiClient::new(&AppConfig::from_env(), Session::browser());
    provide_context(AuthState::from_session(api.session()));
    provide_context(api);

    view! {
        <Title text="Talent Finder"/>
        <Router>
            <TopBar/>
            <main>
                <Routes>
                    <Route path="/" view=Home/>
                    <Route path="/login" view=Login/>
                    <Route path="/sign-up" view=SignUp/>
                    <Route path="/service/:id" view=ServiceDetail/>
                    <Route path="/create" view=CreateService/>
                </Routes>
            </main>
        </Router>
    }
}
