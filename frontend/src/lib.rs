//! Merq web client
//!
//! Layers, leaves first:
//! - `web`: browser adapters (fetch transport, storage, console logging,
//!   history router) and the DOM-free route table
//! - `api`: typed wrappers over the REST backend
//! - `store`: caches with loading/error flags and async actions
//! - `state`: the single `AppState` holding every store
//! - `components`: page views

mod api;
mod components {
    mod alert;
    pub mod dashboard;
    pub mod login;
    pub mod roadmap;
    pub mod settings;
}
mod config;
mod error;
#[cfg(test)]
mod fixtures;
mod state;
mod store;
mod theme;
mod web;

pub use config::AppConfig;
pub use web::init_logging;

use crate::components::dashboard::DashboardPage;
use crate::components::login::{LoginPage, RegisterPage};
use crate::components::roadmap::{RoadmapCreatePage, RoadmapDetailPage};
use crate::components::settings::SettingsPage;
use crate::state::AppState;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet};

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use leptos::task::spawn_local;

// =========================================================
// Context
// =========================================================

/// Stores are plain `Rc` values; views reach them through this handle.
/// `version` ticks on every store change so reads can be tracked.
#[derive(Clone, Copy)]
pub struct AppContext {
    state: StoredValue<AppState, LocalStorage>,
    version: RwSignal<u64>,
}

impl AppContext {
    /// Tracked read: the calling effect or view reruns on store changes.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.version.track();
        self.state.with_value(f)
    }

    /// Handle for async actions; no tracking.
    pub fn state(&self) -> AppState {
        self.state.with_value(AppState::clone)
    }
}

pub fn use_app() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}

// =========================================================
// Root
// =========================================================

fn spinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! {
            <div class="hero min-h-screen bg-base-200">
                <div class="hero-content text-center">
                    <div class="max-w-md space-y-4">
                        <h1 class="text-5xl font-bold">"Merq"</h1>
                        <p>"Cursos y roadmaps de aprendizaje generados con IA."</p>
                        <Link to=crate::web::route::LOGIN_PATH>"Iniciar sesión"</Link>
                    </div>
                </div>
            </div>
        }
        .into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::UserDashboard { username } => {
            view! { <DashboardPage username=username /> }.into_any()
        }
        AppRoute::RoadmapCreate { username } => {
            view! { <RoadmapCreatePage username=username /> }.into_any()
        }
        AppRoute::RoadmapDetail {
            username,
            roadmap_id,
        } => view! { <RoadmapDetailPage username=username roadmap_id=roadmap_id /> }.into_any(),
        AppRoute::Settings { username } => view! { <SettingsPage username=username /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Página no encontrada"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let state = AppState::browser(config);
    web::theme::bind(&state.theme);

    // 1. bridge store notifications into the reactive graph
    let version = RwSignal::new(0u64);
    state.subscribe_all(move || version.update(|v| *v = v.wrapping_add(1)));
    let ctx = AppContext {
        state: StoredValue::new_local(state.clone()),
        version,
    };
    provide_context(ctx);

    // 2. resolve a remembered token before the guard sees the first route
    let ready = RwSignal::new(state.auth.token().is_none());
    if !ready.get_untracked() {
        let auth = state.auth.clone();
        spawn_local(async move {
            auth.fetch_current_user().await;
            ready.set(true);
        });
    }

    // 3. the router only sees the session, not the auth store
    let session = Signal::derive(move || ctx.read(|s| s.auth.session()));

    view! {
        <Show when=move || ready.get() fallback=spinner>
            <Router session=session>
                <RouterOutlet matcher=route_matcher />
            </Router>
        </Show>
    }
}
