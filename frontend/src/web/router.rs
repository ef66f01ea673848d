//! Router service
//!
//! Wraps the History API and drives the `current_route` signal. Every
//! navigation (explicit, back/forward, auth change) goes through
//! `route::resolve`, so the guard cannot be bypassed.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, Location, Resolved, Session, resolve};

/// Current path including the query string
fn current_full_path() -> String {
    web_sys::window()
        .map(|w| w.location())
        .map(|location| {
            let path = location.pathname().unwrap_or_else(|_| "/".to_string());
            let search = location.search().unwrap_or_default();
            format!("{path}{search}")
        })
        .unwrap_or_else(|| "/".to_string())
}

/// The address bar, parsed
pub fn current_location() -> Location {
    Location::parse(&current_full_path())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Used for redirects so the rejected URL does not stay in history
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// Injected by the app root so routing does not depend on the auth store
    session: Signal<Session>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let requested = current_full_path();
        let resolved = resolve(&requested, &session.get_untracked());
        if resolved.path != requested {
            replace_history_state(&resolved.path);
        }
        let (current_route, set_route) = signal(resolved.route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// Navigates to `path`, applying aliases and the auth guard.
    pub fn navigate(&self, path: &str) {
        let resolved = resolve(path, &self.session.get_untracked());
        if resolved.path != path {
            tracing::info!(
                requested = path,
                redirected = %resolved.path,
                "navigation redirected"
            );
        }
        self.commit(resolved, true);
    }

    fn commit(&self, resolved: Resolved, use_push: bool) {
        if use_push {
            push_history_state(&resolved.path);
        } else {
            replace_history_state(&resolved.path);
        }
        self.set_route.set(resolved.route);
    }

    /// Back/forward buttons
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let requested = current_full_path();
            let resolved = resolve(&requested, &router.session.get_untracked());
            if resolved.path != requested {
                replace_history_state(&resolved.path);
            }
            router.set_route.set(resolved.route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // the listener lives as long as the page
        closure.forget();
    }

    /// Re-checks the current page whenever the session changes
    /// (login elsewhere, forced logout after a failed profile fetch).
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let session = router.session.get();
            let requested = current_full_path();
            let resolved = resolve(&requested, &session);
            if resolved.path != requested {
                tracing::info!(
                    from = %requested,
                    to = %resolved.path,
                    authenticated = session.authenticated,
                    "session changed, redirecting"
                );
                router.commit(resolved, true);
            }
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

/// Provides the router; place it at the application root.
#[component]
pub fn Router(
    /// Guard input derived from the auth store
    session: Signal<Session>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// Renders the view matching the current route.
#[component]
pub fn RouterOutlet(
    /// Maps a route to its view
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// In-app link that navigates through the router.
#[component]
pub fn Link(
    #[prop(into)] to: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to on:click=on_click>
            {children()}
        </a>
    }
}
