use crate::theme::Theme;
use crate::use_app;
use crate::web::route::UserRoutes;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn SettingsPage(username: String) -> impl IntoView {
    let app = use_app();
    let router = use_router();
    let back = UserRoutes::new(&username).dashboard();

    let theme = move || app.read(|s| s.theme.theme());
    let email = move || app.read(|s| s.auth.user().map(|u| u.email).unwrap_or_default());

    let on_theme = move |ev| {
        if let Some(next) = Theme::parse(&event_target_value(&ev)) {
            app.state().theme.set_theme(next);
        }
    };

    let on_logout = move |_| {
        app.state().auth.logout();
        router.navigate("/");
    };

    let option = move |value: Theme, label: &'static str| {
        view! {
            <option value=value.as_str() selected=move || theme() == value>
                {label}
            </option>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-xl mx-auto card bg-base-100 shadow">
                <div class="card-body space-y-4">
                    <h2 class="card-title">"Ajustes"</h2>
                    <p class="text-sm opacity-70">{email}</p>
                    <label class="form-control">
                        <span class="label-text">"Tema"</span>
                        <select class="select select-bordered" on:change=on_theme>
                            {option(Theme::System, "Sistema")}
                            {option(Theme::Light, "Claro")}
                            {option(Theme::Dark, "Oscuro")}
                        </select>
                    </label>
                    <div class="card-actions justify-between">
                        <Link to=back>"Volver"</Link>
                        <button class="btn btn-outline btn-error" on:click=on_logout>
                            "Cerrar sesión"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
