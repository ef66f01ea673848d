use crate::components::alert::ErrorAlert;
use crate::use_app;
use crate::web::route::{LOGIN_PATH, REGISTER_PATH, UserRoutes};
use crate::web::router::{Link, current_location, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use merq_shared::{LoginRequest, SignupRole, UserCreate};

/// Where to go once signed in: the `redirect` query if it stays on this
/// site, the user's dashboard otherwise.
fn after_login(username: &str) -> String {
    current_location()
        .query_param("redirect")
        .filter(|target| target.starts_with('/') && !target.starts_with("//"))
        .unwrap_or_else(|| UserRoutes::new(username).dashboard())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let loading = move || app.read(|s| s.auth.loading());
    let error = Signal::derive(move || app.read(|s| s.auth.error()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let auth = app.state().auth;
        let credentials = LoginRequest {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        spawn_local(async move {
            if let Ok(user) = auth.login(&credentials).await {
                router.navigate(&after_login(&user.username));
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Iniciar sesión"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error />
                        <input
                            type="email"
                            placeholder="Email"
                            class="input input-bordered"
                            required
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Contraseña"
                            class="input input-bordered"
                            required
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button class="btn btn-primary mt-4" disabled=loading>
                            {move || if loading() { "Entrando..." } else { "Entrar" }}
                        </button>
                        <Link to=REGISTER_PATH>"Crear una cuenta"</Link>
                    </form>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (role, set_role) = signal(SignupRole::Student);

    let loading = move || app.read(|s| s.auth.loading());
    let error = Signal::derive(move || app.read(|s| s.auth.error()));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let auth = app.state().auth;
        let data = UserCreate {
            email: email.get_untracked(),
            username: username.get_untracked(),
            password: password.get_untracked(),
            full_name: full_name.get_untracked(),
            role: Some(role.get_untracked()),
        };
        spawn_local(async move {
            if let Ok(user) = auth.register(&data).await {
                router.navigate(&UserRoutes::new(&user.username).dashboard());
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">"Crear cuenta"</h1>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <ErrorAlert message=error />
                        <input
                            type="email"
                            placeholder="Email"
                            class="input input-bordered"
                            required
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Usuario"
                            class="input input-bordered"
                            required
                            prop:value=username
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                        />
                        <input
                            type="text"
                            placeholder="Nombre completo"
                            class="input input-bordered"
                            required
                            prop:value=full_name
                            on:input=move |ev| set_full_name.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Contraseña"
                            class="input input-bordered"
                            required
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <select
                            class="select select-bordered"
                            on:change=move |ev| {
                                let next = if event_target_value(&ev) == "teacher" {
                                    SignupRole::Teacher
                                } else {
                                    SignupRole::Student
                                };
                                set_role.set(next);
                            }
                        >
                            <option
                                value="student"
                                selected=move || role.get() == SignupRole::Student
                            >
                                "Estudiante"
                            </option>
                            <option
                                value="teacher"
                                selected=move || role.get() == SignupRole::Teacher
                            >
                                "Profesor"
                            </option>
                        </select>
                        <button class="btn btn-primary mt-4" disabled=loading>
                            "Registrarse"
                        </button>
                        <Link to=LOGIN_PATH>"Ya tengo una cuenta"</Link>
                    </form>
                </div>
            </div>
        </div>
    }
}
