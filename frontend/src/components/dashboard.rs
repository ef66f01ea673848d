use crate::components::alert::ErrorAlert;
use crate::use_app;
use crate::web::route::UserRoutes;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use merq_shared::{Course, Id, Roadmap};

#[component]
pub fn DashboardPage(username: String) -> impl IntoView {
    let app = use_app();
    let routes = UserRoutes::new(&username);

    // only a change of user triggers a reload, not every store update
    let viewer = Memo::new(move |_| {
        app.read(|s| s.auth.user().map(|user| (user.id, user.is_teacher())))
    });
    Effect::new(move |_| {
        let Some((user_id, teacher)) = viewer.get() else {
            return;
        };
        let state = app.state();
        spawn_local(async move {
            state.roadmaps.fetch_my_roadmaps(user_id).await;
            if teacher {
                state.courses.fetch_my_courses(user_id).await;
            }
        });
    });

    let roadmaps = move || app.read(|s| s.roadmaps.with(|r| r.roadmaps.clone()));
    let courses = move || app.read(|s| s.courses.with(|c| c.courses.clone()));
    let is_teacher = move || app.read(|s| s.auth.is_teacher());
    let loading = move || app.read(|s| s.roadmaps.loading());
    let error = Signal::derive(move || app.read(|s| s.roadmaps.error()));

    let on_delete = move |id: Id| {
        let roadmaps = app.state().roadmaps;
        spawn_local(async move {
            // the store keeps the message for the alert
            let _ = roadmaps.delete_roadmap(id).await;
        });
    };

    let new_roadmap = routes.new_roadmap();
    let settings = routes.settings();
    let roadmap_link = {
        let routes = routes.clone();
        move |roadmap: Roadmap| {
            let href = routes.roadmap(roadmap.id);
            view! {
                <li class="flex items-center justify-between py-2">
                    <Link to=href>{roadmap.title}</Link>
                    <button
                        class="btn btn-ghost btn-xs text-error"
                        on:click=move |_| on_delete(roadmap.id)
                    >
                        "Eliminar"
                    </button>
                </li>
            }
        }
    };
    let course_item = move |course: Course| {
        let badge = if course.is_published { "Publicado" } else { "Borrador" };
        view! {
            <li class="flex items-center justify-between py-2">
                <span>{course.title}</span>
                <span class="badge">{badge}</span>
            </li>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow">
                    <div class="flex-1 text-xl font-bold">{username}</div>
                    <div class="flex-none gap-2">
                        <Link to=new_roadmap>"Nuevo roadmap"</Link>
                        <Link to=settings>"Ajustes"</Link>
                    </div>
                </div>

                <ErrorAlert message=error />

                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">"Mis roadmaps"</h2>
                        <Show when=move || loading()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        <ul>
                            <For each=roadmaps key=|r: &Roadmap| r.id children=roadmap_link />
                        </ul>
                    </div>
                </div>

                <Show when=is_teacher>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title">"Mis cursos"</h2>
                            <ul>
                                <For each=courses key=|c: &Course| c.id children=course_item />
                            </ul>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}
