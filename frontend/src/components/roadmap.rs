use crate::components::alert::ErrorAlert;
use crate::use_app;
use crate::web::route::UserRoutes;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use merq_shared::{Id, RoadmapCreate, RoadmapNode};
use tracing::warn;

fn optional(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[component]
pub fn RoadmapCreatePage(username: String) -> impl IntoView {
    let app = use_app();
    let router = use_router();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let error = Signal::derive(move || app.read(|s| s.roadmaps.error()));
    let loading = move || app.read(|s| s.roadmaps.loading());

    let routes = UserRoutes::new(&username);
    let back = routes.dashboard();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let state = app.state();
        let Some(user) = state.auth.user() else {
            return;
        };
        let data = RoadmapCreate {
            title: title.get_untracked(),
            description: optional(description.get_untracked()),
        };
        let routes = routes.clone();
        spawn_local(async move {
            if let Ok(roadmap) = state.roadmaps.create_roadmap(user.id, &data).await {
                router.navigate(&routes.roadmap(roadmap.id));
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-xl mx-auto card bg-base-100 shadow">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title">"Nuevo roadmap"</h2>
                    <ErrorAlert message=error />
                    <input
                        type="text"
                        placeholder="Título"
                        class="input input-bordered"
                        required
                        prop:value=title
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Descripción"
                        class="textarea textarea-bordered"
                        prop:value=description
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>
                    <div class="card-actions justify-end">
                        <Link to=back>"Cancelar"</Link>
                        <button class="btn btn-primary" disabled=loading>"Crear"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn RoadmapDetailPage(username: String, roadmap_id: Id) -> impl IntoView {
    let app = use_app();
    let back = UserRoutes::new(&username).dashboard();

    let state = app.state();
    spawn_local(async move {
        state.roadmaps.fetch_roadmap(roadmap_id).await;
        state.roadmaps.fetch_connections(roadmap_id).await;
    });
    on_cleanup(move || app.state().roadmaps.clear_current());

    let title = move || {
        app.read(|s| {
            s.roadmaps
                .with(|r| r.current_roadmap.as_ref().map(|m| m.title.clone()))
        })
    };
    let nodes = move || app.read(|s| s.roadmaps.with(|r| r.nodes.clone()));
    let connections = move || app.read(|s| s.roadmaps.with(|r| r.connections.len()));
    let error = Signal::derive(move || app.read(|s| s.roadmaps.error()));
    let (layout_busy, set_layout_busy) = signal(false);

    let on_toggle = move |node_id: Id, done: bool| {
        let roadmaps = app.state().roadmaps;
        spawn_local(async move {
            let _ = roadmaps.toggle_node_complete(roadmap_id, node_id, done).await;
        });
    };

    let on_generate = move |node_id: Id| {
        let state = app.state();
        spawn_local(async move {
            match state.api.ai().generate_node_content(node_id).await {
                Ok(_) => state.roadmaps.fetch_node(roadmap_id, node_id).await,
                Err(err) => warn!(node_id, error = %err, "content generation failed"),
            }
        });
    };

    let on_auto_layout = move |_| {
        let state = app.state();
        set_layout_busy.set(true);
        spawn_local(async move {
            match state.api.ai().auto_layout(roadmap_id).await {
                Ok(_) => state.roadmaps.fetch_roadmap(roadmap_id).await,
                Err(err) => warn!(roadmap_id, error = %err, "auto layout failed"),
            }
            set_layout_busy.set(false);
        });
    };

    let node_row = move |node: RoadmapNode| {
        let id = node.id;
        let done = node.is_completed;
        view! {
            <li class="flex items-center gap-3 py-2">
                <input
                    type="checkbox"
                    class="checkbox"
                    prop:checked=done
                    on:change=move |_| on_toggle(id, !done)
                />
                <span class=if done { "line-through opacity-60" } else { "" }>{node.title}</span>
                <button class="btn btn-ghost btn-xs ml-auto" on:click=move |_| on_generate(id)>
                    "Generar contenido"
                </button>
            </li>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-4xl mx-auto space-y-4">
                <Link to=back>"Volver"</Link>
                <ErrorAlert message=error />
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <div class="flex items-center justify-between">
                            <h2 class="card-title">{move || title().unwrap_or_default()}</h2>
                            <button
                                class="btn btn-sm"
                                disabled=move || layout_busy.get()
                                on:click=on_auto_layout
                            >
                                "Reorganizar"
                            </button>
                        </div>
                        <p class="text-sm opacity-70">
                            {move || format!("{} conexiones", connections())}
                        </p>
                        <ul>
                            <For
                                each=nodes
                                key=|n: &RoadmapNode| (n.id, n.is_completed)
                                children=node_row
                            />
                        </ul>
                    </div>
                </div>
            </div>
        </div>
    }
}
