//! Roadmaps store: the roadmap list, the open roadmap's graph and the
//! selected node.

use super::{
    Store, SubscriptionId, push_unique, remove_by_id, replace_by_id, replace_current, upsert_at,
};
use crate::api::ApiClient;
use crate::error::ApiError;
use merq_shared::{
    Id, NodeConnection, NodeCreate, NodeUpdate, Roadmap, RoadmapCreate, RoadmapNode,
    RoadmapUpdate,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoadmapsState {
    pub roadmaps: Vec<Roadmap>,
    pub current_roadmap: Option<Roadmap>,
    /// Nodes of `current_roadmap`
    pub nodes: Vec<RoadmapNode>,
    pub connections: Vec<NodeConnection>,
    pub current_node: Option<RoadmapNode>,
}

#[derive(Clone)]
pub struct RoadmapsStore {
    store: Store<RoadmapsState>,
    api: ApiClient,
}

impl RoadmapsStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            store: Store::default(),
            api,
        }
    }

    pub fn state(&self) -> RoadmapsState {
        self.store.snapshot()
    }

    pub fn with<R>(&self, f: impl FnOnce(&RoadmapsState) -> R) -> R {
        self.store.with(f)
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    /// Replaces the roadmap list with the roadmaps created by `user_id`.
    pub async fn fetch_my_roadmaps(&self, user_id: Id) {
        self.store
            .fetch(
                "fetch_my_roadmaps",
                "Error al cargar roadmaps",
                self.api.roadmaps().get_all(Some(user_id)),
                |s, roadmaps| s.roadmaps = roadmaps,
            )
            .await;
    }

    /// Opens a roadmap; its embedded nodes replace the node cache.
    pub async fn fetch_roadmap(&self, id: Id) {
        self.store
            .fetch(
                "fetch_roadmap",
                "Error al cargar roadmap",
                self.api.roadmaps().get_by_id(id),
                |s, roadmap| {
                    s.nodes = roadmap.nodes.clone();
                    s.current_roadmap = Some(roadmap);
                },
            )
            .await;
    }

    /// Replaces `connections` with the edges of `roadmap_id`.
    pub async fn fetch_connections(&self, roadmap_id: Id) {
        self.store
            .fetch(
                "fetch_connections",
                "Error al cargar conexiones",
                self.api.roadmaps().get_connections(roadmap_id),
                |s, connections| s.connections = connections,
            )
            .await;
    }

    /// New roadmaps go to the front of the list.
    pub async fn create_roadmap(
        &self,
        user_id: Id,
        data: &RoadmapCreate,
    ) -> Result<Roadmap, ApiError> {
        self.store
            .run(
                "create_roadmap",
                "Error al crear roadmap",
                self.api.roadmaps().create(user_id, data),
                |s, roadmap| upsert_at(&mut s.roadmaps, 0, roadmap),
            )
            .await
    }

    /// Patches the list entry and `current_roadmap` with the server copy.
    pub async fn update_roadmap(&self, id: Id, data: &RoadmapUpdate) -> Result<Roadmap, ApiError> {
        self.store
            .run(
                "update_roadmap",
                "Error al actualizar roadmap",
                self.api.roadmaps().update(id, data),
                |s, roadmap| {
                    replace_by_id(&mut s.roadmaps, id, roadmap);
                    replace_current(&mut s.current_roadmap, id, roadmap);
                },
            )
            .await
    }

    /// Leaves `nodes` and `connections` alone, even for the open roadmap.
    pub async fn delete_roadmap(&self, id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_roadmap",
                "Error al eliminar roadmap",
                self.api.roadmaps().delete(id),
                |s, _| remove_by_id(&mut s.roadmaps, id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------

    /// Loads one node, with its generated content, into `current_node`.
    pub async fn fetch_node(&self, roadmap_id: Id, node_id: Id) {
        self.store
            .fetch(
                "fetch_node",
                "Error al cargar nodo",
                self.api.roadmaps().get_node(roadmap_id, node_id),
                |s, node| s.current_node = Some(node),
            )
            .await;
    }

    /// Appends to `nodes`.
    pub async fn create_node(
        &self,
        roadmap_id: Id,
        data: &NodeCreate,
    ) -> Result<RoadmapNode, ApiError> {
        self.store
            .run(
                "create_node",
                "Error al crear nodo",
                self.api.roadmaps().create_node(roadmap_id, data),
                |s, node| push_unique(&mut s.nodes, node),
            )
            .await
    }

    pub async fn update_node(
        &self,
        roadmap_id: Id,
        node_id: Id,
        data: &NodeUpdate,
    ) -> Result<RoadmapNode, ApiError> {
        self.store
            .run(
                "update_node",
                "Error al actualizar nodo",
                self.api.roadmaps().update_node(roadmap_id, node_id, data),
                |s, node| apply_node(s, node_id, node),
            )
            .await
    }

    /// Patches the node in `nodes` and, if selected, `current_node`.
    pub async fn toggle_node_complete(
        &self,
        roadmap_id: Id,
        node_id: Id,
        is_completed: bool,
    ) -> Result<RoadmapNode, ApiError> {
        self.store
            .run(
                "toggle_node_complete",
                "Error al actualizar nodo",
                self.api
                    .roadmaps()
                    .toggle_node_complete(roadmap_id, node_id, is_completed),
                |s, node| apply_node(s, node_id, node),
            )
            .await
    }

    /// Connections touching the node are left to the next
    /// `fetch_connections`.
    pub async fn delete_node(&self, roadmap_id: Id, node_id: Id) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_node",
                "Error al eliminar nodo",
                self.api.roadmaps().delete_node(roadmap_id, node_id),
                |s, _| remove_by_id(&mut s.nodes, node_id),
            )
            .await
    }

    // ---------------------------------------------------------
    // Connections
    // ---------------------------------------------------------

    pub async fn create_connection(
        &self,
        roadmap_id: Id,
        from_node_id: Id,
        to_node_id: Id,
    ) -> Result<NodeConnection, ApiError> {
        self.store
            .run(
                "create_connection",
                "Error al crear conexión",
                self.api
                    .roadmaps()
                    .create_connection(roadmap_id, from_node_id, to_node_id),
                |s, connection| push_unique(&mut s.connections, connection),
            )
            .await
    }

    pub async fn delete_connection(
        &self,
        roadmap_id: Id,
        connection_id: Id,
    ) -> Result<(), ApiError> {
        self.store
            .run(
                "delete_connection",
                "Error al eliminar conexión",
                self.api.roadmaps().delete_connection(roadmap_id, connection_id),
                |s, _| remove_by_id(&mut s.connections, connection_id),
            )
            .await
    }

    /// Closes the open roadmap: current slots and graph caches are emptied.
    pub fn clear_current(&self) {
        self.store.update(|s| {
            s.current_roadmap = None;
            s.current_node = None;
            s.nodes.clear();
            s.connections.clear();
        });
    }

    pub fn clear_node(&self) {
        self.store.update(|s| s.current_node = None);
    }
}

fn apply_node(state: &mut RoadmapsState, id: Id, node: &RoadmapNode) {
    replace_by_id(&mut state.nodes, id, node);
    replace_current(&mut state.current_node, id, node);
}
