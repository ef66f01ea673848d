use super::ApiClient;
use crate::error::ApiError;
use merq_shared::{
    ConnectionCreate, Id, NodeConnection, NodeCreate, NodeUpdate, Roadmap, RoadmapCreate,
    RoadmapNode, RoadmapUpdate,
};

#[derive(Clone, Copy)]
pub struct RoadmapsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RoadmapsApi<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All roadmaps, or only those of `creator_id`.
    pub async fn get_all(self, creator_id: Option<Id>) -> Result<Vec<Roadmap>, ApiError> {
        let path = match creator_id {
            Some(id) => format!("/roadmaps/?creator_id={id}"),
            None => "/roadmaps/".to_string(),
        };
        self.client.get(&path).await
    }

    /// Detail view: the response embeds the roadmap's nodes.
    pub async fn get_by_id(self, id: Id) -> Result<Roadmap, ApiError> {
        self.client.get(&format!("/roadmaps/{id}")).await
    }

    /// Creates an empty roadmap owned by `creator_id`.
    pub async fn create(self, creator_id: Id, data: &RoadmapCreate) -> Result<Roadmap, ApiError> {
        self.client
            .post(&format!("/roadmaps/?creator_id={creator_id}"), data)
            .await
    }

    /// Renames or redescribes a roadmap. Nodes are edited separately.
    pub async fn update(self, id: Id, data: &RoadmapUpdate) -> Result<Roadmap, ApiError> {
        self.client.patch(&format!("/roadmaps/{id}"), data).await
    }

    pub async fn delete(self, id: Id) -> Result<(), ApiError> {
        self.client.delete(&format!("/roadmaps/{id}")).await
    }

    // ---------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------

    /// Nodes without the parent roadmap, in `order_index` order.
    pub async fn get_nodes(self, roadmap_id: Id) -> Result<Vec<RoadmapNode>, ApiError> {
        self.client
            .get(&format!("/roadmaps/{roadmap_id}/nodes/"))
            .await
    }

    pub async fn get_node(self, roadmap_id: Id, node_id: Id) -> Result<RoadmapNode, ApiError> {
        self.client
            .get(&format!("/roadmaps/{roadmap_id}/nodes/{node_id}"))
            .await
    }

    /// Only `title` is required; the server defaults the rest.
    pub async fn create_node(
        self,
        roadmap_id: Id,
        data: &NodeCreate,
    ) -> Result<RoadmapNode, ApiError> {
        self.client
            .post(&format!("/roadmaps/{roadmap_id}/nodes/"), data)
            .await
    }

    /// Partial node update; position changes come from the graph editor.
    pub async fn update_node(
        self,
        roadmap_id: Id,
        node_id: Id,
        data: &NodeUpdate,
    ) -> Result<RoadmapNode, ApiError> {
        self.client
            .patch(&format!("/roadmaps/{roadmap_id}/nodes/{node_id}"), data)
            .await
    }

    /// Marks a node done or not done.
    ///
    /// Sugar over [`Self::update_node`] with only `is_completed` set.
    pub async fn toggle_node_complete(
        self,
        roadmap_id: Id,
        node_id: Id,
        is_completed: bool,
    ) -> Result<RoadmapNode, ApiError> {
        self.update_node(roadmap_id, node_id, &NodeUpdate::completed(is_completed))
            .await
    }

    pub async fn delete_node(self, roadmap_id: Id, node_id: Id) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/roadmaps/{roadmap_id}/nodes/{node_id}"))
            .await
    }

    // ---------------------------------------------------------
    // Connections (no trailing slash on these routes)
    // ---------------------------------------------------------

    /// Prerequisite edges between the roadmap's nodes.
    pub async fn get_connections(self, roadmap_id: Id) -> Result<Vec<NodeConnection>, ApiError> {
        self.client
            .get(&format!("/roadmaps/{roadmap_id}/connections"))
            .await
    }

    /// Adds the edge `from_node_id -> to_node_id`.
    ///
    /// Self-loops and duplicate edges are not checked, here or on the server.
    pub async fn create_connection(
        self,
        roadmap_id: Id,
        from_node_id: Id,
        to_node_id: Id,
    ) -> Result<NodeConnection, ApiError> {
        let body = ConnectionCreate {
            from_node_id,
            to_node_id,
        };
        self.client
            .post(&format!("/roadmaps/{roadmap_id}/connections"), &body)
            .await
    }

    pub async fn delete_connection(
        self,
        roadmap_id: Id,
        connection_id: Id,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/roadmaps/{roadmap_id}/connections/{connection_id}"))
            .await
    }
}
