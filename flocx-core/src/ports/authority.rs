use crate::models::{ProjectId, ResourceType};

/// The external collaborator that knows who administers a resource.
///
/// Each resource type is backed by its own service (for bare-metal nodes,
/// the node inventory). The marketplace only ever asks one question of it:
/// may this project list this resource?
pub trait ResourceAuthority {
    /// True if `project_id` administers the resource `resource_id` of type
    /// `resource_type`.
    fn is_resource_admin(
        &self,
        resource_type: &ResourceType,
        resource_id: &str,
        project_id: &ProjectId,
    ) -> impl Future<Output = bool> + Send;
}
