pub mod batch;
pub mod boards;
pub mod cards;
pub mod labels;
pub mod operation;
mod registry;

pub use batch::{reduce_batch, BatchPolicy};
pub use boards::{GetBoards, GetLists, GetTicketsByList};
pub use cards::{AddComment, ArchiveCard, CreateCard, MoveCard};
pub use labels::{AddLabel, CreateLabel};
pub use operation::{BatchOperation, BatchTool, Operation, SingleTool, ValidationError};
pub use registry::{
    json_schema_array, json_schema_enum, json_schema_count, json_schema_object,
    json_schema_string, Tool, ToolRegistry,
};

use anyhow::Result;
use std::sync::Arc;
use trello_sdk::RemoteApi;

fn register_pair<O: BatchOperation>(
    registry: &mut ToolRegistry,
    api: &Arc<dyn RemoteApi>,
    policy: BatchPolicy,
) -> Result<()> {
    registry.register(Arc::new(SingleTool::<O>::new(api.clone())))?;
    registry.register(Arc::new(BatchTool::<O>::new(api.clone(), policy)))
}

/// Build the full Trello tool catalogue on top of `api`.
pub fn trello_registry(api: Arc<dyn RemoteApi>, policy: BatchPolicy) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(SingleTool::<GetBoards>::new(api.clone())))?;
    registry.register(Arc::new(SingleTool::<GetLists>::new(api.clone())))?;
    registry.register(Arc::new(SingleTool::<GetTicketsByList>::new(api.clone())))?;

    register_pair::<CreateCard>(&mut registry, &api, policy)?;
    register_pair::<MoveCard>(&mut registry, &api, policy)?;
    register_pair::<ArchiveCard>(&mut registry, &api, policy)?;
    register_pair::<AddComment>(&mut registry, &api, policy)?;
    register_pair::<CreateLabel>(&mut registry, &api, policy)?;
    register_pair::<AddLabel>(&mut registry, &api, policy)?;

    Ok(registry)
}
