mod local_upload_store;
mod local_workspace_store;

pub use local_upload_store::LocalUploadStore;
pub use local_workspace_store::LocalWorkspaceStore;
