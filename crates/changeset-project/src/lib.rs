mod config;
mod error;
mod manifest;
mod project;

pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const CONFIG_FILE_NAME: &str = "config.json";

pub use config::{ChangesetsConfig, load_changesets_config};
pub use error::ProjectError;
pub use project::{
    JsProject, WorkspaceTool, discover_project, ensure_changeset_dir, relevant_packages,
};

pub type Result<T> = std::result::Result<T, ProjectError>;
