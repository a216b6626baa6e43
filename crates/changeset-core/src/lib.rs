mod diff;
pub mod error;
pub mod types;

pub use diff::{diff_manifests, diff_versions};
pub use error::*;
pub use types::*;
