mod error;
mod format;
mod parse;
mod serialize;

pub use error::{FormatError, FrontMatterError, ValidationError};
pub use format::format_changeset;
pub use parse::parse_changeset;
pub use serialize::serialize_changeset;
