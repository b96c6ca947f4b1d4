mod format;
mod path;

pub use format::{format_size, zip_timestamp};
pub use path::{entry_name, normalize_relative, relative_to_root};
