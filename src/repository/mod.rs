mod extractor;
mod git;
mod path_list;
mod resolver;
mod vcs;

pub use extractor::{classify, extract};
pub use git::GitRepository;
pub use path_list::{parse_path_list, read_path_list};
pub use resolver::{resolve, resolve_target, HEAD};
pub use vcs::{RawChange, RawStatus, VersionControl};
