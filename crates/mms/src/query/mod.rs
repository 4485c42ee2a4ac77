//! Query API for building conversation list data

mod headers;

pub use headers::{find_header, load_headers, unresolved_count};
