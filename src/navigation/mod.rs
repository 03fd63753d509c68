//! Route table for the single-page app: which view each URL renders, which
//! access tag guards it, and the two-level shell tree the router mounts.

pub mod access;
pub mod tree;

pub use access::{route_config, Access};
pub use tree::{create_route, RouteMatch, RouteNode, RouteTree, View};
