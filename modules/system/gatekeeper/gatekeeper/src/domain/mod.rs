//! Domain layer: the authorization cascade and its building blocks.

pub mod error;
pub mod groups;
pub mod machine;
pub mod request;
pub mod verdict;
