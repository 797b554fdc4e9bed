//! HTTP clients backing the pipeline's collaborator traits.

pub mod mal;
pub mod suggest;
