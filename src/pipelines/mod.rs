//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait that enables easy and flexible pipeline creation.
pub mod pipeline;
pub mod ppc;

pub use pipeline::Pipeline;
pub use ppc::PpcPipeline;
