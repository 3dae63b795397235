//! mlstack-core: Inference image selection for SageMaker deployments
//!
//! This crate provides the pieces a provisioning tool needs to pick the
//! container image for a managed inference model:
//! - Instance type parsing and accelerator family classification
//! - Image coordinates and URI composition
//! - Ambient region resolution
//! - Configuration types
//! - Error handling

pub mod config;
pub mod container;
pub mod error;
pub mod image;
pub mod instance;
pub mod region;
pub mod uri;

pub use config::*;
pub use container::*;
pub use error::*;
pub use image::*;
pub use instance::*;
pub use region::*;
pub use uri::*;
