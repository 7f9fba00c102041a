//! Shapeview Core Data Structures
//!
//! This crate contains the data the interaction layer operates on:
//! - Scene: node hierarchy with cached world transforms and pickability
//! - Shape: analytic shapes attached to nodes
//! - ObjectRegistry: user-created pickable objects and their owning group
//! - ViewerConfig: serializable viewer settings

pub mod config;
pub mod constants;
pub mod object;
pub mod primitive;
pub mod scene;
pub mod shape;

pub use config::*;
pub use constants::*;
pub use object::*;
pub use primitive::MeshData;
pub use scene::*;
pub use shape::*;
