//! Resource model layer
//!
//! Structure:
//! - `resource.rs` - read-only view over one decoded resource document
//! - `fields.rs` - shape-checked nested field access
//! - `resource_kind.rs` - standard kind vocabulary and kind-specific traits
//! - `category.rs` - display categories and the kind → category table

pub mod category;
pub mod fields;
pub mod resource;
pub mod resource_kind;

pub use category::{Category, CategoryTable};
pub use fields::{FieldAccess, FieldError};
pub use resource::{OwnerReference, Resource, ResourceError, node_id};
pub use resource_kind::ResourceKind;
