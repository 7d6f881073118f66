//! Per-graph attribute storage.
//!
//! Provides the [`AttributeTableAdapter`] trait, the callback contract a graph
//! engine drives at every structural mutation, and [`AttributeStore`], its
//! in-memory implementation.
//!
//! # Architecture
//!
//! An [`AttributeStore`] owns three insertion-ordered tables (graph, vertex,
//! edge) mapping attribute names to [`AttributeSequence`]s, the entity counts
//! those sequences must match, a lazily built [`NameIndex`] over the vertex
//! `name` attribute, and the single random source used by the `Random`
//! combinator.
//!
//! Every mutation builds new sequences or tables off to the side and only
//! publishes them once construction has succeeded, so an error leaves the
//! store exactly as it was.
//!
//! # Modules
//!
//! - [`adapter`]: the callback trait and its implementation for the store
//! - [`config`]: [`StoreConfig`] (random seed)
//! - [`name_index`]: the name -> vertex cache
//! - [`store`]: [`AttributeStore`] and its direct accessors/setters
//! - [`types`]: selections, copy flags, merge groups and info records

pub mod adapter;
pub mod config;
pub mod name_index;
pub mod store;
pub mod types;

// Re-export key types for ergonomic use.
pub use adapter::AttributeTableAdapter;
pub use config::StoreConfig;
pub use graphattr_combine::{CombinationSpec, Combinator};
pub use graphattr_core::{AttributeError, AttributeKind, AttributeSequence, Scope, Value};
pub use name_index::{NameIndex, NAME_ATTRIBUTE};
pub use store::{AttributeStore, AttributeTable};
pub use types::{AttributeInfo, CopyScopes, MergeGroup, NewAttributes, Selection};
