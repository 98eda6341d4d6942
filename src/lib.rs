/*!
A columnar element/component storage engine for polygon meshes.

# Overview

+ A [`Mesh`] owns one container per element kind: vertices, edges and
  faces. Each container stores its elements as rows in a dense array, with
  tombstone deletion: [`Mesh::delete_vertex`] and friends only flag the
  slot, and [`Mesh::compact_vertices`] (or [`Mesh::compact`]) later removes
  the gaps. The live count ([`Mesh::num_vertices`]) and the slot count
  ([`Mesh::vertex_slot_count`]) are equal exactly when a container is
  compact.

+ Elements carry their always-present components inline (a vertex's
  position, a face's vertex references, the status flags) and refer to each
  other with typed handles ([`VH`], [`EH`], [`FH`]). Handles are plain
  indices, stable across any growth of the storage; compaction is the only
  operation that moves elements, and it rewrites every handle stored
  anywhere in the mesh, handles inside custom components included, so each
  one keeps its meaning.

+ Optional components (normals, colors, quality, texture coordinates,
  adjacency lists) are columns owned by the container, parallel to the
  element rows, enabled and disabled at runtime. A disabled column costs no
  memory and its accessors return [`Error::MissingComponent`]; use the
  `is_per_*_enabled` / `enable_per_*` / `require_per_*` families to manage
  them.

+ Custom components attach a column of any `Default + Clone` type to an
  element kind under a runtime name, with the type checked on every access.
  See [`Mesh::add_vertex_custom_component`] and its edge/face siblings.

# Concurrency

The engine is not internally synchronized. All mutation goes through
`&mut self`, including operations that look local to one container but
rewrite handles in the others. Shared `&self` reads are safe from any
number of threads.
*/

mod color;
mod components;
mod container;
mod custom;
mod element;
mod error;
mod import;
mod mesh;
mod status;
mod vertical;

pub use color::Color;
pub use element::{EH, Edge, Element, FH, Face, Handle, VH, Vertex};
pub use error::Error;
pub use mesh::Mesh;
pub use status::Status;
