#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]
//! Grid topology engine for box-and-line ASCII diagrams.
//!
//! The grid only stores characters. Shapes (lines, boxes, connections) are
//! inferred from the characters around a cell whenever a tool asks for them,
//! and edits are staged into the grid until they are committed or rolled back.

mod error;
pub use error::*;

mod position;
pub use position::*;

mod rectangle;
pub use rectangle::*;

pub mod glyphs;

mod pixel;
pub use pixel::*;

mod grid;
pub use grid::*;

mod context;
pub use context::*;

pub mod persistence;
pub use persistence::{FilePersistence, MemoryPersistence, Persistence};

pub mod topology;
pub use topology::{BoxShape, Connection, EndpointInfo, LineMode};

pub mod style;
pub use style::StyleId;
