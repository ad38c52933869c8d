//! Classification and assembly for semantic templates.
//!
//! [`route`] decides which category each source table belongs to and stacks
//! same-category tables; [`assemble`] turns the stacked tables into a
//! [`Document`](semtpl_model::Document). [`convert`] runs both.
//!
//! # Example
//!
//! ```ignore
//! use semtpl_core::convert;
//! use semtpl_model::ConvertOptions;
//!
//! let outcome = convert(sources, &ConvertOptions::default())?;
//! println!("{} records", outcome.document.len());
//! ```

#![deny(unsafe_code)]

pub mod assemble;
pub mod error;
pub mod pipeline;
pub mod router;
pub mod xref;

pub use assemble::{
    PRIMARY_KEY_FIELD, assemble, assemble_cubes, assemble_dimensions, assemble_joins,
    assemble_measures,
};
pub use error::{ConvertError, Result};
pub use pipeline::{ConvertOutcome, convert, convert_with};
pub use router::{Accepted, RejectReason, Rejection, RoutedTables, TableRouter, route};
pub use xref::CubeIndex;
