//! optcall - getopt-style option parsing with typed values and callbacks.
//!
//! Options are declared with [`Opt`], registered in an [`OptionSet`], and
//! matched against an argument vector with [`OptionSet::parse`]. Short
//! options (`-v`) may be clustered (`-vxy`) and take values as `-x val`,
//! `-xval` or `-x=val`; long options (`--name`) take `--name val` or
//! `--name=val`. Scanning stops at `--` or the first non-option argument,
//! and whatever is left is returned.
//!
//! Values can be converted into caller-owned destinations (`bool`,
//! `String`, `i32`, `i64`, `u64`, or any [`TextValue`] such as `IpAddr`)
//! and passed to a per-option handler.

pub mod config;
pub mod error;
pub mod option;
pub mod output;
mod parser;
pub mod registry;
pub mod value;

pub use config::{Config, ConfigError, OptionConfig, Parsed, Slot, ValueType};
pub use error::{BoxError, Error, ErrorKind};
pub use option::{Handler, Opt};
pub use output::{generate_error_output, generate_output, generate_output_string};
pub use registry::OptionSet;
pub use value::{Destination, TextValue};
