//! Declarative parsing of flat `-x` / `--name` switches into typed values.
//!
//! Parameters and flags are declared on a [`Builder`], each with one short and
//! one long alias. The resulting [`Parser`] is immutable and matches raw
//! argument lists into a [`Match`]:
//!
//! ```
//! use argumentz::Parser;
//!
//! let parser = Parser::builder()
//!     .with_param_or_else('u', "user", "username", || "guest".to_string())
//!     .with_mapped_param('p', "port", "port for server to listen", |s| s.parse::<i64>())
//!     .with_flag('v', "verbose", "enable extra logging")
//!     .build();
//!
//! let m = parser.match_args(&["-p", "9000", "-v"]).unwrap();
//! assert_eq!(m.get("user").unwrap(), Some("guest"));
//! assert_eq!(m.get_int("port").unwrap(), Some(9000));
//! assert!(m.get_flag("verbose"));
//! ```
//!
//! There are no positional arguments, sub-commands or repeated switches.

pub mod alias;
pub mod builder;
pub mod error;
pub mod matches;
pub mod parser;
pub mod usage;
pub mod value;

pub use builder::Builder;
pub use error::{BoxError, Error, Result};
pub use matches::Match;
pub use parser::Parser;
pub use value::{IntoValue, Value};
