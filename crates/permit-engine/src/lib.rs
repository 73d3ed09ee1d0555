//! # permit-engine
//!
//! Decides whether a typed requirement record is permitted by a tag-keyed
//! policy document.  Policies are plain [`Value`] trees (booleans, wildcards,
//! alternation lists and per-field matchers) that the caller has already
//! loaded from wherever it keeps them.
//!
//! Matching happens in three layers, each built on the one below:
//!
//! * [`match_value`] compares one required value with one permission value.
//! * [`match_spec`] checks every field of a record against a permission spec.
//! * [`match_tagged_policy`] picks the spec for the record's tag and applies
//!   the `admin` override channel.
//!
//! All three are total and fail closed: shapes they do not understand deny.
//!
//! ## Quick start
//!
//! ```rust
//! use permit_engine::{match_tagged_policy, Key, Mapping, Record, Value};
//!
//! let page = Record::new("Page", [("action", Value::label("show"))]).unwrap();
//!
//! let mut doc = Mapping::new();
//! doc.insert(
//!     Key::label("Page"),
//!     [("action", Value::any_of([Value::label("index"), Value::label("show")]))]
//!         .into_iter()
//!         .collect(),
//! );
//!
//! assert!(match_tagged_policy(&page, &doc));
//! ```

mod aggregate;
mod decision;
mod dispatch;
mod evaluator;
pub mod matcher;
mod record;
pub mod value;

// Re-export primary public API at crate root.
pub use aggregate::match_spec;
pub use decision::{Grant, PolicyDecision, ResolvedAction};
pub use dispatch::{match_tagged_policy, resolve, ADMIN};
pub use evaluator::PolicyEngine;
pub use matcher::match_value;
pub use record::{Record, RecordError, Requirement};
pub use value::{lookup, Key, Mapping, Number, Value};
