//! Installable-unit discovery and directive parsing.
//!
//! The "configuration" of a dotlink source tree is the set of `install`
//! marker files inside its immediate subdirectories: the presence of the
//! marker makes the subdirectory a [`units::Unit`], and the marker's
//! content is the unit's directive script, one
//! [`directives::Directive`] per matching line.
pub mod directives;
pub mod units;
