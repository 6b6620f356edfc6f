//! # Candor - Property-Based Testing on Lazy Shrink Trees
//!
//! Candor is a small property-based testing library: describe an input
//! domain with a [`Gen`], state a predicate over it with [`for_all`], and
//! [`check`] draws random inputs until one falsifies the predicate, then
//! greedily searches the input's lazy shrink tree for a smaller
//! counterexample to report.
//!
//! Generation and shrinking are built from one structure: every `generate`
//! call returns a [`Tree`] whose root is the drawn value and whose lazily
//! produced candidates are strictly simpler values. Generator combinators
//! (`map`, `zip`, `combine_n`, `bind`) and tree combinators compose in
//! lockstep, so shrink ordering follows construction order: earlier-bound
//! arguments shrink first, and a list built from `bind` over its length
//! shrinks its length before its elements.
//!
//! ## Quick Start
//!
//! ```rust
//! use candor::{check, for_all, int_between, list_of};
//!
//! let reversible = for_all(&list_of(&int_between(-10, 10)), |list: &Vec<i64>| {
//!     let mut copy = list.clone();
//!     copy.reverse();
//!     copy.reverse();
//!     copy == *list
//! });
//! assert!(check(&reversible).is_passed());
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod property;
pub mod rng;
pub mod runner;
pub mod shrink;
pub mod tree;

// Re-export the main public API
pub use config::Config;
pub use error::PropertyError;
pub use generator::{Gen, combine_n, int_between, list_of, list_of_length, one_of, try_int_between};
pub use property::{Outcome, Property, TestResult, for_all};
pub use rng::RandomSource;
pub use runner::{
    ConsoleReporter, Reporter, RunStatus, SilentReporter, check, check_with_config,
    check_with_reporter,
};
pub use shrink::towards;
pub use tree::{Shrink, Tree};
