//! Small helpers shared by training and preprocessing code.
//!
//! - [`flatten`] - [`flatten_list`] over [`Nested`] values and [`always_return_list`]
//! - [`case`] - [`snake_case_id`] for turning class names into identifiers
//! - [`seed`] - the global seeded generator behind [`set_seed`]
//! - [`registry`] - [`TypeRegistry`], name-based construction of types
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::utils::{seeded_rng, set_seed, snake_case_id};
//! use rand::Rng;
//!
//! set_seed(1234);
//! let a: u32 = seeded_rng().random();
//! set_seed(1234);
//! let b: u32 = seeded_rng().random();
//! assert_eq!(a, b);
//!
//! assert_eq!(snake_case_id("GraphConv"), "graph_conv");
//! ```

pub mod case;
pub mod flatten;
pub mod registry;
pub mod seed;

pub use case::snake_case_id;
pub use flatten::{always_return_list, flatten_list, Nested, OneOrMany};
pub use registry::{qualified_name_of, qualified_type_name, Factory, TypeRegistry};
pub use seed::{current_seed, register_seed_hook, seeded_rng, set_seed, with_rng, SeedHook};
