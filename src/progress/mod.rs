//! Progress bar options for URL downloads.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::progress::ProgressBarOpts;
//!
//! // pip-like bar, cleared once the download completes
//! let opts = ProgressBarOpts::with_pip_style();
//!
//! // no bar at all, e.g. in CI logs
//! let quiet = ProgressBarOpts::hidden();
//! ```

pub(crate) mod style;

pub use style::ProgressBarOpts;
