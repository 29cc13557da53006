//! Derived analytics for construction and infrastructure project records.
//!
//! A collection of loosely typed records (from a CSV upload or a prediction
//! service response) is turned into summary statistics, trend and scatter
//! series, categorical breakdowns and a top-cost ranking. The engine is pure:
//! [`dashboard::Dashboard::compute`] recomputes every view from scratch for
//! whatever collection it is handed.

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod fields;
pub mod grouping;
pub mod loader;
pub mod output;
pub mod ranking;
pub mod reports;
pub mod series;
pub mod settings;
pub mod types;
pub mod util;

pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use types::{FieldValue, Record};
