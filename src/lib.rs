//! racechart: SVG charts for race-timing results.
//!
//! Records from a datasport `results.json` export are filtered to finishers,
//! binned and scaled in [`core`], laid out as layered draw primitives by the
//! chart builders in [`api`], and serialized by a [`render::Renderer`].
//!
//! ```no_run
//! use racechart::{ChartKind, RenderOptions, core::parse_results_json, render_svg};
//!
//! let records = parse_results_json(r#"[{"msc": "1", "czasnetto": "00:45:12,000"}]"#)?;
//! let svg = render_svg(ChartKind::NetTimeHistogram, &records, &RenderOptions::default())?;
//! assert!(svg.contains("<svg"));
//! # Ok::<(), racechart::ChartError>(())
//! ```

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartKind, HighlightKey, RenderOptions, render_all, render_svg};
pub use error::{ChartError, ChartResult};
