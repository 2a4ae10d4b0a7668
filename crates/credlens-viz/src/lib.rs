//! # Credlens Viz
//!
//! Browser-ready chart specifications for the credlens dashboard.
//!
//! Figures are plain serde structs in a plotly-flavored JSON shape
//! (traces, layout, shapes, annotations); the front-end hands them
//! straight to the renderer. Ranked tables are column/row string views.

pub mod charts;
pub mod figure;
pub mod tables;

pub use charts::{panel_figure, scatter_figure, waterfall_figure};
pub use figure::{Annotation, Axis, Figure, Layout, Marker, MarkerColor, Shape, ShapeLine, Trace};
pub use tables::{top_table_views, TableView};
