pub mod breaks;
pub mod config;
pub mod errors;
pub mod label;
pub mod logging;
pub mod measure;
pub mod wrap;

// Interactive preview
pub mod actions;
pub mod app;
pub mod event;
pub mod ui;

// Re-export commonly used types
pub use crate::app::AppState;
pub use crate::config::AppConfig;
pub use crate::errors::{WrapError, WrapResult};
pub use crate::label::WrappedLabel;
pub use crate::measure::{CellFont, CellMeasurer, Extent, FnMeasurer, MeasureError, TextMeasurer};
pub use crate::wrap::{select, LabelLayout, Selection, Strategy, WrapOptions, WrapSelector};
