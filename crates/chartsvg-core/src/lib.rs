#![forbid(unsafe_code)]

//! Chart model, widget parsing and color resolution (headless).
//!
//! This crate knows nothing about geometry or SVG; it turns a chart widget description into a
//! validated [`ChartSpec`] and resolves color tokens into drawable colors.

pub mod color;
pub mod config;
pub mod error;
pub mod generated;
pub mod geom;
pub mod spec;
pub mod widget;

pub use color::{ColorResolver, ColorToken, DrawColor, Resolution};
pub use config::ChartConfig;
pub use error::{Error, FailureReason, Result};
pub use spec::{
    AxisId, AxisTitles, ChartKind, ChartSpec, ColorSpec, ColorValue, DataPoint, Dataset,
    RenderOptions, Viewport,
};
pub use widget::{kind_from_widget, parse_widget};

#[cfg(test)]
mod tests;
