//! Chart rendering for care-log series.
//!
//! - **figure**: [`Figure`] values built from derived series
//! - **renderer**: the [`Renderer`] seam and the plotters PNG implementation

mod error;
mod figure;
mod renderer;

pub use error::RenderError;
pub use figure::{BAR_X_LABEL, Bar, Figure, FigureData, FigureSize};
pub use renderer::{PlottersRenderer, RenderedImage, Renderer, encode_png};
