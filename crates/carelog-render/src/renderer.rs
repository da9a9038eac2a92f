//! Rendering figures to PNG.

use std::path::Path;

use chrono::{NaiveDate, TimeDelta};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::{
    BitMapBackend, ChartBuilder, Color, DrawingArea, DrawingBackend, FontTransform, Histogram,
    IntoDrawingArea, IntoFont, IntoSegmentedCoord, LineSeries, RGBColor, SegmentValue, WHITE,
};
use tracing::{debug, info};

use crate::error::RenderError;
use crate::figure::{Bar, Figure, FigureData};

const FONT: &str = "sans-serif";
const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);
const LINE_COLOR: RGBColor = RGBColor(221, 132, 82);

/// Turns a [`Figure`] into an image.
pub trait Renderer {
    fn render(&self, figure: &Figure) -> Result<RenderedImage, RenderError>;
}

/// An encoded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded bytes, ready for download.
    pub png: Vec<u8>,
}

impl RenderedImage {
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        std::fs::write(path, &self.png).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.png.len(), "wrote chart image");
        Ok(())
    }
}

/// Renders figures with plotters into an in-memory RGB buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlottersRenderer;

impl PlottersRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PlottersRenderer {
    fn render(&self, figure: &Figure) -> Result<RenderedImage, RenderError> {
        let size = figure.size();
        if size.width == 0 || size.height == 0 {
            return Err(RenderError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }

        let mut buffer = vec![0u8; size.rgb_len()];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (size.width, size.height))
                .into_drawing_area();
            root.fill(&WHITE)?;
            match figure.data() {
                FigureData::Bars(bars) => draw_bars(&root, figure, bars)?,
                FigureData::Line(points) => draw_line(&root, figure, points)?,
            }
            root.present()?;
        }

        let png = encode_png(&buffer, size.width, size.height)?;
        debug!(
            width = size.width,
            height = size.height,
            bytes = png.len(),
            empty = figure.is_empty(),
            "rendered figure"
        );
        Ok(RenderedImage {
            width: size.width,
            height: size.height,
            png,
        })
    }
}

/// Encode a packed RGB8 buffer as PNG.
pub fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(rgb, width, height, ExtendedColorType::Rgb8)?;
    Ok(png)
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    bars: &[Bar],
) -> Result<(), RenderError> {
    let slots = u32::try_from(bars.len().max(1)).unwrap_or(u32::MAX);
    let tallest = bars.iter().map(|bar| bar.value).max().unwrap_or(0).max(1);

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(45).y_label_area_size(50);
    if let Some(title) = figure.title() {
        builder.caption(title, (FONT, 24));
    }
    let y_max = tallest + tallest / 10 + 1;
    let mut chart = builder.build_cartesian_2d((0u32..slots).into_segmented(), 0u64..y_max)?;

    let label_of = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(idx) => bars
            .get(*idx as usize)
            .map(|bar| bar.label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(bars.len().max(1))
        .x_label_formatter(&label_of);
    if let Some(label) = figure.x_label() {
        mesh.x_desc(label);
    }
    if let Some(label) = figure.y_label() {
        mesh.y_desc(label);
    }
    mesh.draw()?;

    if !bars.is_empty() {
        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(12)
                .data(
                    bars.iter()
                        .enumerate()
                        .map(|(idx, bar)| (idx as u32, bar.value)),
                ),
        )?;
    }
    Ok(())
}

fn draw_line<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    points: &[(NaiveDate, f64)],
) -> Result<(), RenderError> {
    let origin = points.iter().map(|(date, _)| *date).min();
    let offset = |date: NaiveDate| origin.map_or(0, |origin| (date - origin).num_days());
    let span = points
        .iter()
        .map(|(date, _)| offset(*date))
        .max()
        .unwrap_or(0)
        .max(1);
    let top = points
        .iter()
        .map(|(_, total)| *total)
        .fold(0.0_f64, f64::max);
    let top = if top > 0.0 { top * 1.05 } else { 1.0 };

    let mut builder = ChartBuilder::on(root);
    builder.margin(15).x_label_area_size(80).y_label_area_size(60);
    if let Some(title) = figure.title() {
        builder.caption(title, (FONT, 24));
    }
    let mut chart = builder.build_cartesian_2d(0i64..span, 0f64..top)?;

    let date_label = |days: &i64| {
        origin
            .and_then(|origin| origin.checked_add_signed(TimeDelta::days(*days)))
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let mut mesh = chart.configure_mesh();
    mesh.x_label_formatter(&date_label)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90));
    if let Some(label) = figure.x_label() {
        mesh.x_desc(label);
    }
    if let Some(label) = figure.y_label() {
        mesh.y_desc(label);
    }
    mesh.draw()?;

    if !points.is_empty() {
        chart.draw_series(LineSeries::new(
            points.iter().map(|(date, total)| (offset(*date), *total)),
            &LINE_COLOR,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_rgb_buffer_as_png() {
        let rgb = [255u8, 0, 0, 0, 255, 0];
        let png = encode_png(&rgb, 2, 1).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
    }

    #[test]
    fn zero_sized_figures_are_rejected() {
        let counts = carelog_model::DiaperOutcomeCounts::new();
        let figure = Figure::bar(&counts, "Empty").with_size(crate::FigureSize::new(0, 100));
        let err = PlottersRenderer::new().render(&figure).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidSize {
                width: 0,
                height: 100
            }
        ));
    }
}
