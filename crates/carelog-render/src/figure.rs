//! Chart figures.
//!
//! A [`Figure`] is a plain value describing one chart. Builders return it and
//! callers hand it to a [`Renderer`](crate::Renderer) explicitly, so two
//! requests never share drawing state.

use chrono::NaiveDate;

use carelog_model::{CumulativeSeries, DerivedSeries, DiaperOutcomeCounts};

/// X-axis label of outcome bar charts.
pub const BAR_X_LABEL: &str = "Count";

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl FigureSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bytes needed for an RGB buffer of this size.
    pub fn rgb_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(640, 480)
    }
}

/// One labelled bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

/// What a figure draws.
#[derive(Debug, Clone, PartialEq)]
pub enum FigureData {
    /// Categorical bars in display order.
    Bars(Vec<Bar>),
    /// Date-ordered running totals, drawn with rotated date ticks.
    Line(Vec<(NaiveDate, f64)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    title: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    size: FigureSize,
    data: FigureData,
}

impl Figure {
    /// Bar chart of diaper outcomes with x-axis label `"Count"`.
    pub fn bar(counts: &DiaperOutcomeCounts, title: impl Into<String>) -> Self {
        let bars = counts
            .labelled()
            .map(|(label, value)| Bar {
                label: label.to_string(),
                value,
            })
            .collect();
        Self {
            title: Some(title.into()),
            x_label: Some(BAR_X_LABEL.to_string()),
            y_label: None,
            size: FigureSize::default(),
            data: FigureData::Bars(bars),
        }
    }

    /// Line chart of a running total against date.
    ///
    /// Points without a date cannot be placed on the time axis and are left
    /// out.
    pub fn cumulative(series: &CumulativeSeries) -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: Some(series.y_label().to_string()),
            size: FigureSize::default(),
            data: FigureData::Line(series.dated_points().collect()),
        }
    }

    /// Figure for any derived series; `title` becomes the chart caption.
    pub fn from_series(series: &DerivedSeries, title: impl Into<String>) -> Self {
        match series {
            DerivedSeries::Counts(counts) => Self::bar(counts, title),
            DerivedSeries::Cumulative(series) => Self::cumulative(series).with_title(title),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: FigureSize) -> Self {
        self.size = size;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_label(&self) -> Option<&str> {
        self.x_label.as_deref()
    }

    pub fn y_label(&self) -> Option<&str> {
        self.y_label.as_deref()
    }

    pub fn size(&self) -> FigureSize {
        self.size
    }

    pub fn data(&self) -> &FigureData {
        &self.data
    }

    /// True when there is nothing to draw besides the axes.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            FigureData::Bars(bars) => bars.is_empty(),
            FigureData::Line(points) => points.is_empty(),
        }
    }
}
