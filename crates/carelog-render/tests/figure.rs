//! Integration tests for figures and the renderer seam.

use std::cell::RefCell;

use chrono::NaiveDate;

use carelog_model::{CumulativeSeries, DerivedSeries, DiaperOutcomeCounts};
use carelog_render::{
    BAR_X_LABEL, Bar, Figure, FigureData, FigureSize, RenderError, RenderedImage, Renderer,
    encode_png,
};

/// Records the figures it is asked to draw.
#[derive(Default)]
struct RecordingRenderer {
    seen: RefCell<Vec<Figure>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, figure: &Figure) -> Result<RenderedImage, RenderError> {
        self.seen.borrow_mut().push(figure.clone());
        let size = figure.size();
        let rgb = vec![255u8; size.rgb_len()];
        Ok(RenderedImage {
            width: size.width,
            height: size.height,
            png: encode_png(&rgb, size.width, size.height)?,
        })
    }
}

fn counts() -> DiaperOutcomeCounts {
    [Some("wet"), Some("dirty"), Some("wet"), None]
        .into_iter()
        .collect()
}

#[test]
fn bar_figure_carries_title_and_count_label() {
    let figure = Figure::bar(&counts(), "Types of diapers");

    assert_eq!(figure.title(), Some("Types of diapers"));
    assert_eq!(figure.x_label(), Some(BAR_X_LABEL));
    assert_eq!(figure.y_label(), None);
    assert_eq!(figure.size(), FigureSize::new(640, 480));
    assert_eq!(
        figure.data(),
        &FigureData::Bars(vec![
            Bar {
                label: "dirty".to_string(),
                value: 1
            },
            Bar {
                label: "wet".to_string(),
                value: 2
            },
            Bar {
                label: "(unrecorded)".to_string(),
                value: 1
            },
        ])
    );
}

#[test]
fn cumulative_figure_uses_series_label_and_dated_points() {
    let day = NaiveDate::from_ymd_opt(2024, 1, 5);
    let mut series = CumulativeSeries::new("Oz of formula or breast milk");
    series.push(day, 4.0);
    series.push(None, 1.0);

    let figure = Figure::cumulative(&series);
    assert_eq!(figure.title(), None);
    assert_eq!(figure.y_label(), Some("Oz of formula or breast milk"));
    assert_eq!(
        figure.data(),
        &FigureData::Line(vec![(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), 4.0)])
    );
}

#[test]
fn from_series_dispatches_on_kind() {
    let bar = Figure::from_series(&DerivedSeries::Counts(counts()), "Diapers");
    assert!(matches!(bar.data(), FigureData::Bars(_)));

    let line = Figure::from_series(
        &DerivedSeries::Cumulative(CumulativeSeries::new("Time nursing (min)")),
        "Nursing",
    );
    assert_eq!(line.title(), Some("Nursing"));
    assert!(line.is_empty());
}

#[test]
fn renderer_receives_each_figure_explicitly() {
    let renderer = RecordingRenderer::default();
    let first = Figure::bar(&counts(), "First").with_size(FigureSize::new(4, 3));
    let second =
        Figure::bar(&DiaperOutcomeCounts::new(), "Second").with_size(FigureSize::new(2, 2));

    let image = renderer.render(&first).unwrap();
    renderer.render(&second).unwrap();

    assert_eq!((image.width, image.height), (4, 3));
    let seen = renderer.seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].title(), Some("First"));
    assert_eq!(seen[1].title(), Some("Second"));
    assert!(seen[1].is_empty());
}

#[test]
fn rendered_image_saves_png_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diaper_types.png");
    let image = RecordingRenderer::default()
        .render(&Figure::bar(&counts(), "Saved").with_size(FigureSize::new(3, 2)))
        .unwrap();

    image.save(&path).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), image.png);
}

#[test]
fn save_reports_the_failing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("chart.png");
    let image = RenderedImage {
        width: 1,
        height: 1,
        png: Vec::new(),
    };

    let err = image.save(&path).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
    assert!(err.to_string().contains("chart.png"));
}
