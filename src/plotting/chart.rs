use plotters::coord::ranged1d::ValueFormatter;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::axis::TimeAxis;
use super::styles::{ChartStyle, ChartTheme};
use crate::error::{ActivityError, Result};
use crate::types::WeeklySeries;

type PlotError = Box<dyn Error + Send + Sync>;

pub const Y_AXIS_DESCRIPTION: &str = "Number of Commits (weekly)";

/// Draws a weekly series and writes it as an image file.
pub trait ChartRenderer {
    fn render(&self, title: &str, series: &WeeklySeries, axis: &TimeAxis, path: &Path) -> Result<()>;
}

/// Renders line-and-marker charts to PNG with plotters.
#[derive(Default)]
pub struct PlottersRenderer {
    pub theme: ChartTheme,
    pub style: ChartStyle,
}

impl PlottersRenderer {
    pub fn new(theme: ChartTheme, style: ChartStyle) -> Self {
        Self { theme, style }
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, title: &str, series: &WeeklySeries, axis: &TimeAxis, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, self.style.size).into_drawing_area();
        draw_chart(self, &root, title, series, axis).map_err(|e| ActivityError::render(title, e))?;
        root.present().map_err(|e| ActivityError::render(title, e))?;
        Ok(())
    }
}

fn draw_chart(
    renderer: &PlottersRenderer,
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    title: &str,
    series: &WeeklySeries,
    axis: &TimeAxis,
) -> std::result::Result<(), PlotError> {
    let theme = &renderer.theme;
    let style = &renderer.style;

    root.fill(&theme.background_color)?;

    // Pin the top of the scale to the busiest week
    let y_max = series.max_count.max(1) as f64;

    let mut chart = ChartBuilder::on(root)
        .caption(
            title,
            ("sans-serif", style.title_font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size)
        .build_cartesian_2d(axis.clone(), 0f64..y_max)?;

    let label_style = ("sans-serif", style.font_size)
        .into_font()
        .color(&theme.text_color);

    chart
        .configure_mesh()
        .light_line_style(theme.grid_color)
        .bold_line_style(theme.bold_grid_color)
        .axis_style(theme.axis_color)
        .x_labels(axis.labeled().count().max(1))
        .x_label_formatter(&|x| axis.format_ext(x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .y_desc(Y_AXIS_DESCRIPTION)
        .label_style(label_style)
        .draw()?;

    let points: Vec<(f64, f64)> = series
        .buckets
        .iter()
        .map(|b| (b.start as f64, b.count as f64))
        .collect();

    chart.draw_series(LineSeries::new(
        points.iter().copied(),
        theme.line_color.stroke_width(style.line_width),
    ))?;

    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, style.marker_size, theme.marker_color.stroke_width(1))),
    )?;

    Ok(())
}
