//! Plotters rendering of chart descriptions into PNG files.
//!
//! Each chart gets its own `BitMapBackend` drawing area. The area is created,
//! handed to a draw function, presented, and dropped inside `render_png`, so
//! no drawing state is shared between charts and an error drops the area
//! before the next chart would start.

use std::path::{Path, PathBuf};

use log::debug;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::{BarChart, LineChart, Marker, PieChart, SALES_AXIS_LABEL, format_thousands};
use crate::error::AppError;

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult = Result<(), Box<dyn std::error::Error>>;

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 24;

/// Draw one chart into a fresh PNG canvas at `path`.
pub fn render_png<F>(path: &Path, size: (u32, u32), draw: F) -> Result<(), AppError>
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_and_present(&root, draw)
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))?;
    debug!("rendered {} ({}x{})", path.display(), size.0, size.1);
    Ok(())
}

fn draw_and_present<F>(root: &Canvas<'_>, draw: F) -> DrawResult
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    root.fill(&WHITE)?;
    draw(root)?;
    root.present()?;
    Ok(())
}

pub fn render_line_chart(dir: &Path, chart: &LineChart) -> Result<PathBuf, AppError> {
    let path = dir.join(chart.file_name);
    render_png(&path, chart.size, |root| draw_line_chart(root, chart))?;
    Ok(path)
}

pub fn render_bar_chart(dir: &Path, chart: &BarChart) -> Result<PathBuf, AppError> {
    let path = dir.join(chart.file_name);
    render_png(&path, chart.size, |root| draw_bar_chart(root, chart))?;
    Ok(path)
}

pub fn render_pie_chart(dir: &Path, chart: &PieChart) -> Result<PathBuf, AppError> {
    let path = dir.join(chart.file_name);
    render_png(&path, chart.size, |root| draw_pie_chart(root, chart))?;
    Ok(path)
}

fn title_font() -> FontDesc<'static> {
    (FONT, TITLE_SIZE).into_font().style(FontStyle::Bold)
}

fn draw_line_chart(root: &Canvas<'_>, chart: &LineChart) -> DrawResult {
    let [x0, x1] = chart.x_bounds();
    let [y0, y1] = chart.y_bounds;
    let bottom = if chart.rotate_x_labels { 100 } else { 50 };

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title, title_font())
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 100)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let fmt_x = |x: &f64| chart.label_at(*x);
    let fmt_y = |y: &f64| format_thousands(*y);
    let rotated = (FONT, 12).into_font().transform(FontTransform::Rotate90);

    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.x_label)
        .y_desc(SALES_AXIS_LABEL)
        .x_labels(chart.labels.len().clamp(1, 12))
        .y_labels(8)
        .x_label_formatter(&fmt_x)
        .y_label_formatter(&fmt_y);
    if chart.rotate_x_labels {
        mesh.x_label_style(rotated);
    }
    mesh.draw()?;

    let line_style = chart.color.stroke_width(chart.stroke_width);
    ctx.draw_series(LineSeries::new(chart.points(), line_style))?
        .label(chart.legend)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    match chart.marker {
        Marker::None => {}
        Marker::Circle => {
            ctx.draw_series(
                chart
                    .points()
                    .into_iter()
                    .map(|p| Circle::new(p, 5, chart.color.filled())),
            )?;
        }
        Marker::Square => {
            ctx.draw_series(chart.points().into_iter().map(|p| {
                EmptyElement::at(p) + Rectangle::new([(-5, -5), (5, 5)], chart.color.filled())
            }))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_bar_chart(root: &Canvas<'_>, chart: &BarChart) -> DrawResult {
    let n = chart.bars.len().max(1);
    let [y0, y1] = chart.y_bounds;

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title, title_font())
        .margin(15)
        .set_label_area_size(LabelAreaPosition::Left, 100)
        .set_label_area_size(LabelAreaPosition::Bottom, 140)
        .build_cartesian_2d((0..n).into_segmented(), y0..y1)?;

    let fmt_x = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => chart
            .bars
            .get(*i)
            .map(|b| b.label.clone())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    };
    let fmt_y = |y: &f64| format_thousands(*y);

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label)
        .y_desc(SALES_AXIS_LABEL)
        .x_labels(n + 1)
        .y_labels(8)
        .x_label_formatter(&fmt_x)
        .y_label_formatter(&fmt_y)
        .x_label_style((FONT, 12).into_font().transform(FontTransform::Rotate90))
        .draw()?;

    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), bar.value)],
            chart.color.filled(),
        );
        rect.set_margin(0, 0, 8, 8);
        rect
    }))?;

    let value_style = TextStyle::from((FONT, 13).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    ctx.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.annotation.clone(),
            (SegmentValue::CenterOf(i), bar.annotation_y),
            value_style.clone(),
        )
    }))?;

    Ok(())
}

fn draw_pie_chart(root: &Canvas<'_>, chart: &PieChart) -> DrawResult {
    let area = root.titled(chart.title, title_font())?;
    let (w, h) = area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = f64::from(w.min(h)) * 0.36;

    let centered = Pos::new(HPos::Center, VPos::Center);
    let name_style = TextStyle::from((FONT, 15).into_font()).pos(centered);
    let pct_style = TextStyle::from((FONT, 14).into_font()).pos(centered);
    let edge = chart.edge_color.stroke_width(chart.edge_width);

    for wedge in &chart.wedges {
        let outline = wedge_outline(center, radius, wedge.start_deg, wedge.end_deg);
        area.draw(&Polygon::new(outline.clone(), wedge.color.filled()))?;

        let mut border = outline;
        border.push(center);
        area.draw(&PathElement::new(border, edge))?;

        let mid = wedge.mid_deg();
        area.draw(&Text::new(
            wedge.label.clone(),
            polar(center, radius * 1.15, mid),
            name_style.clone(),
        ))?;
        area.draw(&Text::new(
            wedge.annotation.clone(),
            polar(center, radius * 0.6, mid),
            pct_style.clone(),
        ))?;
    }

    Ok(())
}

/// Pixel position at `radius` and `deg` (counter-clockwise from 3 o'clock).
fn polar(center: (i32, i32), radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Closed wedge outline: the center, then the arc from `start_deg` to
/// `end_deg` in steps of at most one degree.
fn wedge_outline(center: (i32, i32), radius: f64, start_deg: f64, end_deg: f64) -> Vec<(i32, i32)> {
    let sweep = end_deg - start_deg;
    let steps = sweep.abs().ceil().max(1.0) as usize;
    let mut out = Vec::with_capacity(steps + 2);
    out.push(center);
    for i in 0..=steps {
        let deg = start_deg + sweep * i as f64 / steps as f64;
        out.push(polar(center, radius, deg));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_measures_angles_counter_clockwise_from_three_oclock() {
        assert_eq!(polar((100, 100), 10.0, 0.0), (110, 100));
        assert_eq!(polar((100, 100), 10.0, 90.0), (100, 90));
        assert_eq!(polar((100, 100), 10.0, 180.0), (90, 100));
    }

    #[test]
    fn wedge_outline_spans_the_arc() {
        let pts = wedge_outline((0, 0), 100.0, 90.0, 180.0);
        assert_eq!(pts[0], (0, 0));
        assert_eq!(pts[1], (0, -100));
        assert_eq!(*pts.last().unwrap(), (-100, 0));
        assert_eq!(pts.len(), 92);
    }
}
