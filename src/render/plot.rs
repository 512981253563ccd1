use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;

use image::{ImageError, ImageFormat, Rgb, RgbImage};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::data::model::Dataset;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Plot style
// ---------------------------------------------------------------------------

/// Fixed presentation of the density/generation chart.
///
/// Sizes are given in typographic points and scaled to pixels by `dpi`, so
/// the figure keeps its proportions at any resolution.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    /// Figure size in inches.
    pub size_in: (f64, f64),
    pub dpi: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
    pub background: RGBColor,
    pub grid: bool,
    /// Whitespace kept around the trimmed content, in inches.
    pub pad_in: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            size_in: (10.0, 6.0),
            dpi: 300.0,
            title: "Dependence of Generation on Density".to_string(),
            x_label: "Density".to_string(),
            y_label: "Generation".to_string(),
            color: BLUE,
            background: WHITE,
            grid: true,
            pad_in: 0.1,
        }
    }
}

impl PlotStyle {
    /// Canvas size in pixels before trimming.
    pub fn canvas_size(&self) -> (u32, u32) {
        let (w, h) = self.size_in;
        ((w * self.dpi).round() as u32, (h * self.dpi).round() as u32)
    }

    fn px(&self, points: f64) -> u32 {
        (points * self.dpi / 72.0).round().max(1.0) as u32
    }

    fn font(&self, points: f64) -> f64 {
        points * self.dpi / 72.0
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws a [`Dataset`] as a marked line chart and writes it as PNG.
///
/// Every call builds its own drawing backend over a private buffer, so one
/// renderer can be reused for any number of datasets.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    style: PlotStyle,
}

impl Renderer {
    pub fn new(style: PlotStyle) -> Self {
        Self { style }
    }

    /// Render `dataset` and write the trimmed image to `path`.
    ///
    /// The output file is only created once drawing has succeeded.
    pub fn render(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        let canvas = self.draw(dataset)?;
        let pad = (self.style.pad_in * self.style.dpi).round() as u32;
        let image = trim(&canvas, to_rgb(self.style.background), pad);
        debug!(
            "trimmed {}x{} canvas to {}x{}",
            canvas.width(),
            canvas.height(),
            image.width(),
            image.height()
        );

        save_png(&image, path)?;
        info!(
            "wrote {}x{} plot of {} points to {}",
            image.width(),
            image.height(),
            dataset.len(),
            path.display()
        );
        Ok(())
    }

    /// Draw the full, untrimmed canvas into memory.
    pub fn draw(&self, dataset: &Dataset) -> Result<RgbImage> {
        let (x_range, y_range) = axis_ranges(dataset)?;
        let (w, h) = self.style.canvas_size();
        let mut buf = vec![0u8; w as usize * h as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            self.draw_chart(&root, dataset, x_range, y_range)
                .map_err(|e| Error::Render(e.to_string()))?;
            root.present().map_err(|e| Error::Render(e.to_string()))?;
        }
        RgbImage::from_raw(w, h, buf)
            .ok_or_else(|| Error::Render("pixel buffer does not match canvas size".into()))
    }

    fn draw_chart<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        dataset: &Dataset,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        let s = &self.style;

        root.fill(&s.background)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&s.title, ("sans-serif", s.font(12.0)))
            .margin(s.px(12.0))
            .x_label_area_size(s.px(36.0))
            .y_label_area_size(s.px(48.0))
            .build_cartesian_2d(x_range, y_range)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(s.x_label.as_str())
            .y_desc(s.y_label.as_str())
            .axis_desc_style(("sans-serif", s.font(10.0)))
            .label_style(("sans-serif", s.font(10.0)))
            .axis_style(BLACK.stroke_width(s.px(0.8)))
            .bold_line_style(BLACK.mix(0.2).stroke_width(s.px(0.8)))
            .max_light_lines(0);
        if !s.grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        if dataset.is_empty() {
            return Ok(());
        }

        let points: Vec<(f64, f64)> = dataset.xy().collect();
        chart.draw_series(LineSeries::new(
            points.iter().copied(),
            s.color.stroke_width(s.px(1.5)),
        ))?;
        chart.draw_series(
            points
                .iter()
                .map(|&p| Circle::new(p, s.px(3.0), s.color.filled())),
        )?;

        Ok(())
    }
}

/// Axis ranges covering the data; unit ranges for an empty dataset.
///
/// Fails when padding pushes an axis past the largest finite `f64`, since
/// the chart cannot lay out ticks on an unbounded axis.
pub fn axis_ranges(dataset: &Dataset) -> Result<(Range<f64>, Range<f64>)> {
    let Some(b) = dataset.bounds() else {
        return Ok((0.0..1.0, 0.0..1.0));
    };
    let (x, y) = (b.padded_x(), b.padded_y());
    for (axis, range) in [("density", &x), ("generation", &y)] {
        if !(range.start.is_finite() && range.end.is_finite()) {
            return Err(Error::Render(format!(
                "{axis} axis range {}..{} is not finite",
                range.start, range.end
            )));
        }
    }
    Ok((x, y))
}

// ---------------------------------------------------------------------------
// Tight layout / PNG output
// ---------------------------------------------------------------------------

fn to_rgb(color: RGBColor) -> Rgb<u8> {
    let RGBColor(r, g, b) = color;
    Rgb([r, g, b])
}

/// Crop `image` to the bounding box of every pixel that differs from
/// `background`, keeping `pad` pixels of margin where the canvas allows.
pub fn trim(image: &RgbImage, background: Rgb<u8>, pad: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let mut bbox: Option<(u32, u32, u32, u32)> = None;

    for (x, y, px) in image.enumerate_pixels() {
        if *px == background {
            continue;
        }
        bbox = Some(match bbox {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    let Some((x0, y0, x1, y1)) = bbox else {
        return image.clone();
    };
    let left = x0.saturating_sub(pad);
    let top = y0.saturating_sub(pad);
    let right = (x1 + 1 + pad).min(w);
    let bottom = (y1 + 1 + pad).min(h);

    image::imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}

fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => Error::io(path, source),
            other => Error::Render(other.to_string()),
        })?;
    writer.flush().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DataPoint;

    /// Small canvas so tests stay fast; proportions match the default.
    fn test_renderer() -> Renderer {
        Renderer::new(PlotStyle {
            dpi: 40.0,
            ..PlotStyle::default()
        })
    }

    fn sample() -> Dataset {
        [
            DataPoint::new(0.1, 10),
            DataPoint::new(0.2, 25),
            DataPoint::new(0.3, 50),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn default_canvas_is_ten_by_six_inches_at_300_dpi() {
        let style = PlotStyle::default();
        assert_eq!(style.canvas_size(), (3000, 1800));
        assert_eq!(style.px(1.5), 6);
    }

    #[test]
    fn ranges_cover_the_data() {
        let (x, y) = axis_ranges(&sample()).unwrap();
        assert!(x.start <= 0.1 && x.end >= 0.3);
        assert!(y.start <= 10.0 && y.end >= 50.0);

        let (x, y) = axis_ranges(&Dataset::default()).unwrap();
        assert_eq!((x, y), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn overflowing_range_is_rejected() {
        let ds: Dataset = [DataPoint::new(0.0, 1), DataPoint::new(f64::MAX, 2)]
            .into_iter()
            .collect();
        assert!(matches!(axis_ranges(&ds), Err(Error::Render(_))));

        let ds: Dataset = [DataPoint::new(-1e308, 1), DataPoint::new(1e308, 2)]
            .into_iter()
            .collect();
        assert!(matches!(test_renderer().draw(&ds), Err(Error::Render(_))));
    }

    #[test]
    fn overflowing_range_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let ds: Dataset = [DataPoint::new(0.0, 1), DataPoint::new(f64::MAX, 2)]
            .into_iter()
            .collect();

        assert!(test_renderer().render(&ds, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn extreme_generations_stay_finite() {
        let ds: Dataset = [DataPoint::new(0.1, i64::MIN), DataPoint::new(0.2, i64::MAX)]
            .into_iter()
            .collect();
        let (_, y) = axis_ranges(&ds).unwrap();
        assert!(y.start.is_finite() && y.end.is_finite());
    }

    #[test]
    fn trim_crops_to_content_plus_pad() {
        let white = Rgb([255, 255, 255]);
        let mut img = RgbImage::from_pixel(100, 80, white);
        img.put_pixel(40, 30, Rgb([0, 0, 255]));
        img.put_pixel(60, 50, Rgb([0, 0, 0]));

        let out = trim(&img, white, 5);
        assert_eq!(out.dimensions(), (31, 31));
        assert_eq!(*out.get_pixel(5, 5), Rgb([0, 0, 255]));

        // pad is clamped at the canvas edge
        let out = trim(&img, white, 50);
        assert_eq!(out.dimensions(), (100, 80));
    }

    #[test]
    fn trim_keeps_blank_image() {
        let white = Rgb([255, 255, 255]);
        let img = RgbImage::from_pixel(10, 10, white);
        assert_eq!(trim(&img, white, 2).dimensions(), (10, 10));
    }

    #[test]
    fn draws_markers_in_line_color() {
        let renderer = test_renderer();
        let canvas = renderer.draw(&sample()).unwrap();
        assert_eq!(canvas.dimensions(), renderer.style.canvas_size());
        let blue = canvas.pixels().filter(|p| **p == Rgb([0, 0, 255])).count();
        assert!(blue > 0);
    }

    #[test]
    fn renders_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        let renderer = test_renderer();

        renderer.render(&sample(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        let (cw, ch) = renderer.style.canvas_size();
        assert!(img.width() <= cw && img.height() <= ch);
        assert!(img.pixels().any(|p| *p == Rgb([0, 0, 255])));
    }

    #[test]
    fn empty_dataset_still_produces_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        test_renderer().render(&Dataset::default(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert!(img.width() > 0 && img.height() > 0);
        assert!(!img.pixels().any(|p| *p == Rgb([0, 0, 255])));
    }

    #[test]
    fn missing_output_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("plot.png");

        let err = test_renderer().render(&sample(), &path).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(!path.exists());
    }
}
