use std::ops::Range;

// ---------------------------------------------------------------------------
// DataPoint – one line of the input file
// ---------------------------------------------------------------------------

/// A single measurement: the initial live-cell density of a board and the
/// number of generations it ran before settling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    pub density: f64,
    pub generation: i64,
}

impl DataPoint {
    pub fn new(density: f64, generation: i64) -> Self {
        Self {
            density,
            generation,
        }
    }

    /// Plot coordinates: x = density, y = generation.
    pub fn as_xy(&self) -> (f64, f64) {
        // exact up to 2^53 generations, rounded beyond that
        (self.density, self.generation as f64)
    }
}

// ---------------------------------------------------------------------------
// Bounds – per-axis extent of a dataset
// ---------------------------------------------------------------------------

/// Closed min/max interval of each plot axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    /// Axis range with a 5 % margin on each side.
    ///
    /// A zero-width span is widened so that a single point still lands in
    /// the middle of a usable axis.
    pub fn padded_x(&self) -> Range<f64> {
        pad_span(self.x)
    }

    pub fn padded_y(&self) -> Range<f64> {
        pad_span(self.y)
    }
}

fn pad_span((lo, hi): (f64, f64)) -> Range<f64> {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        let pad = if lo.abs() > 1.0 { lo.abs() * 0.05 } else { 0.5 };
        return (lo - pad)..(hi + pad);
    }
    let pad = span * 0.05;
    (lo - pad)..(hi + pad)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// Data points in file order. Built once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Points as `(x, y)` pairs in plotting order.
    pub fn xy(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points().iter().map(DataPoint::as_xy)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Min/max of both axes, or `None` when there is nothing to plot.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut xy = self.xy();
        let (x0, y0) = xy.next()?;
        let init = Bounds {
            x: (x0, x0),
            y: (y0, y0),
        };
        Some(xy.fold(init, |b, (x, y)| Bounds {
            x: (b.x.0.min(x), b.x.1.max(x)),
            y: (b.y.0.min(y), b.y.1.max(y)),
        }))
    }
}

impl FromIterator<DataPoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
