use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, trace};

use super::model::{DataPoint, Dataset};
use crate::error::{Error, ParseErrorKind, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a density/generation table.
///
/// Layout:
/// ```text
/// density generation     <- header, always skipped
/// 0,05 37
/// 0,1 112
/// ```
/// Each data line holds a density (either `,` or `.` as decimal separator)
/// and an integer generation count. Blank lines are ignored. The first bad
/// line aborts the whole load.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut lines = BufReader::new(file).lines();

    if let Some(header) = lines.next() {
        let header = header.map_err(|e| Error::io(path, e))?;
        trace!("skipping header: {header:?}");
    }

    let mut points = Vec::new();

    // line 1 is the header
    for (line_no, line) in (2..).zip(lines) {
        let line = line.map_err(|e| Error::io(path, e))?;
        if line.trim().is_empty() {
            debug!("line {line_no}: blank, skipped");
            continue;
        }

        let point = parse_line(&line).map_err(|kind| Error::Parse {
            line: line_no,
            content: line.clone(),
            kind,
        })?;
        points.push(point);
    }

    info!("loaded {} points from {}", points.len(), path.display());
    Ok(Dataset::new(points))
}

// ---------------------------------------------------------------------------
// Line / token parsing
// ---------------------------------------------------------------------------

/// Parse one `<density> <generation>` data line.
pub fn parse_line(line: &str) -> std::result::Result<DataPoint, ParseErrorKind> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [density, generation] = tokens.as_slice() else {
        return Err(ParseErrorKind::TokenCount {
            found: tokens.len(),
        });
    };

    let density = parse_density(density)?;
    let generation = generation
        .parse::<i64>()
        .map_err(|_| ParseErrorKind::Generation {
            token: generation.to_string(),
        })?;

    Ok(DataPoint::new(density, generation))
}

/// Parse a decimal that may use a comma as the decimal separator.
///
/// `inf`, `infinity` and `NaN` are rejected: they cannot be placed on an axis.
pub fn parse_density(token: &str) -> std::result::Result<f64, ParseErrorKind> {
    let invalid = || ParseErrorKind::Density {
        token: token.to_string(),
    };
    let value = token.replace(',', ".").parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
