//! Loading points from comma-separated text.
//!
//! One point per line. The first seven fields are the coordinates; any
//! further fields are ignored. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::point::{Point, DIM};

/// Parse points from a reader.
pub fn read_points<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut points = Vec::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut coords = [0.0; DIM];
        let mut found = 0;
        for (field, token) in line.split(',').take(DIM).enumerate() {
            let token = token.trim();
            coords[field] = token.parse::<f64>().map_err(|_| Error::ParseRecord {
                line: line_idx + 1,
                field,
                value: token.to_string(),
            })?;
            found += 1;
        }
        if found < DIM {
            return Err(Error::DimensionMismatch {
                line: line_idx + 1,
                expected: DIM,
                found,
            });
        }

        points.push(Point::new(coords));
    }

    log::debug!("read {} points", points.len());
    Ok(points)
}

/// Open `path` and parse its points.
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let file = File::open(path.as_ref())?;
    read_points(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_records() {
        let text = "0,0,0,0,0,0,0\n1.5, -2, 3e-1,0,0,0,7\n";
        let points = read_points(Cursor::new(text)).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].coords, [1.5, -2.0, 0.3, 0.0, 0.0, 0.0, 7.0]);
        assert!(!points[1].processed);
    }

    #[test]
    fn test_extra_fields_and_blank_lines() {
        let text = "\n1,2,3,4,5,6,7,label\n   \n";
        let points = read_points(Cursor::new(text)).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].coords, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_short_record() {
        let err = read_points(Cursor::new("0,0,0,0,0,0,0\n\n1,2,3\n")).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                line: 3,
                expected: 7,
                found: 3
            }
        ));
    }

    #[test]
    fn test_bad_field_reports_position() {
        let err = read_points(Cursor::new("0,0,0,0,0,0,0\n0,0,x,0,0,0,0\n")).unwrap_err();
        match err {
            Error::ParseRecord { line, field, value } => {
                assert_eq!(line, 2);
                assert_eq!(field, 2);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_coordinates_are_kept() {
        let points = read_points(Cursor::new("NaN,inf,-inf,0,0,0,0\n")).unwrap();
        assert_eq!(points.len(), 1);
        assert!(points[0].coords[0].is_nan());
        assert_eq!(points[0].coords[1], f64::INFINITY);
        assert_eq!(points[0].coords[2], f64::NEG_INFINITY);
    }

    #[test]
    fn test_empty_source() {
        assert!(read_points(Cursor::new("")).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_points("/nonexistent/points.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
