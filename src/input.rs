//! Fleet input loading.
//!
//! # Format
//!
//! ```text
//! 3
//! 1 5 0 10
//! 2 3 0 5
//! 3 5 2 4
//! ```
//!
//! The first non-blank line is the shuttle count N, followed by N records of
//! `id priority arrival service` separated by whitespace. Blank lines are
//! skipped; anything after the N-th record is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ChargeError, Result};
use crate::models::{Fleet, Shuttle, Time};

/// Parses a fleet from text.
pub fn parse_fleet(text: &str) -> Result<Fleet> {
    read_fleet(text.as_bytes())
}

/// Loads a fleet from a file.
pub fn load_fleet(path: impl AsRef<Path>) -> Result<Fleet> {
    let path = path.as_ref();
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "loading fleet");
    read_fleet(BufReader::new(file))
}

/// Reads a fleet from any buffered reader.
pub fn read_fleet(reader: impl BufRead) -> Result<Fleet> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.trim().is_empty()));

    let count = match lines.next() {
        Some((line_no, line)) => parse_count(line_no, &line?)?,
        None => return Err(ChargeError::malformed("missing shuttle count")),
    };
    if count == 0 {
        return Err(ChargeError::EmptyFleet);
    }

    let mut shuttles = Vec::with_capacity(count);
    for (line_no, line) in lines.by_ref() {
        shuttles.push(parse_record(line_no, &line?)?);
        if shuttles.len() == count {
            break;
        }
    }

    if shuttles.len() < count {
        return Err(ChargeError::malformed(format!(
            "expected {count} shuttle records, found {}",
            shuttles.len()
        )));
    }

    if let Some((line_no, _)) = lines.next() {
        tracing::warn!(line = line_no, "ignoring input after the last shuttle record");
    }

    Fleet::new(shuttles)
}

/// Renders a fleet in the input format, in arrival order.
pub fn format_fleet(fleet: &Fleet) -> String {
    let mut out = format!("{}\n", fleet.len());
    for s in fleet {
        out.push_str(&format!("{} {} {} {}\n", s.id, s.priority, s.arrival, s.service));
    }
    out
}

fn parse_count(line_no: usize, line: &str) -> Result<usize> {
    line.trim().parse::<usize>().map_err(|e| {
        ChargeError::malformed_at(line_no, format!("invalid shuttle count '{}': {e}", line.trim()))
    })
}

fn parse_record(line_no: usize, line: &str) -> Result<Shuttle> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(ChargeError::malformed_at(
            line_no,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }

    let id = parse_field(line_no, "id", fields[0])?;
    let priority = parse_field(line_no, "priority", fields[1])?;
    let arrival: Time = parse_field(line_no, "arrival", fields[2])?;
    let service = parse_field(line_no, "service", fields[3])?;

    if arrival < 0 {
        return Err(ChargeError::malformed_at(
            line_no,
            format!("arrival {arrival} is negative"),
        ));
    }
    if service <= 0 {
        return Err(ChargeError::malformed_at(
            line_no,
            format!("service {service} is not positive"),
        ));
    }
    if arrival.checked_add(service).is_none() {
        return Err(ChargeError::malformed_at(
            line_no,
            format!("arrival {arrival} + service {service} overflows"),
        ));
    }

    Ok(Shuttle::new(id, priority, arrival, service))
}

fn parse_field<T>(line_no: usize, name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| ChargeError::malformed_at(line_no, format!("invalid {name} '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tracing_test::traced_test;

    const SAMPLE: &str = "3\n1 5 0 10\n2 3 0 5\n3 5 2 4\n";

    #[test]
    fn test_parse_sample() {
        let fleet = parse_fleet(SAMPLE).unwrap();
        assert_eq!(
            fleet.shuttles(),
            &[
                Shuttle::new(1, 5, 0, 10),
                Shuttle::new(2, 3, 0, 5),
                Shuttle::new(3, 5, 2, 4),
            ]
        );
    }

    #[test]
    fn test_parse_sorts_by_arrival() {
        let fleet = parse_fleet("2\n1 0 9 5\n2 0 3 5\n").unwrap();
        assert_eq!(fleet.get(0).map(|s| s.id), Some(2));
    }

    #[test]
    fn test_blank_lines_and_extra_whitespace() {
        let fleet = parse_fleet("\n 2 \n\n1\t5  0 10\n\n  2 3 0 5  \n").unwrap();
        assert_eq!(fleet.len(), 2);
    }

    #[test]
    fn test_zero_count_is_empty_fleet() {
        assert!(matches!(parse_fleet("0\n"), Err(ChargeError::EmptyFleet)));
    }

    #[test]
    fn test_missing_count() {
        assert!(matches!(
            parse_fleet("   \n"),
            Err(ChargeError::MalformedInput { line: None, .. })
        ));
    }

    #[test]
    fn test_bad_count() {
        let err = parse_fleet("three\n1 5 0 10\n").unwrap_err();
        assert!(matches!(
            err,
            ChargeError::MalformedInput { line: Some(1), .. }
        ));
    }

    #[test]
    fn test_negative_count() {
        assert!(parse_fleet("-1\n").is_err());
    }

    #[test]
    fn test_too_few_records() {
        let err = parse_fleet("3\n1 5 0 10\n").unwrap_err();
        assert!(err.to_string().contains("expected 3 shuttle records, found 1"));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_fleet("1\n1 5 0\n").unwrap_err();
        assert!(matches!(
            err,
            ChargeError::MalformedInput { line: Some(2), .. }
        ));
    }

    #[test]
    fn test_non_integer_field() {
        let err = parse_fleet("2\n1 5 0 10\n2 high 0 5\n").unwrap_err();
        assert!(matches!(
            err,
            ChargeError::MalformedInput { line: Some(3), ref reason } if reason.contains("priority")
        ));
    }

    #[test]
    fn test_negative_arrival() {
        let err = parse_fleet("1\n1 5 -3 10\n").unwrap_err();
        assert!(err.to_string().contains("arrival -3 is negative"));
    }

    #[test]
    fn test_non_positive_service() {
        let err = parse_fleet("1\n1 5 0 0\n").unwrap_err();
        assert!(err.to_string().contains("service 0 is not positive"));
    }

    #[test]
    fn test_completion_overflow_rejected() {
        let err = parse_fleet("1\n1 0 9223372036854775807 1\n").unwrap_err();
        assert!(matches!(
            err,
            ChargeError::MalformedInput { line: Some(2), ref reason } if reason.contains("overflows")
        ));
    }

    #[test]
    fn test_fleet_horizon_overflow_rejected() {
        let err = parse_fleet("2\n1 0 9223372036854775800 5\n2 0 0 20\n").unwrap_err();
        assert!(err.to_string().contains("total service time overflows"));
    }

    #[test]
    fn test_duplicate_ids() {
        let err = parse_fleet("2\n1 5 0 10\n1 3 0 5\n").unwrap_err();
        assert!(err.to_string().contains("Duplicate shuttle ID: 1"));
    }

    #[test]
    #[traced_test]
    fn test_trailing_records_ignored() {
        let fleet = parse_fleet("1\n1 5 0 10\n2 3 0 5\n").unwrap();
        assert_eq!(fleet.len(), 1);
        assert!(logs_contain("ignoring input after the last shuttle record"));
    }

    #[test]
    fn test_format_fleet_reparses() {
        let fleet = parse_fleet("2\n7 1 9 5\n4 2 3 6\n").unwrap();
        let text = format_fleet(&fleet);
        assert_eq!(text, "2\n4 2 3 6\n7 1 9 5\n");
        assert_eq!(parse_fleet(&text).unwrap().shuttles(), fleet.shuttles());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fleet = load_fleet(file.path()).unwrap();
        assert_eq!(fleet.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_fleet(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, ChargeError::Io(_)));
    }
}
