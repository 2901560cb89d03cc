//! CSV ingestion of arm records.
//!
//! Two row shapes are supported: `arm_name,successes,trials` for historical
//! scoring and `arm_name,true_rate` for synthetic learning runs. Blank lines
//! are skipped; anything else malformed is fatal.

use std::io::BufRead;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Malformed input line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Invalid count on line {line}: {source}")]
    InvalidCount {
        line: usize,
        source: std::num::ParseIntError,
    },

    #[error("Invalid rate on line {line}: {source}")]
    InvalidRate {
        line: usize,
        source: std::num::ParseFloatError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One historical arm record: name, success count, trial count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRecord {
    pub name: String,
    pub successes: u64,
    pub trials: u64,
}

/// One synthetic arm record: name and true success probability.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub name: String,
    pub rate: f64,
}

/// Parse `name,successes,trials` rows, one arm per line.
pub fn parse_counts(reader: impl BufRead) -> Result<Vec<CountRecord>, InputError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let number = index + 1;
        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() != 3 {
            return Err(InputError::MalformedLine {
                line: number,
                content: trimmed.to_string(),
            });
        }

        let successes = parts[1]
            .trim()
            .parse()
            .map_err(|source| InputError::InvalidCount {
                line: number,
                source,
            })?;
        let trials = parts[2]
            .trim()
            .parse()
            .map_err(|source| InputError::InvalidCount {
                line: number,
                source,
            })?;

        records.push(CountRecord {
            name: parts[0].trim().to_string(),
            successes,
            trials,
        });
    }
    Ok(records)
}

/// Parse `name,true_rate` rows, one arm per line.
pub fn parse_rates(reader: impl BufRead) -> Result<Vec<RateRecord>, InputError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let number = index + 1;
        let parts: Vec<&str> = trimmed.split(',').collect();
        if parts.len() != 2 {
            return Err(InputError::MalformedLine {
                line: number,
                content: trimmed.to_string(),
            });
        }

        let rate = parts[1]
            .trim()
            .parse()
            .map_err(|source| InputError::InvalidRate {
                line: number,
                source,
            })?;

        records.push(RateRecord {
            name: parts[0].trim().to_string(),
            rate,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_counts() {
        let input = "A,40,100\nB,60,100\n";
        let records = parse_counts(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            CountRecord {
                name: "A".to_string(),
                successes: 40,
                trials: 100,
            }
        );
        assert_eq!(records[1].name, "B");
        assert_eq!(records[1].successes, 60);
    }

    #[test]
    fn test_parse_counts_skips_blank_lines() {
        let input = "A,40,100\n\n  \nB,60,100\n";
        let records = parse_counts(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_counts_trims_fields() {
        let input = " A , 40 , 100 \n";
        let records = parse_counts(input.as_bytes()).unwrap();
        assert_eq!(records[0].name, "A");
        assert_eq!(records[0].trials, 100);
    }

    #[test]
    fn test_parse_counts_wrong_field_count() {
        let result = parse_counts("A,40\n".as_bytes());
        assert!(matches!(
            result,
            Err(InputError::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_counts_non_numeric() {
        let result = parse_counts("A,40,100\nB,sixty,100\n".as_bytes());
        assert!(matches!(
            result,
            Err(InputError::InvalidCount { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_counts_rejects_negative() {
        // Counts are unsigned; a negative field is a parse error.
        let result = parse_counts("A,-1,100\n".as_bytes());
        assert!(matches!(
            result,
            Err(InputError::InvalidCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_rates() {
        let input = "low,0.10\nhigh,0.50\n";
        let records = parse_rates(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "low");
        assert_eq!(records[0].rate, 0.10);
        assert_eq!(records[1].rate, 0.50);
    }

    #[test]
    fn test_parse_rates_malformed() {
        let result = parse_rates("low,0.1,extra\n".as_bytes());
        assert!(matches!(
            result,
            Err(InputError::MalformedLine { line: 1, .. })
        ));

        let result = parse_rates("low,abc\n".as_bytes());
        assert!(matches!(result, Err(InputError::InvalidRate { line: 1, .. })));
    }
}
