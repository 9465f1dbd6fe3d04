// Round-trip audit over a corpus of notation lines
use std::io::BufRead;

use chess_core::{decode, encode, DecodeError, Position};
use log::{info, warn};
use rayon::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// `encode(decode(line)) == line`
    RoundTrip,
    /// Decoded, but re-encoding produced different (canonical) text.
    Canonicalized { encoded: String },
    /// Re-encoding the canonical text changed it again.
    Unstable { encoded: String, reencoded: String },
    /// The canonical text itself failed to decode.
    Undecodable { encoded: String, error: DecodeError },
    Rejected(DecodeError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// 1-based line number in the corpus.
    pub line: usize,
    pub text: String,
    pub outcome: LineOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditSummary {
    pub total: usize,
    pub round_trips: usize,
    pub canonicalized: usize,
    pub unstable: usize,
    pub rejected: usize,
}

impl AuditSummary {
    /// True when no line broke the round-trip or idempotence laws.
    pub fn is_clean(&self) -> bool {
        self.canonicalized == 0 && self.unstable == 0 && self.rejected == 0
    }
}

fn check_line(text: &str) -> LineOutcome {
    let position = match decode(text) {
        Ok(position) => position,
        Err(err) => return LineOutcome::Rejected(err),
    };

    let encoded = encode(&position);
    if encoded == text {
        return LineOutcome::RoundTrip;
    }

    let redecoded = decode(&encoded);
    classify_reencoding(encoded, redecoded)
}

/// Second half of the idempotence check: `encoded` is the canonical text and
/// `redecoded` what `decode` made of it.
fn classify_reencoding(encoded: String, redecoded: Result<Position, DecodeError>) -> LineOutcome {
    match redecoded {
        Ok(again) => {
            let reencoded = encode(&again);
            if reencoded == encoded {
                LineOutcome::Canonicalized { encoded }
            } else {
                LineOutcome::Unstable { encoded, reencoded }
            }
        }
        Err(error) => LineOutcome::Undecodable { encoded, error },
    }
}

fn audit_numbered<S: AsRef<str> + Sync>(lines: &[(usize, S)]) -> Vec<LineReport> {
    lines
        .par_iter()
        .map(|(line, text)| {
            let text = text.as_ref();
            LineReport {
                line: *line,
                text: text.to_string(),
                outcome: check_line(text),
            }
        })
        .collect()
}

/// Checks every line in parallel. Reports come back in corpus order.
pub fn audit_lines<S: AsRef<str> + Sync>(lines: &[S]) -> Vec<LineReport> {
    let numbered: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .map(|(i, text)| (i + 1, text.as_ref()))
        .collect();
    audit_numbered(&numbered)
}

/// Reads a corpus, one notation per line. Blank lines and lines starting
/// with `#` are skipped but still counted for line numbers.
pub fn audit_reader<R: BufRead>(reader: R) -> Result<Vec<LineReport>, AuditError> {
    let mut numbered = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        numbered.push((i + 1, line));
    }

    Ok(audit_numbered(&numbered))
}

pub fn summarize(reports: &[LineReport]) -> AuditSummary {
    let mut summary = AuditSummary {
        total: reports.len(),
        ..AuditSummary::default()
    };

    for report in reports {
        match &report.outcome {
            LineOutcome::RoundTrip => summary.round_trips += 1,
            LineOutcome::Canonicalized { encoded } => {
                warn!("line {}: re-encoded as {:?}", report.line, encoded);
                summary.canonicalized += 1;
            }
            LineOutcome::Unstable { encoded, reencoded } => {
                warn!(
                    "line {}: encoding is unstable ({:?} then {:?})",
                    report.line, encoded, reencoded
                );
                summary.unstable += 1;
            }
            LineOutcome::Undecodable { encoded, error } => {
                warn!(
                    "line {}: re-encoded as {:?}, which does not decode: {}",
                    report.line, encoded, error
                );
                summary.unstable += 1;
            }
            LineOutcome::Rejected(err) => {
                warn!("line {}: {}", report.line, err);
                summary.rejected += 1;
            }
        }
    }

    info!(
        "audited {} lines: {} round trips, {} canonicalized, {} unstable, {} rejected",
        summary.total, summary.round_trips, summary.canonicalized, summary.unstable, summary.rejected
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::DecodeErrorKind;
    use std::io::Cursor;

    #[test]
    fn classifies_each_line() {
        let lines = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "8/8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
        ];
        let reports = audit_lines(&lines);

        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].outcome, LineOutcome::RoundTrip);
        assert_eq!(
            reports[1].outcome,
            LineOutcome::Canonicalized {
                encoded: "8/8/8/8/8/8/8/8 w ---- - 0 1".to_string()
            }
        );
        assert!(matches!(
            &reports[2].outcome,
            LineOutcome::Rejected(err) if err.kind() == DecodeErrorKind::UnexpectedCharacter
        ));
        assert_eq!(reports[2].line, 3);
    }

    #[test]
    fn summary_counts_outcomes() {
        let lines = [
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/8/8/8/8/8/8/8 w ---- - 0 1",
            "8/8/8/8/8/8/8/8 w ---- - 0 0",
        ];
        let summary = summarize(&audit_lines(&lines));
        assert_eq!(
            summary,
            AuditSummary {
                total: 3,
                round_trips: 2,
                canonicalized: 0,
                unstable: 0,
                rejected: 1,
            }
        );
        assert!(!summary.is_clean());
    }

    #[test]
    fn reader_skips_comments_but_keeps_line_numbers() {
        let corpus = "# opening\n\nrnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\n";
        let reports = audit_reader(Cursor::new(corpus)).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].line, 3);
        assert!(summarize(&reports).is_clean());
    }

    #[test]
    fn reader_never_audits_skipped_lines() {
        let corpus = "\
# comment that is not a position
8/8/8/8/8/8/8/8 w ---- - 0 1

   # indented comment
rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1
";
        let reports = audit_reader(Cursor::new(corpus)).unwrap();
        let lines: Vec<usize> = reports.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 5]);
        assert_eq!(reports[0].outcome, LineOutcome::RoundTrip);
        assert!(matches!(reports[1].outcome, LineOutcome::Rejected(_)));
        assert!(reports.iter().all(|r| !r.text.trim_start().starts_with('#')));
    }

    #[test]
    fn failed_redecode_keeps_its_error() {
        let encoded = "8/8/8/8/8/8/8/8 w ---- - 0 1".to_string();
        let error = decode("8/8/8/8/8/8/8/8 w ---- - 0 0").unwrap_err();

        let outcome = classify_reencoding(encoded.clone(), Err(error.clone()));
        assert_eq!(outcome, LineOutcome::Undecodable { encoded: encoded.clone(), error });

        let report = LineReport { line: 1, text: String::new(), outcome };
        let summary = summarize(&[report]);
        assert_eq!(summary.unstable, 1);
        assert!(!summary.is_clean());

        let again = classify_reencoding(encoded.clone(), decode(&encoded));
        assert_eq!(again, LineOutcome::Canonicalized { encoded });
    }
}
