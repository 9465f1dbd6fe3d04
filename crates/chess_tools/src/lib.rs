pub mod audit;
pub mod playout;

pub use audit::{audit_lines, audit_reader, summarize, AuditError, AuditSummary, LineOutcome, LineReport};
pub use playout::{candidate_moves, random_playout, random_playouts, PlayoutConfig};
