//! Types related to collection of subject certificate check statistics

use std::collections::BTreeMap;
use std::fmt;

use certpolicy::{ValidationStatus, ValidationVerdict};

/// `CheckStats` enables collection of some basic statistics related to checking subject
/// certificates.
#[derive(Debug, Default)]
pub struct CheckStats {
    /// Number of certificate files processed, including those that could not be read
    pub files_processed: usize,
    /// Number of certificates accepted
    pub accepted: usize,
    /// Number of certificates rejected or unreadable
    pub rejected: usize,
    /// Number of rejections per [`ValidationStatus`]
    pub by_status: BTreeMap<ValidationStatus, usize>,
}

impl CheckStats {
    /// Records the verdict for one certificate file.
    pub fn record(&mut self, verdict: &ValidationVerdict) {
        self.files_processed += 1;
        if verdict.is_accepted() {
            self.accepted += 1;
        } else {
            self.rejected += 1;
            *self.by_status.entry(verdict.status()).or_insert(0) += 1;
        }
    }

    /// Returns true if every certificate processed so far was accepted.
    pub fn all_accepted(&self) -> bool {
        0 == self.rejected
    }
}

impl fmt::Display for CheckStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Certificates: {}, accepted: {}, rejected: {}",
            self.files_processed, self.accepted, self.rejected
        )?;
        for (status, count) in &self.by_status {
            write!(f, "\n\t{}: {}", status, count)?;
        }
        Ok(())
    }
}

#[test]
fn stats_summary() {
    use certpolicy::Error;

    let mut stats = CheckStats::default();
    assert!(stats.all_accepted());
    stats.record(&ValidationVerdict::Accepted);
    stats.record(&ValidationVerdict::Rejected(Error::Misconfiguration));
    stats.record(&ValidationVerdict::Rejected(Error::NotFound));
    stats.record(&ValidationVerdict::Rejected(Error::Unrecognized));
    assert!(!stats.all_accepted());
    assert_eq!(4, stats.files_processed);
    assert_eq!(1, stats.accepted);
    assert_eq!(3, stats.rejected);
    assert_eq!(
        Some(&2),
        stats.by_status.get(&ValidationStatus::Other)
    );
    assert_eq!(stats.files_processed, stats.accepted + stats.rejected);

    let s = stats.to_string();
    assert!(s.starts_with("Certificates: 4, accepted: 1, rejected: 3"));
    assert!(s.contains("Misconfiguration: 1"));
    assert!(s.contains("Other: 2"));
}
