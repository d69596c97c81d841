//! Logging support

#[cfg(feature = "std")]
use log::{debug, error, info, warn};

use alloc::format;
use alloc::string::ToString;

use crate::PDVCertificate;

/// Enum that describes level associated with a log message
#[derive(Debug, Eq, PartialEq)]
pub enum PcLogLevels {
    /// Common error logging level
    PcError,
    /// Common info logging level
    PcInfo,
    /// Common warn logging level
    PcWarn,
    /// Common debug logging level
    PcDebug,
}

/// `log_message` emits a message via the `log` facade. When no logger has been installed by the
/// application the message is discarded.
#[cfg(feature = "std")]
pub fn log_message(level: &PcLogLevels, message: &str) {
    match level {
        PcLogLevels::PcError => error!("{}", message),
        PcLogLevels::PcWarn => warn!("{}", message),
        PcLogLevels::PcInfo => info!("{}", message),
        PcLogLevels::PcDebug => debug!("{}", message),
    }
}

#[cfg(not(feature = "std"))]
/// `log_message` does nothing when std feature gate is not used
pub fn log_message(_level: &PcLogLevels, _message: &str) {}

/// `log_message_for_subject` logs a message with the subject name and, if available, the locator
/// of the certificate appended.
pub fn log_message_for_subject(level: &PcLogLevels, cert: &PDVCertificate, msg: &str) {
    let subject = cert.decoded_cert.tbs_certificate.subject.to_string();
    let message = match cert.get_locator() {
        Some(locator) => format!(
            "{} for certificate issued to {} ({})",
            msg, subject, locator
        ),
        None => format!("{} for certificate issued to {}", msg, subject),
    };
    log_message(level, message.as_str());
}
