//! Error types

use core::fmt;

use crate::util::policy_identifier::PolicyIdentifier;

/// Result type
pub type Result<T> = core::result::Result<T, Error>;

/// `ValidationStatus` provides a flat, copyable code summarizing the outcome of a subject certificate
/// check, i.e., for tallying results or for logging without carrying the underlying cause.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum ValidationStatus {
    /// No errors were encountered while validating the subject certificate
    Valid,
    /// DisallowedPolicy occurs when a subject certificate declares a certificate policy that appears
    /// on the disallowed subject certificate policies list.
    DisallowedPolicy,
    /// PolicyParseError occurs when the certificatePolicies extension of a subject certificate could
    /// not be decoded.
    PolicyParseError,
    /// A configuration error was detected. See textual log output for more details.
    Misconfiguration,
    /// Any other failure, i.e., the certificate itself could not be read.
    Other,
}

/// Error type
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The subject certificate declares the given policy, which is on the disallowed list.
    DisallowedPolicy(PolicyIdentifier),
    /// The certificatePolicies extension could not be decoded. Carries the decoder error.
    PolicyParseError(der::Error),
    /// A configuration error was detected, i.e., no disallowed policy list was configured or the list
    /// contains a value that is not a canonical dotted-decimal object identifier.
    Misconfiguration,
    /// NotFound occurs when an action failed because a necessary artifact was not found.
    NotFound,
    /// Unrecognized occurs when an error conditions does not match anything else here.
    Unrecognized,
    /// An artifact could not be parsed
    ParseError,
    /// Asn1Error is used to propagate error information from the x509 crate.
    Asn1Error(der::Error),
    /// Error encapsulates an error derived from [std::io::ErrorKind]
    #[cfg(feature = "std")]
    StdIoError(std::io::ErrorKind),
}

impl Error {
    /// `status` maps an [`Error`] to the corresponding [`ValidationStatus`] code.
    pub fn status(&self) -> ValidationStatus {
        match self {
            Error::DisallowedPolicy(_) => ValidationStatus::DisallowedPolicy,
            Error::PolicyParseError(_) => ValidationStatus::PolicyParseError,
            Error::Misconfiguration => ValidationStatus::Misconfiguration,
            _ => ValidationStatus::Other,
        }
    }
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1Error(err)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::StdIoError(err.kind())
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => write!(f, "Valid"),
            ValidationStatus::DisallowedPolicy => write!(f, "DisallowedPolicy"),
            ValidationStatus::PolicyParseError => write!(f, "PolicyParseError"),
            ValidationStatus::Misconfiguration => write!(f, "Misconfiguration"),
            ValidationStatus::Other => write!(f, "Other"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DisallowedPolicy(oid) => {
                write!(f, "DisallowedPolicy: certificate declares policy {}", oid)
            }
            Error::PolicyParseError(err) => write!(f, "PolicyParseError: {}", err),
            Error::Misconfiguration => write!(f, "Misconfiguration"),
            Error::NotFound => write!(f, "NotFound"),
            Error::Unrecognized => write!(f, "Unrecognized"),
            Error::ParseError => write!(f, "ParseError"),
            Error::Asn1Error(err) => write!(f, "Asn1Error: {}", err),
            #[cfg(feature = "std")]
            Error::StdIoError(err) => write!(f, "StdError: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PolicyParseError(err) | Error::Asn1Error(err) => Some(err),
            _ => None,
        }
    }
}

#[test]
fn error_test() {
    use alloc::format;
    use const_oid::db::rfc5280::ID_CE_CERTIFICATE_POLICIES;

    let _s = format!("{}", ValidationStatus::Valid);
    let _s = format!("{}", ValidationStatus::DisallowedPolicy);
    let _s = format!("{}", ValidationStatus::PolicyParseError);
    let _s = format!("{}", ValidationStatus::Misconfiguration);
    let _s = format!("{}", ValidationStatus::Other);

    let _s = format!("{}", Error::Misconfiguration);
    let _s = format!("{}", Error::NotFound);
    let _s = format!("{}", Error::Unrecognized);
    let _s = format!("{}", Error::ParseError);

    let s = format!("{}", Error::DisallowedPolicy(ID_CE_CERTIFICATE_POLICIES.into()));
    assert!(s.contains("2.5.29.32"));

    let parse_err = Error::PolicyParseError(der::ErrorKind::SetDuplicate.into());
    assert_eq!(ValidationStatus::PolicyParseError, parse_err.status());
    assert_ne!(parse_err, Error::Asn1Error(der::ErrorKind::SetDuplicate.into()));
    assert_eq!(
        ValidationStatus::DisallowedPolicy,
        Error::DisallowedPolicy(ID_CE_CERTIFICATE_POLICIES.into()).status()
    );
    assert_eq!(ValidationStatus::Other, Error::NotFound.status());
}
