//! [`CertificateValidatorChain`] aggregates a list of [`CertificateValidator`] trait objects that are
//! applied, in order, to a subject certificate.
//!
//! The sample below illustrates preparation of a chain that rejects certificates declaring one of the
//! default disallowed policies.
//! ```
//! use certpolicy::*;
//!
//! let settings = ValidationSettings::with_default_disallowed_policies();
//! let mut chain = CertificateValidatorChain::new();
//! populate_subject_certificate_chain(&mut chain, &settings).unwrap();
//! assert_eq!(1, chain.len());
//! ```
//!
//! Each validator checks one aspect of the subject certificate and either accepts it or fails with a
//! specific [`Error`]. Validators are stateless after construction, so a chain can be shared across
//! threads and used for any number of certificates.

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::{vec, vec::Vec};
use core::fmt;

use crate::util::error::*;
use crate::util::logging::*;
use crate::validator::pdv_certificate::PDVCertificate;
use crate::validator::policy_validator::SubjectPolicyValidator;
use crate::validator::validation_settings::ValidationSettings;

/// The [`CertificateValidator`] trait is implemented by each check that can be applied to a subject
/// certificate.
pub trait CertificateValidator {
    /// `name` returns a short name for the validator for use in log output and results.
    fn name(&self) -> &str;

    /// `validate` returns Ok(()) if the certificate passes the check and an error describing the
    /// reason for rejection otherwise.
    fn validate(&self, cert: &PDVCertificate) -> Result<()>;
}

/// Boxed [`CertificateValidator`] as held by a [`CertificateValidatorChain`].
#[cfg(feature = "std")]
pub type BoxedCertificateValidator = Box<dyn CertificateValidator + Send + Sync>;
/// Boxed [`CertificateValidator`] as held by a [`CertificateValidatorChain`].
#[cfg(not(feature = "std"))]
pub type BoxedCertificateValidator = Box<dyn CertificateValidator>;

/// [`ValidationVerdict`] is the outcome of applying one or more validators to a subject certificate.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValidationVerdict {
    /// The certificate passed all checks
    Accepted,
    /// The certificate was rejected for the given reason
    Rejected(Error),
}

impl ValidationVerdict {
    /// Returns true for [`ValidationVerdict::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }

    /// Returns the flat [`ValidationStatus`] code for the verdict.
    pub fn status(&self) -> ValidationStatus {
        match self {
            ValidationVerdict::Accepted => ValidationStatus::Valid,
            ValidationVerdict::Rejected(e) => e.status(),
        }
    }
}

impl From<Result<()>> for ValidationVerdict {
    fn from(r: Result<()>) -> Self {
        match r {
            Ok(()) => ValidationVerdict::Accepted,
            Err(e) => ValidationVerdict::Rejected(e),
        }
    }
}

impl fmt::Display for ValidationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationVerdict::Accepted => write!(f, "Accepted"),
            ValidationVerdict::Rejected(e) => write!(f, "Rejected: {}", e),
        }
    }
}

/// [`CertificateValidatorChain`] holds an ordered list of validators.
#[derive(Default)]
pub struct CertificateValidatorChain {
    validators: Vec<BoxedCertificateValidator>,
}

impl CertificateValidatorChain {
    /// CertificateValidatorChain::new returns a new [`CertificateValidatorChain`] with no validators
    pub fn new() -> CertificateValidatorChain {
        CertificateValidatorChain { validators: vec![] }
    }

    /// add_validator appends a validator to the end of the chain.
    pub fn add_validator(&mut self, v: BoxedCertificateValidator) {
        self.validators.push(v);
    }

    /// clear_validators removes all validators from the chain.
    pub fn clear_validators(&mut self) {
        self.validators.clear();
    }

    /// Returns the number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if the chain has no validators.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Returns the names of the validators in the chain, in order.
    pub fn names(&self) -> Vec<String> {
        self.validators.iter().map(|v| v.name().to_string()).collect()
    }

    /// validate applies each validator in order and returns the first error encountered, unchanged.
    /// Validators following a failure are not invoked. An empty chain accepts every certificate.
    pub fn validate(&self, cert: &PDVCertificate) -> Result<()> {
        for v in &self.validators {
            if let Err(e) = v.validate(cert) {
                log_message_for_subject(
                    &PcLogLevels::PcInfo,
                    cert,
                    alloc::format!("{} rejected certificate with {}", v.name(), e).as_str(),
                );
                return Err(e);
            }
        }
        Ok(())
    }

    /// validate_all applies every validator, regardless of earlier failures, and returns the name of
    /// each validator alongside its verdict.
    pub fn validate_all(&self, cert: &PDVCertificate) -> Vec<(String, ValidationVerdict)> {
        self.validators
            .iter()
            .map(|v| (v.name().to_string(), ValidationVerdict::from(v.validate(cert))))
            .collect()
    }
}

/// `populate_subject_certificate_chain` adds a [`SubjectPolicyValidator`] configured from `settings` to
/// the chain. Fails with [`Error::Misconfiguration`] if the settings do not include a valid disallowed
/// subject certificate policies list, in which case the chain is left unchanged.
pub fn populate_subject_certificate_chain(
    chain: &mut CertificateValidatorChain,
    settings: &ValidationSettings,
) -> Result<()> {
    let policy_validator = SubjectPolicyValidator::try_from(settings)?;
    chain.add_validator(Box::new(policy_validator));
    Ok(())
}
