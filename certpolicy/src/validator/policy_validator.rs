//! Rejects subject certificates that declare a disallowed certificate policy
//!
//! The check reads the certificatePolicies extension (2.5.29.32) from the subject certificate,
//! decodes it and compares each policyIdentifier against the configured disallowed policies.
//! Policy identifiers are compared as DER content octets, so arcs of any size are supported.
//!
//! - No certificatePolicies extension: the certificate is accepted.
//! - An extension that cannot be decoded: [`Error::PolicyParseError`]. An unreadable extension is
//!   never treated as an absent one.
//! - A policyIdentifier on the disallowed list: [`Error::DisallowedPolicy`], reported for the first
//!   match encountered.
//!
//! Policy qualifiers are decoded along with the extension but otherwise ignored, as are any
//! relationships between the subject's policies and those of its issuers.

use alloc::format;
use alloc::string::String;

use const_oid::db::rfc5280::ID_CE_CERTIFICATE_POLICIES;
use der::Decode;

use crate::util::error::*;
use crate::util::logging::*;
use crate::util::policy_identifier::CertificatePolicyEntries;
use crate::validator::pdv_certificate::PDVCertificate;
use crate::validator::validation_settings::*;
use crate::validator::validator_chain::CertificateValidator;

/// [`SubjectPolicyValidator`] holds an immutable set of disallowed certificate policies and checks
/// subject certificates against it. Instances hold no other state and may be shared freely across
/// threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectPolicyValidator {
    disallowed_policies: PolicyIdentifierSet,
}

impl SubjectPolicyValidator {
    /// Creates a validator that rejects certificates declaring any of `disallowed_policies`. An empty
    /// set disallows nothing.
    pub fn new(disallowed_policies: PolicyIdentifierSet) -> Self {
        Self {
            disallowed_policies,
        }
    }

    /// Creates a validator from dotted-decimal policy OIDs. Fails with [`Error::Misconfiguration`]
    /// if any value is not a canonical dotted-decimal object identifier.
    pub fn from_strings(disallowed_policies: &[String]) -> Result<Self> {
        Ok(Self::new(oid_set_from_strings(disallowed_policies)?))
    }

    /// Returns the set of disallowed policies.
    pub fn disallowed_policies(&self) -> &PolicyIdentifierSet {
        &self.disallowed_policies
    }

    /// `check_certificate_policies` evaluates the DER-encoded value of a certificatePolicies extension,
    /// or None if the certificate does not have one.
    pub fn check_certificate_policies(&self, ext_value: Option<&[u8]>) -> Result<()> {
        let enc_policies = match ext_value {
            Some(enc_policies) => enc_policies,
            None => return Ok(()),
        };

        let policies =
            CertificatePolicyEntries::from_der(enc_policies).map_err(Error::PolicyParseError)?;
        match policies
            .iter()
            .find(|pi| self.disallowed_policies.contains(&pi.policy_identifier))
        {
            Some(pi) => Err(Error::DisallowedPolicy(pi.policy_identifier)),
            None => Ok(()),
        }
    }
}

impl TryFrom<&ValidationSettings> for SubjectPolicyValidator {
    type Error = Error;

    /// Reads [`PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`] from the settings. Absence of the item is
    /// a configuration error, not an empty list.
    fn try_from(settings: &ValidationSettings) -> Result<Self> {
        match settings.get_disallowed_subject_certificate_policies() {
            Some(policies) => Self::from_strings(&policies),
            None => {
                log_message(
                    &PcLogLevels::PcError,
                    "No disallowed subject certificate policies were configured",
                );
                Err(Error::Misconfiguration)
            }
        }
    }
}

impl CertificateValidator for SubjectPolicyValidator {
    fn name(&self) -> &str {
        "SubjectPolicyValidator"
    }

    fn validate(&self, cert: &PDVCertificate) -> Result<()> {
        // the first occurrence would otherwise mask any others
        if cert.count_extensions(&ID_CE_CERTIFICATE_POLICIES) > 1 {
            log_message_for_subject(
                &PcLogLevels::PcError,
                cert,
                "Multiple certificatePolicies extensions found",
            );
            return Err(Error::PolicyParseError(
                der::ErrorKind::SetDuplicate.into(),
            ));
        }

        match self.check_certificate_policies(cert.get_extension_value(&ID_CE_CERTIFICATE_POLICIES))
        {
            Ok(()) => {
                log_message_for_subject(
                    &PcLogLevels::PcDebug,
                    cert,
                    "No disallowed certificate policies found",
                );
                Ok(())
            }
            Err(e) => {
                log_message_for_subject(
                    &PcLogLevels::PcError,
                    cert,
                    format!("Certificate policy check failed with {}", e).as_str(),
                );
                Err(e)
            }
        }
    }
}
