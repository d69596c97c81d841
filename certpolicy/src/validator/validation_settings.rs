//! Structures and functions related to configuring subject certificate validation

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "std")]
use std::path::Path;

#[cfg(feature = "std")]
use serde_json::Result as SerdeResult;

use crate::util::error::*;
use crate::util::logging::*;
use crate::util::policy_identifier::PolicyIdentifier;
use crate::util::policy_oids::DEFAULT_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES;

//-----------------------------------------------------------------------------------------------
// Type definitions used in the definition of validation settings
//-----------------------------------------------------------------------------------------------
/// `PolicyIdentifierSet` is a typedef for a set of PolicyIdentifier values.
pub type PolicyIdentifierSet = BTreeSet<PolicyIdentifier>;

/// `Strings` is a typedef for a vector of String values.
pub type Strings = Vec<String>;

/// `ValidationSettings` is a typedef for a `BTreeMap` that maps arbitrary string values to a
/// variant map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct ValidationSettings(pub BTreeMap<String, ValidationProcessingTypes>);

/// `ValidationProcessingTypes` is used to define a variant map with types associated with
/// validating subject certificates.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum ValidationProcessingTypes {
    /// Represents vectors of Strings
    Strings(Strings),
}

//-----------------------------------------------------------------------------------------------
// Settings
//-----------------------------------------------------------------------------------------------
/// `PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES` is used to retrieve a Strings value from a
/// [`ValidationSettings`] object. Each string is a certificate policy OID in canonical dotted-decimal
/// notation, i.e., "1.3.6.1.4.1.10015.1.3.1". There is no default: absence of this item means no
/// disallowed policy list has been configured, which is distinct from an empty list.
pub static PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES: &str =
    "psDisallowedSubjectCertificatePolicies";

impl ValidationSettings {
    /// Creates a new empty [`ValidationSettings`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`ValidationSettings`] with the disallowed subject certificate policies set to
    /// [`DEFAULT_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`].
    pub fn with_default_disallowed_policies() -> Self {
        let mut settings = Self::new();
        settings.set_disallowed_subject_certificate_policies(
            DEFAULT_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES
                .iter()
                .map(|oid| oid.to_string())
                .collect(),
        );
        settings
    }

    /// `get_disallowed_subject_certificate_policies` retrieves the [`PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`]
    /// value from a [`ValidationSettings`] instance, if present.
    pub fn get_disallowed_subject_certificate_policies(&self) -> Option<Strings> {
        match self.0.get(PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES)? {
            ValidationProcessingTypes::Strings(v) => Some(v.clone()),
        }
    }

    /// `set_disallowed_subject_certificate_policies` sets the [`PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`]
    /// value in a [`ValidationSettings`] instance.
    pub fn set_disallowed_subject_certificate_policies(&mut self, v: Strings) {
        self.0.insert(
            PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES.to_string(),
            ValidationProcessingTypes::Strings(v),
        );
    }

    /// `set_disallowed_subject_certificate_policies_from_oid_set` sets the
    /// [`PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`] value given an [`PolicyIdentifierSet`] instead of
    /// a Strings object.
    pub fn set_disallowed_subject_certificate_policies_from_oid_set(
        &mut self,
        v: &PolicyIdentifierSet,
    ) {
        self.set_disallowed_subject_certificate_policies(
            v.iter().map(|oid| oid.to_string()).collect(),
        );
    }

    /// `get_disallowed_subject_certificate_policies_as_oid_set` retrieves the
    /// [`PS_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES`] value as an [`PolicyIdentifierSet`].
    ///
    /// Returns [`Error::Misconfiguration`] when the value is absent or when any entry is not a
    /// canonical dotted-decimal object identifier.
    pub fn get_disallowed_subject_certificate_policies_as_oid_set(
        &self,
    ) -> Result<PolicyIdentifierSet> {
        match self.get_disallowed_subject_certificate_policies() {
            Some(policies) => oid_set_from_strings(&policies),
            None => Err(Error::Misconfiguration),
        }
    }
}

/// `oid_set_from_strings` parses a list of dotted-decimal policy OIDs into a [`PolicyIdentifierSet`].
///
/// Each value must be a canonical dotted-decimal object identifier. Arcs may be of any size. Values
/// with leading zeros, surrounding whitespace or other non-canonical forms are rejected with
/// [`Error::Misconfiguration`] since they would never be equal to a policy identifier read from a
/// certificate.
pub fn oid_set_from_strings(policies: &[String]) -> Result<PolicyIdentifierSet> {
    let mut set = PolicyIdentifierSet::new();
    for policy in policies {
        match PolicyIdentifier::new(policy.as_str()) {
            Ok(oid) => {
                set.insert(oid);
            }
            Err(e) => {
                log_message(
                    &PcLogLevels::PcError,
                    format!(
                        "Disallowed policy {} is not a canonical dotted-decimal object identifier: {}",
                        policy, e
                    )
                    .as_str(),
                );
                return Err(Error::Misconfiguration);
            }
        }
    }
    Ok(set)
}

/// `read_settings` accepts a string containing the name of a file that notionally contains JSON data that
/// represents ValidationSettings.
///
/// Returns an empty [`ValidationSettings`] when no file name is given or the file does not exist and
/// [`Error::ParseError`] when the file cannot be parsed.
#[cfg(feature = "std")]
pub fn read_settings(fname: &Option<String>) -> Result<ValidationSettings> {
    if let Some(fname) = fname {
        let p = Path::new(fname.as_str());
        if Path::exists(p) {
            let json = std::fs::read(p)?;
            let r: SerdeResult<ValidationSettings> = serde_json::from_slice(&json);
            return match r {
                Ok(settings) => Ok(settings),
                Err(e) => {
                    log_message(
                        &PcLogLevels::PcError,
                        format!("Failed to parse settings from {}: {}", fname, e).as_str(),
                    );
                    Err(Error::ParseError)
                }
            };
        }
    }
    Ok(ValidationSettings::new())
}

#[test]
fn test_default_gets_settings() {
    let settings = ValidationSettings::default();
    assert_eq!(None, settings.get_disallowed_subject_certificate_policies());
    assert_eq!(
        Err(Error::Misconfiguration),
        settings.get_disallowed_subject_certificate_policies_as_oid_set()
    );

    let settings = ValidationSettings::with_default_disallowed_policies();
    let defaults = settings
        .get_disallowed_subject_certificate_policies()
        .unwrap();
    assert_eq!(4, defaults.len());
    assert!(defaults.contains(&"1.3.6.1.4.1.10015.1.3".to_string()));
    assert!(defaults.contains(&"1.3.6.1.4.1.10015.1.3.3".to_string()));
}

#[test]
fn test_sets_settings() {
    use alloc::vec;

    let mut settings = ValidationSettings::new();
    settings.set_disallowed_subject_certificate_policies(vec![]);
    assert_eq!(
        Some(vec![]),
        settings.get_disallowed_subject_certificate_policies()
    );
    assert!(settings
        .get_disallowed_subject_certificate_policies_as_oid_set()
        .unwrap()
        .is_empty());

    let mut oids = PolicyIdentifierSet::new();
    oids.insert(PolicyIdentifier::new("0.4.0.194112.1.2").unwrap());
    oids.insert(PolicyIdentifier::new("2.25.329800735698586629295641978511506172918").unwrap());
    settings.set_disallowed_subject_certificate_policies_from_oid_set(&oids);
    assert_eq!(
        oids,
        settings
            .get_disallowed_subject_certificate_policies_as_oid_set()
            .unwrap()
    );
}

#[test]
fn test_oid_set_from_strings() {
    use alloc::vec;

    let set = oid_set_from_strings(&["1.2.3.4".to_string(), "1.2.3.4".to_string()]).unwrap();
    assert_eq!(1, set.len());

    let bad = vec!["1.2.3.4".to_string(), "not an oid".to_string()];
    assert_eq!(Err(Error::Misconfiguration), oid_set_from_strings(&bad));

    let padded = vec![" 1.2.3.4".to_string()];
    assert_eq!(Err(Error::Misconfiguration), oid_set_from_strings(&padded));

    // arcs beyond 32 bits
    let large = vec![
        "2.25.329800735698586629295641978511506172918".to_string(),
        "1.2.4294967296".to_string(),
        "1.2.18446744073709551616".to_string(),
    ];
    let set = oid_set_from_strings(&large).unwrap();
    assert_eq!(3, set.len());
    for policy in &large {
        assert!(set.iter().any(|oid| oid.to_string() == *policy));
    }

    let empty: Strings = vec![];
    assert!(oid_set_from_strings(&empty).unwrap().is_empty());
}
