//! Wrapper around the decoded subject certificate presented for validation

use alloc::collections::BTreeMap;
use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use der::{asn1::ObjectIdentifier, Decode, Encode};
use x509_cert::Certificate;

use crate::util::error::*;
use crate::util::logging::*;

/// [`Asn1Metadata`] is a typedef of a BTreeMap map that associates types represented by the [`Asn1MetadataTypes`]
/// enum objects with arbitrary string values. At present this is only used to convey the locator
/// (typically a file name) the certificate was read from.
pub type Asn1Metadata = BTreeMap<String, Asn1MetadataTypes>;

/// [`MD_LOCATOR`] is used to set/get a String value to/from an [`Asn1Metadata`] object. The value
/// may represent a file name, URI or other locator for troubleshooting purposes.
pub static MD_LOCATOR: &str = "mdLocator";

/// Types that can be saved as metadata alongside a certificate.
#[derive(PartialEq, Clone, Eq, Debug)]
#[non_exhaustive]
pub enum Asn1MetadataTypes {
    /// Used for metadata represented as a String
    String(String),
}

/// [`PDVCertificate`] aggregates a binary, DER-encoded Certificate, the decoded Certificate and optional
/// metadata. Validators only read from a [`PDVCertificate`]; extension values are handed out as raw
/// bytes and decoded by the validator that needs them.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PDVCertificate {
    /// Binary, encoded Certificate object
    pub encoded_cert: Vec<u8>,
    /// Decoded Certificate object
    pub decoded_cert: Certificate,
    /// Optional metadata about the certificate
    pub metadata: Option<Asn1Metadata>,
}

impl TryFrom<&[u8]> for PDVCertificate {
    type Error = der::Error;

    fn try_from(enc_cert: &[u8]) -> der::Result<Self> {
        let cert = Certificate::from_der(enc_cert)?;
        Ok(PDVCertificate {
            encoded_cert: enc_cert.to_vec(),
            decoded_cert: cert,
            metadata: None,
        })
    }
}

impl TryFrom<Certificate> for PDVCertificate {
    type Error = der::Error;

    fn try_from(cert: Certificate) -> der::Result<Self> {
        let enc_cert = cert.to_der()?;
        Ok(PDVCertificate {
            encoded_cert: enc_cert,
            decoded_cert: cert,
            metadata: None,
        })
    }
}

impl PDVCertificate {
    /// `get_extension_value` returns the contents of the extnValue OCTET STRING of the first extension
    /// with the given extnID, or None if the certificate has no such extension.
    pub fn get_extension_value(&self, oid: &ObjectIdentifier) -> Option<&[u8]> {
        self.decoded_cert
            .tbs_certificate
            .extensions
            .as_ref()?
            .iter()
            .find(|ext| ext.extn_id == *oid)
            .map(|ext| ext.extn_value.as_bytes())
    }

    /// `count_extensions` returns the number of extensions with the given extnID.
    pub fn count_extensions(&self, oid: &ObjectIdentifier) -> usize {
        match self.decoded_cert.tbs_certificate.extensions.as_ref() {
            Some(exts) => exts.iter().filter(|ext| ext.extn_id == *oid).count(),
            None => 0,
        }
    }

    /// `get_locator` returns the [`MD_LOCATOR`] value from the metadata, if present.
    pub fn get_locator(&self) -> Option<&str> {
        match self.metadata.as_ref()?.get(MD_LOCATOR)? {
            Asn1MetadataTypes::String(s) => Some(s.as_str()),
        }
    }
}

/// `parse_cert` takes a buffer containing a binary DER encoded certificate and returns
/// a [`PDVCertificate`] containing the parsed certificate if parsing was successful. The `locator`
/// is saved as [`MD_LOCATOR`] metadata.
pub fn parse_cert(buffer: &[u8], locator: &str) -> Result<PDVCertificate> {
    match Certificate::from_der(buffer) {
        Ok(cert) => {
            let mut md = Asn1Metadata::new();
            md.insert(
                MD_LOCATOR.to_string(),
                Asn1MetadataTypes::String(locator.to_string()),
            );
            Ok(PDVCertificate {
                encoded_cert: buffer.to_vec(),
                decoded_cert: cert,
                metadata: Some(md),
            })
        }
        Err(e) => {
            log_message(
                &PcLogLevels::PcError,
                format!("Failed to parse certificate from {}: {}", locator, e).as_str(),
            );
            Err(Error::Asn1Error(e))
        }
    }
}

#[test]
fn extension_value_lookup() {
    use const_oid::db::rfc5280::{ID_CE_CERTIFICATE_POLICIES, ID_CE_NAME_CONSTRAINTS};

    let der_encoded_ee = include_bytes!("../../tests/examples/ee_two_policies.der");
    let ee = parse_cert(der_encoded_ee, "ee_two_policies.der").unwrap();
    assert_eq!(Some("ee_two_policies.der"), ee.get_locator());
    assert_eq!(1, ee.count_extensions(&ID_CE_CERTIFICATE_POLICIES));
    assert_eq!(0, ee.count_extensions(&ID_CE_NAME_CONSTRAINTS));
    assert!(ee.get_extension_value(&ID_CE_NAME_CONSTRAINTS).is_none());

    // SEQUENCE OF PolicyInformation
    let policies = ee.get_extension_value(&ID_CE_CERTIFICATE_POLICIES).unwrap();
    assert_eq!(0x30, policies[0]);

    let from_buf = PDVCertificate::try_from(der_encoded_ee.as_slice()).unwrap();
    assert_eq!(None, from_buf.get_locator());
    assert_eq!(from_buf.decoded_cert, ee.decoded_cert);

    let from_cert = PDVCertificate::try_from(ee.decoded_cert.clone()).unwrap();
    assert_eq!(
        Certificate::from_der(&from_cert.encoded_cert).unwrap(),
        ee.decoded_cert
    );
}

#[test]
fn parse_cert_rejects_junk() {
    let r = parse_cert(&[0x30, 0x03, 0x02, 0x01], "junk");
    assert!(matches!(r, Err(Error::Asn1Error(_))));
}
