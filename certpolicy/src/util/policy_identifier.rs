//! Certificate policy identifiers without a limit on arc size
//!
//! [`PolicyIdentifier`] holds the content octets of a DER-encoded OBJECT IDENTIFIER. Arcs are not
//! limited to 32 bits, so identifiers such as X.667 UUID-based policies (`2.25.<uuid>`) can be read
//! from a certificatePolicies extension and placed on a disallowed list. DER encoding of an OBJECT
//! IDENTIFIER is unique, so two identifiers compare equal exactly when their dotted-decimal forms
//! are equal.

use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use der::asn1::{Any, ObjectIdentifier};
use der::{
    DecodeValue, EncodeValue, ErrorKind, FixedTag, Header, Length, Reader, Sequence, Tag, Writer,
};

/// Maximum length of the content octets of a [`PolicyIdentifier`].
pub const MAX_POLICY_IDENTIFIER_LEN: usize = 128;

/// [`PolicyIdentifier`] is an OBJECT IDENTIFIER stored as its DER content octets.
#[derive(Copy, Clone)]
pub struct PolicyIdentifier {
    len: u8,
    bytes: [u8; MAX_POLICY_IDENTIFIER_LEN],
}

impl PolicyIdentifier {
    /// Parses a dotted-decimal object identifier. Only the canonical form is accepted: at least two
    /// arcs, decimal digits only, no leading zeros, a first arc of 0, 1 or 2 and, under 0 or 1, a
    /// second arc below 40.
    pub fn new(dotted: &str) -> der::Result<Self> {
        let mut arcs = dotted.split('.');
        let first = arcs.next().ok_or(ErrorKind::OidMalformed)?;
        let second = arcs.next().ok_or(ErrorKind::OidMalformed)?;
        check_arc(first)?;
        check_arc(second)?;

        let first = match first {
            "0" => 0,
            "1" => 1,
            "2" => 2,
            _ => return Err(ErrorKind::OidMalformed.into()),
        };
        if first < 2 && (second.len() > 2 || second.parse::<u8>().map_or(true, |v| v >= 40)) {
            return Err(ErrorKind::OidMalformed.into());
        }

        let mut encoded = Vec::new();
        let mut value = decimal_digits(second);
        mul_add(&mut value, 1, first * 40);
        push_base128(&mut encoded, value);
        for arc in arcs {
            check_arc(arc)?;
            push_base128(&mut encoded, decimal_digits(arc));
        }
        Self::from_bytes(&encoded)
    }

    /// Wraps the content octets of a DER-encoded OBJECT IDENTIFIER after checking that each
    /// subidentifier is minimally encoded and terminated.
    pub fn from_bytes(bytes: &[u8]) -> der::Result<Self> {
        if bytes.is_empty() {
            return Err(ErrorKind::OidMalformed.into());
        }
        if bytes.len() > MAX_POLICY_IDENTIFIER_LEN {
            return Err(ErrorKind::Overlength.into());
        }

        let mut at_start = true;
        for b in bytes {
            if at_start && 0x80 == *b {
                return Err(ErrorKind::OidMalformed.into());
            }
            at_start = 0 == b & 0x80;
        }
        if !at_start {
            return Err(ErrorKind::OidMalformed.into());
        }

        let mut id = Self {
            len: bytes.len() as u8,
            bytes: [0; MAX_POLICY_IDENTIFIER_LEN],
        };
        id.bytes[..bytes.len()].copy_from_slice(bytes);
        Ok(id)
    }

    /// Returns the DER content octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

fn check_arc(arc: &str) -> der::Result<()> {
    let b = arc.as_bytes();
    if b.is_empty() || !b.iter().all(u8::is_ascii_digit) || (b.len() > 1 && b'0' == b[0]) {
        return Err(ErrorKind::OidMalformed.into());
    }
    Ok(())
}

// Arcs are processed as little-endian base 10 digits; an empty vector is zero.
fn decimal_digits(arc: &str) -> Vec<u8> {
    let mut digits: Vec<u8> = arc.bytes().rev().map(|b| b - b'0').collect();
    trim(&mut digits);
    digits
}

fn trim(digits: &mut Vec<u8>) {
    while Some(&0) == digits.last() {
        digits.pop();
    }
}

fn mul_add(digits: &mut Vec<u8>, mul: u32, add: u32) {
    let mut carry = add;
    for d in digits.iter_mut() {
        let v = u32::from(*d) * mul + carry;
        *d = (v % 10) as u8;
        carry = v / 10;
    }
    while carry > 0 {
        digits.push((carry % 10) as u8);
        carry /= 10;
    }
}

fn div_rem(digits: &mut Vec<u8>, div: u32) -> u32 {
    let mut rem = 0;
    for d in digits.iter_mut().rev() {
        let v = rem * 10 + u32::from(*d);
        *d = (v / div) as u8;
        rem = v % div;
    }
    trim(digits);
    rem
}

fn sub_small(digits: &mut Vec<u8>, mut sub: u32) {
    let mut borrow = 0;
    for d in digits.iter_mut() {
        if 0 == sub && 0 == borrow {
            break;
        }
        let mut v = i32::from(*d) - (sub % 10) as i32 - borrow;
        sub /= 10;
        borrow = 0;
        if v < 0 {
            v += 10;
            borrow = 1;
        }
        *d = v as u8;
    }
    trim(digits);
}

fn push_base128(encoded: &mut Vec<u8>, mut value: Vec<u8>) {
    let mut groups = Vec::new();
    loop {
        groups.push(div_rem(&mut value, 128) as u8);
        if value.is_empty() {
            break;
        }
    }
    for (i, g) in groups.iter().enumerate().rev() {
        encoded.push(if 0 == i { *g } else { *g | 0x80 });
    }
}

fn write_decimal(f: &mut fmt::Formatter<'_>, digits: &[u8]) -> fmt::Result {
    if digits.is_empty() {
        return write!(f, "0");
    }
    for d in digits.iter().rev() {
        write!(f, "{}", d)?;
    }
    Ok(())
}

impl fmt::Display for PolicyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, subidentifier) in self
            .as_bytes()
            .split_inclusive(|b| 0 == b & 0x80)
            .enumerate()
        {
            let mut value = Vec::new();
            for b in subidentifier {
                mul_add(&mut value, 128, u32::from(b & 0x7f));
            }
            if 0 == i {
                // the first subidentifier combines the first two arcs
                let small = if value.len() <= 2 {
                    Some(value.iter().rev().fold(0, |acc, d| acc * 10 + u32::from(*d)))
                } else {
                    None
                };
                match small {
                    Some(v) if v < 40 => write!(f, "0.{}", v)?,
                    Some(v) if v < 80 => write!(f, "1.{}", v - 40)?,
                    _ => {
                        sub_small(&mut value, 80);
                        write!(f, "2.")?;
                        write_decimal(f, &value)?;
                    }
                }
            } else {
                write!(f, ".")?;
                write_decimal(f, &value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PolicyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PolicyIdentifier({})", self)
    }
}

impl PartialEq for PolicyIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for PolicyIdentifier {}

impl PartialOrd for PolicyIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PolicyIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for PolicyIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl FromStr for PolicyIdentifier {
    type Err = der::Error;

    fn from_str(s: &str) -> der::Result<Self> {
        Self::new(s)
    }
}

impl From<ObjectIdentifier> for PolicyIdentifier {
    fn from(oid: ObjectIdentifier) -> Self {
        // ObjectIdentifier holds at most 39 content octets
        let bytes = oid.as_bytes();
        let mut id = Self {
            len: bytes.len() as u8,
            bytes: [0; MAX_POLICY_IDENTIFIER_LEN],
        };
        id.bytes[..bytes.len()].copy_from_slice(bytes);
        id
    }
}

impl FixedTag for PolicyIdentifier {
    const TAG: Tag = Tag::ObjectIdentifier;
}

impl<'a> DecodeValue<'a> for PolicyIdentifier {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let len = usize::try_from(header.length)?;
        if len > MAX_POLICY_IDENTIFIER_LEN {
            return Err(ErrorKind::Overlength.into());
        }
        let mut buf = [0u8; MAX_POLICY_IDENTIFIER_LEN];
        let bytes = reader.read_into(&mut buf[..len])?;
        Self::from_bytes(bytes)
    }
}

impl EncodeValue for PolicyIdentifier {
    fn value_len(&self) -> der::Result<Length> {
        Length::try_from(self.as_bytes().len())
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        writer.write(self.as_bytes())
    }
}

/// PolicyInformation as defined in [RFC 5280 Section 4.2.1.4], with the policyIdentifier read as a
/// [`PolicyIdentifier`]. Qualifiers are carried as undecoded values.
///
/// ```text
/// PolicyInformation ::= SEQUENCE {
///     policyIdentifier   CertPolicyId,
///     policyQualifiers   SEQUENCE SIZE (1..MAX) OF PolicyQualifierInfo OPTIONAL }
/// ```
///
/// [RFC 5280 Section 4.2.1.4]: https://datatracker.ietf.org/doc/html/rfc5280#section-4.2.1.4
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct PolicyInformationEntry {
    /// policyIdentifier
    pub policy_identifier: PolicyIdentifier,
    /// policyQualifiers
    pub policy_qualifiers: Option<Vec<Any>>,
}

/// `CertificatePolicyEntries` is the decoded form of a certificatePolicies extension value, i.e.,
/// `SEQUENCE SIZE (1..MAX) OF PolicyInformation`.
pub type CertificatePolicyEntries = Vec<PolicyInformationEntry>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use der::{Decode, Encode};
    use hex_literal::hex;

    const UUID_POLICY: &str = "2.25.329800735698586629295641978511506172918";

    #[test]
    fn large_arcs() {
        let uuid = PolicyIdentifier::new(UUID_POLICY).unwrap();
        assert_eq!(
            &hex!("6983F09DA7EBCFDEE0C7A1A7B2C0948CC8F9D776"),
            uuid.as_bytes()
        );
        assert_eq!(UUID_POLICY, uuid.to_string());

        let big = PolicyIdentifier::new("1.2.4294967296").unwrap();
        assert_eq!(&hex!("2A9080808000"), big.as_bytes());
        assert_eq!("1.2.4294967296", big.to_string());

        let long = "1.2.340282366920938463463374607431768211456.18446744073709551616.0";
        assert_eq!(long, PolicyIdentifier::new(long).unwrap().to_string());
    }

    #[test]
    fn first_two_arcs() {
        for (dotted, enc) in [
            ("0.0", &hex!("00")[..]),
            ("0.39", &hex!("27")[..]),
            ("1.0", &hex!("28")[..]),
            ("1.2.3.4", &hex!("2A0304")[..]),
            ("2.0", &hex!("50")[..]),
            ("2.25.1", &hex!("6901")[..]),
            ("2.40.0", &hex!("7800")[..]),
            ("2.999.3", &hex!("883703")[..]),
        ] {
            let id = PolicyIdentifier::new(dotted).unwrap();
            assert_eq!(enc, id.as_bytes(), "{}", dotted);
            assert_eq!(dotted, PolicyIdentifier::from_bytes(enc).unwrap().to_string());
        }
    }

    #[test]
    fn matches_object_identifier() {
        use const_oid::db::rfc5280::{ID_CE_CERTIFICATE_POLICIES, ID_CE_NAME_CONSTRAINTS};

        for oid in [
            ID_CE_NAME_CONSTRAINTS,
            ID_CE_CERTIFICATE_POLICIES,
            ObjectIdentifier::new_unwrap("1.3.6.1.4.1.10015.1.3.1"),
            ObjectIdentifier::new_unwrap("0.4.0.194112.1.2"),
        ] {
            let id = PolicyIdentifier::from(oid);
            assert_eq!(oid.to_string(), id.to_string());
            assert_eq!(id, PolicyIdentifier::new(&oid.to_string()).unwrap());
        }
    }

    #[test]
    fn rejects_non_canonical_strings() {
        for bad in [
            "",
            "1",
            "1.",
            ".1.2",
            "1..2",
            "1.2.",
            "3.1",
            "1.40",
            "0.100",
            "1.02",
            "01.2",
            "1.2.03.4",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.+3",
            "1.2.-3",
            "not an oid",
        ] {
            assert!(PolicyIdentifier::new(bad).is_err(), "{:?}", bad);
        }
        assert!("2.5.29.32.0".parse::<PolicyIdentifier>().is_ok());
    }

    #[test]
    fn rejects_bad_content_octets() {
        assert!(PolicyIdentifier::from_bytes(&[]).is_err());
        assert!(PolicyIdentifier::from_bytes(&hex!("2A0383")).is_err());
        assert!(PolicyIdentifier::from_bytes(&hex!("2A8003")).is_err());
        assert!(PolicyIdentifier::from_bytes(&[0x2A; MAX_POLICY_IDENTIFIER_LEN]).is_ok());
        assert_eq!(
            Err(ErrorKind::Overlength.into()),
            PolicyIdentifier::from_bytes(&[0x2A; MAX_POLICY_IDENTIFIER_LEN + 1])
        );
    }

    #[test]
    fn der_policy_entries() {
        // SEQUENCE { SEQUENCE { OID 2.25.<uuid> }, SEQUENCE { OID 1.2.4294967296 } }
        let enc = hex!("3022 3016 0614 6983F09DA7EBCFDEE0C7A1A7B2C0948CC8F9D776 3008 0606 2A9080808000");
        let entries = CertificatePolicyEntries::from_der(&enc).unwrap();
        assert_eq!(2, entries.len());
        assert_eq!(UUID_POLICY, entries[0].policy_identifier.to_string());
        assert_eq!("1.2.4294967296", entries[1].policy_identifier.to_string());
        assert_eq!(enc.to_vec(), entries.to_der().unwrap());

        // OID with a non-minimal subidentifier
        assert!(CertificatePolicyEntries::from_der(&hex!("3006 3004 0602 8001")).is_err());
        // INTEGER in place of the OID
        assert!(CertificatePolicyEntries::from_der(&hex!("3005 3003 020101")).is_err());
    }
}
