//! Provides definitions of certificate policy OIDs relevant to subject certificates presented for
//! eID authentication

use der::asn1::ObjectIdentifier;

// -------------------------------------------------------------------------------------------------
// SK ID Solutions ESTEID-SK 2015 Mobile-ID policies. Mobile-ID certificates chain to the same
// issuers as ID-card certificates but are not meant to be used for web eID authentication.
// -------------------------------------------------------------------------------------------------

/// ESTEID-SK 2015 Mobile-ID policy arc: 1.3.6.1.4.1.10015.1.3
pub const ESTEID_SK_2015_MOBILE_ID_POLICY: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.10015.1.3");

/// ESTEID-SK 2015 Mobile-ID policy, version 1: 1.3.6.1.4.1.10015.1.3.1
pub const ESTEID_SK_2015_MOBILE_ID_POLICY_V1: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.10015.1.3.1");

/// ESTEID-SK 2015 Mobile-ID policy, version 2: 1.3.6.1.4.1.10015.1.3.2
pub const ESTEID_SK_2015_MOBILE_ID_POLICY_V2: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.10015.1.3.2");

/// ESTEID-SK 2015 Mobile-ID policy, version 3: 1.3.6.1.4.1.10015.1.3.3
pub const ESTEID_SK_2015_MOBILE_ID_POLICY_V3: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.3.6.1.4.1.10015.1.3.3");

/// `DEFAULT_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES` lists the policies that are disallowed when no
/// other list has been configured, i.e., via
/// [`ValidationSettings::with_default_disallowed_policies`](crate::ValidationSettings::with_default_disallowed_policies).
pub const DEFAULT_DISALLOWED_SUBJECT_CERTIFICATE_POLICIES: &[ObjectIdentifier] = &[
    ESTEID_SK_2015_MOBILE_ID_POLICY,
    ESTEID_SK_2015_MOBILE_ID_POLICY_V1,
    ESTEID_SK_2015_MOBILE_ID_POLICY_V2,
    ESTEID_SK_2015_MOBILE_ID_POLICY_V3,
];
