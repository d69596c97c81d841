use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use certpolicy::*;

struct CountingValidator {
    name: &'static str,
    result: Result<()>,
    calls: Arc<AtomicUsize>,
}

impl CountingValidator {
    fn boxed(
        name: &'static str,
        result: Result<()>,
        calls: &Arc<AtomicUsize>,
    ) -> BoxedCertificateValidator {
        Box::new(CountingValidator {
            name,
            result,
            calls: Arc::clone(calls),
        })
    }
}

impl CertificateValidator for CountingValidator {
    fn name(&self) -> &str {
        self.name
    }

    fn validate(&self, _cert: &PDVCertificate) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
    }
}

fn two_policies() -> PDVCertificate {
    parse_cert(
        include_bytes!("examples/ee_two_policies.der"),
        "ee_two_policies.der",
    )
    .unwrap()
}

#[test]
fn empty_chain_accepts() {
    let chain = CertificateValidatorChain::new();
    assert!(chain.is_empty());
    assert!(chain.validate(&two_policies()).is_ok());
    assert!(chain.validate_all(&two_policies()).is_empty());
}

#[test]
fn chain_stops_at_first_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = CertificateValidatorChain::new();
    chain.add_validator(CountingValidator::boxed("first", Ok(()), &calls));
    chain.add_validator(CountingValidator::boxed(
        "second",
        Err(Error::Unrecognized),
        &calls,
    ));
    chain.add_validator(CountingValidator::boxed("third", Ok(()), &calls));
    assert_eq!(3, chain.len());
    assert_eq!(vec!["first", "second", "third"], chain.names());

    assert_eq!(Err(Error::Unrecognized), chain.validate(&two_policies()));
    assert_eq!(2, calls.load(Ordering::SeqCst));
}

#[test]
fn policy_error_passes_through_chain_unchanged() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut settings = ValidationSettings::new();
    settings.set_disallowed_subject_certificate_policies(vec!["2.23.140.1.2.1".to_string()]);

    let mut chain = CertificateValidatorChain::new();
    populate_subject_certificate_chain(&mut chain, &settings).unwrap();
    chain.add_validator(CountingValidator::boxed("after", Ok(()), &calls));
    assert_eq!(vec!["SubjectPolicyValidator", "after"], chain.names());

    let r = chain.validate(&two_policies());
    assert_eq!(
        Err(Error::DisallowedPolicy(
            PolicyIdentifier::new("2.23.140.1.2.1").unwrap()
        )),
        r
    );
    assert_eq!(0, calls.load(Ordering::SeqCst));
}

#[test]
fn validate_all_reports_each_validator() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = CertificateValidatorChain::new();
    populate_subject_certificate_chain(
        &mut chain,
        &ValidationSettings::with_default_disallowed_policies(),
    )
    .unwrap();
    chain.add_validator(CountingValidator::boxed(
        "failing",
        Err(Error::NotFound),
        &calls,
    ));
    chain.add_validator(CountingValidator::boxed("passing", Ok(()), &calls));

    let results = chain.validate_all(&two_policies());
    assert_eq!(2, calls.load(Ordering::SeqCst));
    assert_eq!(
        vec![
            (
                "SubjectPolicyValidator".to_string(),
                ValidationVerdict::Accepted
            ),
            (
                "failing".to_string(),
                ValidationVerdict::Rejected(Error::NotFound)
            ),
            ("passing".to_string(), ValidationVerdict::Accepted),
        ],
        results
    );
    assert_eq!(ValidationStatus::Valid, results[0].1.status());
    assert!(!results[1].1.is_accepted());
}

#[test]
fn clear_validators() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = CertificateValidatorChain::new();
    chain.add_validator(CountingValidator::boxed(
        "failing",
        Err(Error::NotFound),
        &calls,
    ));
    assert!(chain.validate(&two_policies()).is_err());

    chain.clear_validators();
    assert!(chain.is_empty());
    assert!(chain.validate(&two_policies()).is_ok());
    assert_eq!(1, calls.load(Ordering::SeqCst));
}

#[test]
fn misconfigured_chain_is_unchanged() {
    let mut chain = CertificateValidatorChain::new();
    assert_eq!(
        Err(Error::Misconfiguration),
        populate_subject_certificate_chain(&mut chain, &ValidationSettings::new())
    );
    assert!(chain.is_empty());

    let mut settings = ValidationSettings::new();
    settings.set_disallowed_subject_certificate_policies(vec!["1.2.3.".to_string()]);
    assert_eq!(
        Err(Error::Misconfiguration),
        populate_subject_certificate_chain(&mut chain, &settings)
    );
    assert!(chain.is_empty());
}

#[test]
fn verdict_display() {
    assert_eq!("Accepted", ValidationVerdict::from(Ok(())).to_string());
    let rejected = ValidationVerdict::from(Err(Error::DisallowedPolicy(
        ESTEID_SK_2015_MOBILE_ID_POLICY_V2.into(),
    )));
    assert_eq!(ValidationStatus::DisallowedPolicy, rejected.status());
    assert!(rejected
        .to_string()
        .starts_with("Rejected: "));
    assert!(rejected.to_string().contains("1.3.6.1.4.1.10015.1.3.2"));
}

#[test]
fn chain_shared_across_threads() {
    let mut chain = CertificateValidatorChain::new();
    populate_subject_certificate_chain(
        &mut chain,
        &ValidationSettings::with_default_disallowed_policies(),
    )
    .unwrap();
    let accepted = two_policies();
    let rejected = parse_cert(
        include_bytes!("examples/ee_mobile_id_policy.der"),
        "ee_mobile_id_policy.der",
    )
    .unwrap();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                assert!(chain.validate(&accepted).is_ok());
                assert_eq!(
                    Err(Error::DisallowedPolicy(ESTEID_SK_2015_MOBILE_ID_POLICY_V1.into())),
                    chain.validate(&rejected)
                );
            });
        }
    });
}
