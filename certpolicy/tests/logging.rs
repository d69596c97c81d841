#![cfg(feature = "std")]

use std::sync::Mutex;

use certpolicy::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

fn logged(level: Level, text: &str) -> bool {
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .any(|(l, m)| *l == level && m.contains(text))
}

// one test function since the logger is process-wide
#[test]
fn log_records() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    assert!(parse_cert(&[0x30, 0x03, 0x02, 0x01], "junk.der").is_err());
    assert!(logged(Level::Error, "Failed to parse certificate from junk.der"));

    assert!(oid_set_from_strings(&["1.2.03".to_string()]).is_err());
    assert!(logged(Level::Error, "Disallowed policy 1.2.03"));

    assert_eq!(
        Err(Error::Misconfiguration),
        SubjectPolicyValidator::try_from(&ValidationSettings::new())
    );
    assert!(logged(
        Level::Error,
        "No disallowed subject certificate policies were configured"
    ));

    let ee = parse_cert(
        include_bytes!("examples/ee_no_policies.der"),
        "ee_no_policies.der",
    )
    .unwrap();
    let v = SubjectPolicyValidator::from_strings(&["1.2.3.4".to_string()]).unwrap();
    assert!(v.validate(&ee).is_ok());
    assert!(logged(
        Level::Debug,
        "No disallowed certificate policies found for certificate issued to"
    ));
    assert!(logged(Level::Debug, "(ee_no_policies.der)"));

    let ee = parse_cert(
        include_bytes!("examples/ee_truncated_policies.der"),
        "ee_truncated_policies.der",
    )
    .unwrap();
    assert!(v.validate(&ee).is_err());
    assert!(logged(Level::Error, "Certificate policy check failed with PolicyParseError"));
}
