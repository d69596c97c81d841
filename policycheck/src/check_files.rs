//! Contains utility functions related to reading subject certificates from the filesystem and
//! checking them

use std::ffi::OsStr;
use std::path::Path;

use log::{error, info};
use walkdir::WalkDir;

use certpolicy::*;

use crate::stats::CheckStats;

/// File extensions of files processed by [`check_cert_folder`].
pub const CERT_FILE_EXTENSIONS: &[&str] = &["der", "crt", "cer", "pem"];

/// `get_file_as_byte_vec` takes a Path containing a file name and returns a vector of bytes
/// containing the contents of that file.
pub fn get_file_as_byte_vec(filename: &Path) -> Result<Vec<u8>> {
    Ok(std::fs::read(filename)?)
}

/// `cert_from_buffer` parses a buffer containing either a binary DER encoded certificate or a PEM
/// encoded certificate. PEM is detected by the presence of the encapsulation boundary at the start
/// of the buffer, ignoring leading whitespace.
pub fn cert_from_buffer(buffer: &[u8], locator: &str) -> Result<PDVCertificate> {
    let start = buffer
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(buffer.len());
    let trimmed = &buffer[start..];
    if !trimmed.starts_with(b"-----BEGIN") {
        return parse_cert(buffer, locator);
    }

    match pem_rfc7468::decode_vec(trimmed) {
        Ok((label, der_cert)) => {
            if label != "CERTIFICATE" {
                error!("Unexpected PEM label {} in {}", label, locator);
                return Err(Error::Unrecognized);
            }
            parse_cert(&der_cert, locator)
        }
        Err(e) => {
            error!("Failed to decode PEM from {}: {}", locator, e);
            Err(Error::ParseError)
        }
    }
}

/// `check_cert_file` reads the certificate at `filename`, runs the chain against it, prints the
/// verdict and records it in `stats`. A file that cannot be read or parsed is reported as rejected.
pub fn check_cert_file(
    chain: &CertificateValidatorChain,
    filename: &Path,
    stats: &mut CheckStats,
) -> ValidationVerdict {
    let locator = filename.display().to_string();
    let verdict = match get_file_as_byte_vec(filename)
        .and_then(|buffer| cert_from_buffer(&buffer, &locator))
    {
        Ok(cert) => ValidationVerdict::from(chain.validate(&cert)),
        Err(e) => {
            error!("Failed to read certificate from {}: {}", locator, e);
            ValidationVerdict::Rejected(e)
        }
    };
    println!("{}: {}", locator, verdict);
    stats.record(&verdict);
    verdict
}

/// `check_cert_folder` recursively iterates over the contents of the folder identified by the
/// `certs_folder` parameter and invokes [`check_cert_file`] for files with one of the
/// [`CERT_FILE_EXTENSIONS`]. Returns [`Error::NotFound`] if the folder does not exist.
pub fn check_cert_folder(
    chain: &CertificateValidatorChain,
    certs_folder: &str,
    stats: &mut CheckStats,
) -> Result<()> {
    if !Path::is_dir(Path::new(certs_folder)) {
        error!("{} does not exist or is not a directory", certs_folder);
        return Err(Error::NotFound);
    }

    for entry in WalkDir::new(certs_folder).sort_by_file_name() {
        match entry {
            Ok(e) => {
                if e.file_type().is_dir() {
                    continue;
                }
                let wanted = e
                    .path()
                    .extension()
                    .and_then(OsStr::to_str)
                    .map(|ext| CERT_FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false);
                if wanted {
                    check_cert_file(chain, e.path(), stats);
                } else {
                    info!("Skipping {}", e.path().display());
                }
            }
            Err(e) => {
                error!("Failed to unwrap entry in {}: {}", certs_folder, e);
            }
        }
    }
    Ok(())
}
