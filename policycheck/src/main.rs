#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

mod args;
mod check_files;
mod stats;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use certpolicy::*;

use crate::args::PolicyCheckArgs;
use crate::check_files::*;
use crate::stats::CheckStats;

/// Installs a log4rs configuration read from the `--logging-config` file or, failing that, one
/// that writes to stdout.
fn configure_logging(args: &PolicyCheckArgs) {
    let mut logging_configured = false;

    if let Some(logging_config) = &args.logging_config {
        if let Err(e) = log4rs::init_file(logging_config, Default::default()) {
            println!(
                "ERROR: failed to configure logging using {} with {:?}. Continuing without logging.",
                logging_config, e
            );
        } else {
            logging_configured = true;
        }
    }

    if !logging_configured {
        // if there's no config, prepare one using stdout
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .build();
        match Config::builder()
            .appender(Appender::builder().build("stdout", Box::new(stdout)))
            .build(Root::builder().appender("stdout").build(LevelFilter::Info))
        {
            Ok(config) => {
                if let Err(e) = log4rs::init_config(config) {
                    println!(
                        "ERROR: failed to configure logging for stdout with {:?}. Continuing without logging.",
                        e
                    );
                }
            }
            Err(e) => {
                println!("ERROR: failed to prepare default logging configuration with {:?}. Continuing without logging", e);
            }
        }
    }
}

/// Reads settings from the `--settings` file, or uses the default disallowed policies, then
/// appends any `--disallowed-policy` values.
fn prepare_settings(args: &PolicyCheckArgs) -> Result<ValidationSettings> {
    let mut settings = match &args.settings {
        Some(fname) => {
            if !Path::new(fname).exists() {
                println!("ERROR: settings file {} does not exist", fname);
                return Err(Error::NotFound);
            }
            read_settings(&args.settings)?
        }
        None => ValidationSettings::with_default_disallowed_policies(),
    };

    if !args.disallowed_policy.is_empty() {
        let mut policies = settings
            .get_disallowed_subject_certificate_policies()
            .unwrap_or_default();
        for policy in &args.disallowed_policy {
            if !policies.contains(policy) {
                policies.push(policy.clone());
            }
        }
        settings.set_disallowed_subject_certificate_policies(policies);
    }
    Ok(settings)
}

/// Writes `settings` as pretty-printed JSON to `fname`.
fn write_settings(fname: &str, settings: &ValidationSettings) -> Result<()> {
    let json = match serde_json::to_string_pretty(settings) {
        Ok(json) => json,
        Err(e) => {
            println!("ERROR: failed to serialize settings with {}", e);
            return Err(Error::ParseError);
        }
    };
    std::fs::write(fname, json)?;
    Ok(())
}

/// Point of entry for Policy Check application.
fn main() -> ExitCode {
    let args = PolicyCheckArgs::parse();
    configure_logging(&args);
    debug!("Policy Check start");

    let settings = match prepare_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            println!("ERROR: failed to prepare settings with {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(fname) = &args.write_settings {
        if let Err(e) = write_settings(fname, &settings) {
            println!("ERROR: failed to write settings to {} with {}", fname, e);
            return ExitCode::FAILURE;
        }
    }

    if args.list_disallowed_policies {
        match settings.get_disallowed_subject_certificate_policies() {
            Some(policies) => {
                println!("Disallowed subject certificate policies: {}", policies.len());
                for policy in policies {
                    println!("\t{}", policy);
                }
            }
            None => println!("No disallowed subject certificate policies are configured"),
        }
    }

    if args.end_entity_file.is_none() && args.end_entity_folder.is_none() {
        return ExitCode::SUCCESS;
    }

    let mut chain = CertificateValidatorChain::new();
    if let Err(e) = populate_subject_certificate_chain(&mut chain, &settings) {
        println!("ERROR: failed to prepare subject certificate checks with {}", e);
        return ExitCode::FAILURE;
    }

    let mut stats = CheckStats::default();
    if let Some(filename) = &args.end_entity_file {
        check_cert_file(&chain, Path::new(filename), &mut stats);
    }
    if let Some(folder) = &args.end_entity_folder {
        if let Err(e) = check_cert_folder(&chain, folder, &mut stats) {
            println!("ERROR: failed to process {} with {}", folder, e);
            return ExitCode::FAILURE;
        }
    }

    println!("{}", stats);
    debug!("Policy Check end");

    if stats.all_accepted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
