//! Arguments for the Policy Check utility

use clap::Parser;

/// Policy Check
///
/// Checks the certificatePolicies extension of subject certificates against a list of disallowed
/// certificate policies.
#[derive(Parser, Debug, Default)]
#[command(arg_required_else_help(true))]
#[clap(author, version, about, long_about = None)]
pub struct PolicyCheckArgs {
    /// Full path and filename of JSON-formatted settings file containing the list of disallowed
    /// subject certificate policies. When absent, the ESTEID-SK 2015 Mobile-ID policies are
    /// disallowed.
    #[clap(short, long, help_heading = "COMMON OPTIONS")]
    pub settings: Option<String>,

    /// Dotted-decimal certificate policy OID to add to the list of disallowed policies. May be
    /// repeated.
    #[clap(short, long, value_name = "OID", help_heading = "COMMON OPTIONS")]
    pub disallowed_policy: Vec<String>,

    /// Full path and filename of YAML-formatted configuration file for log4rs logging mechanism.
    /// See <https://docs.rs/log4rs/latest/log4rs/> for details.
    #[clap(short, long, help_heading = "COMMON OPTIONS")]
    pub logging_config: Option<String>,

    /// Full path and filename of a DER or PEM encoded subject certificate to check.
    #[clap(short, long, help_heading = "CHECK ACTIONS")]
    pub end_entity_file: Option<String>,

    /// Full path of folder containing DER or PEM encoded subject certificates to check. The folder
    /// is processed recursively and only files with .der, .crt, .cer or .pem extension are checked.
    #[clap(short = 'f', long, help_heading = "CHECK ACTIONS")]
    pub end_entity_folder: Option<String>,

    /// Print the effective list of disallowed subject certificate policies.
    #[clap(long, help_heading = "DIAGNOSTICS")]
    pub list_disallowed_policies: bool,

    /// Full path and filename of file to receive the effective settings as JSON, i.e., to prepare
    /// a settings file for later use with --settings.
    #[clap(short, long, help_heading = "DIAGNOSTICS")]
    pub write_settings: Option<String>,
}
