//! Subject certificate validation

pub mod pdv_certificate;
pub mod policy_validator;
pub mod validation_settings;
pub mod validator_chain;

pub use crate::{
    validator::pdv_certificate::*, validator::policy_validator::*,
    validator::validation_settings::*, validator::validator_chain::*,
};
