//! Basic utility functionality supporting subject certificate validation

pub mod error;
pub mod logging;
pub mod policy_identifier;
pub mod policy_oids;

pub use crate::{
    util::error::*, util::logging::*, util::policy_identifier::*, util::policy_oids::*,
};
