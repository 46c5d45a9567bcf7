#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! REST client for the help center.

mod rest_client;

pub use help_center_sdk::HelpCenterClientV1;
pub use rest_client::{RestClient, paths};
