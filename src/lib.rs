pub mod branch;
pub mod config;
pub mod config_manager;
pub mod error;
pub mod executor;
pub mod fs_utils;
pub mod ops;
pub mod policy;
pub mod ugid;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod integration_tests;
