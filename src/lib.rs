//! Spardha composition root.
//!
//! Loads configuration, installs tracing, wires the adapters from
//! `sp-infra` into the services from `sp-app`, and drives them from the
//! command line.

pub mod bootstrap;
pub mod cli;
