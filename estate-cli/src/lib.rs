//! Rent indexation and entity relationship tooling for property management data
//!
//! [`indexation`] computes the adjustment owed on a rent payment from the
//! active Base Parameters fetched through [`api`]; [`relationships`] models
//! which entity kinds inherit from or associate with each other.

pub mod api;
pub mod cli;
pub mod config;
pub mod indexation;
pub mod relationships;
