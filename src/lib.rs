//! Payroll Engine for Mali statutory rules
//!
//! This crate computes monthly payroll: attendance-adjusted base salary,
//! allowances, INPS and AMO social contributions, progressive income tax
//! with family reductions, net pay and the employer's labor taxes. It also
//! recomputes whole payroll periods against a pluggable store and exposes
//! everything over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
