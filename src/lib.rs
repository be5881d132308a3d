//! AHP Advisor - Multi-criteria recommendation engine
//!
//! This crate implements the Analytic Hierarchy Process: rank-ordered
//! criteria become consistency-checked weights over a goal → main → sub
//! hierarchy, and those weights rank scored alternatives.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
