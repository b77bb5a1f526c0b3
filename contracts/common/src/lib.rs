//! Shared building blocks for the harvest contract suite.
//!
//! This crate provides:
//! - [`authorization`]: the single-owner + authorized-set registry that gates
//!   every privileged mutation in the suite.
//! - [`ttl`]: storage time-to-live thresholds and helpers so every contract
//!   keeps its entries alive on the same thresholds.

#![no_std]

pub mod authorization;
pub mod ttl;

pub use authorization::AuthorizationSet;
