//! Shared utilities for the staking contract suite.
//!
//! This crate provides the [`roles`] module: a persistent two-capability
//! role registry (steward and configuration) used to gate administrative
//! entry points.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod roles;

pub use roles::*;
