//! Core business logic for Trestle.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - AR ledger reconciliation: invoices and payments merged into a
//!   running-balance view with summary totals
//! - `subscription` - Referral-driven subscription pricing and access gating

pub mod ledger;
pub mod subscription;
