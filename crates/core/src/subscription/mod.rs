//! Referral-driven subscription pricing and access gating.
//!
//! This module implements the subscription engine:
//! - Tenant and status domain types
//! - Referral discount computation (always derived, never a stored counter)
//! - Final pricing with clamping
//! - Trial-window math that fails closed on bad signup dates
//! - The access gate evaluated on every authenticated request

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::SubscriptionError;
pub use service::SubscriptionService;
pub use types::{AccessDecision, DiscountPolicy, SubscriptionPolicy, SubscriptionStatus, Tenant};
