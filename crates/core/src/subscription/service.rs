//! Subscription and discount service.
//!
//! Pure computations over a snapshot of the tenant directory: referral
//! discounts, final pricing, trial-window math, and the access gate evaluated
//! on every authenticated request. The discount is always derived from the
//! live directory, never from a stored counter that can drift.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::SubscriptionError;
use super::types::{AccessDecision, DiscountPolicy, SubscriptionPolicy, SubscriptionStatus, Tenant};

/// Date format used by the storage rows.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Characters used in generated referral codes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated referral codes.
const CODE_LEN: usize = 8;

/// Subscription service for pricing and access gating.
pub struct SubscriptionService;

impl SubscriptionService {
    /// Computes the tenant's referral discount percent, in `[0, cap]`.
    ///
    /// Counts tenants in `directory` referred by this tenant whose status
    /// still counts as active, multiplies by the per-referral percent, adds
    /// the referred-by bonus when configured, and caps the sum. Affiliates
    /// are outside billing and always get zero.
    #[must_use]
    pub fn discount_percent(
        tenant: &Tenant,
        directory: &[Tenant],
        policy: &DiscountPolicy,
    ) -> Decimal {
        if !tenant.status.is_billable() {
            return Decimal::ZERO;
        }

        let referrals = directory
            .iter()
            .filter(|t| tenant.refers(t) && t.status.counts_as_active_referral())
            .count();
        let referrals = u64::try_from(referrals).unwrap_or(u64::MAX);

        let earned = referrals.saturating_mul(u64::from(policy.percent_per_referral));
        let bonus = if tenant.referred_by.is_some() {
            u64::from(policy.referred_bonus)
        } else {
            0
        };
        let percent = earned.saturating_add(bonus).min(u64::from(policy.cap));
        Decimal::from(percent)
    }

    /// Computes the discounted monthly price, rounded to cents.
    ///
    /// Clamps the percent to `[0, 100]` and the price to `>= 0`; at a 100%
    /// discount the price is exactly zero.
    #[must_use]
    pub fn final_price(base_price: Decimal, discount_percent: Decimal) -> Decimal {
        let percent = discount_percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let price = base_price * (Decimal::ONE_HUNDRED - percent) / Decimal::ONE_HUNDRED;
        price.max(Decimal::ZERO).round_dp(2)
    }

    /// Returns the number of trial days remaining (negative once expired).
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::MissingSignupDate`] or
    /// [`SubscriptionError::MalformedSignupDate`] when the signup timestamp
    /// is absent or unparseable. Callers gating access must treat either as
    /// an expired trial, never as indefinite access.
    pub fn trial_days_left(
        tenant: &Tenant,
        today: NaiveDate,
        policy: &SubscriptionPolicy,
    ) -> Result<i64, SubscriptionError> {
        let raw = tenant
            .signup_date
            .as_deref()
            .ok_or(SubscriptionError::MissingSignupDate)?;
        let signup = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            SubscriptionError::MalformedSignupDate {
                value: raw.to_string(),
            }
        })?;
        Ok(policy.trial_days - (today - signup).num_days())
    }

    /// Decides whether the tenant may use the product right now.
    ///
    /// - `Allow`: active/free-lifetime/affiliate status, a trial with days
    ///   remaining, or the designated administrative account.
    /// - `FreeUnlockAvailable`: gated but the referral discount reached 100%.
    /// - `RequirePayment`: gated; carries the discounted price for display
    ///   and checkout handoff.
    ///
    /// Signup-date failures fail closed: a tenant whose trial cannot be
    /// computed is gated like an expired one.
    #[must_use]
    pub fn access_decision(
        tenant: &Tenant,
        directory: &[Tenant],
        today: NaiveDate,
        policy: &SubscriptionPolicy,
    ) -> AccessDecision {
        if policy.admin_username.as_deref() == Some(tenant.username.as_str()) {
            return AccessDecision::Allow;
        }
        if tenant.status.grants_access() {
            return AccessDecision::Allow;
        }
        if tenant.status == SubscriptionStatus::Trial
            && Self::trial_days_left(tenant, today, policy).is_ok_and(|days| days > 0)
        {
            return AccessDecision::Allow;
        }

        let discount = Self::discount_percent(tenant, directory, &policy.discount);
        if discount >= Decimal::ONE_HUNDRED {
            AccessDecision::FreeUnlockAvailable
        } else {
            AccessDecision::RequirePayment {
                price: Self::final_price(policy.base_price, discount),
            }
        }
    }

    /// Applies a successful payment/checkout completion reported by the
    /// billing collaborator.
    ///
    /// Trial and Expired tenants become Active; Active, FreeLifetime, and
    /// Affiliate are unchanged.
    #[must_use]
    pub const fn on_payment_completed(status: SubscriptionStatus) -> SubscriptionStatus {
        match status {
            SubscriptionStatus::Trial | SubscriptionStatus::Expired => SubscriptionStatus::Active,
            other => other,
        }
    }

    /// Claims free lifetime access once the referral discount reaches 100%.
    ///
    /// The claim is an explicit tenant action (matching the legacy button
    /// flow), not an automatic transition. Idempotent for tenants already in
    /// `FreeLifetime`, even if their referrals later lapse.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::ThresholdNotReached`] when the current
    /// discount is below 100%.
    pub fn claim_free_lifetime(
        tenant: &Tenant,
        directory: &[Tenant],
        policy: &SubscriptionPolicy,
    ) -> Result<SubscriptionStatus, SubscriptionError> {
        if tenant.status == SubscriptionStatus::FreeLifetime {
            return Ok(SubscriptionStatus::FreeLifetime);
        }

        let discount = Self::discount_percent(tenant, directory, &policy.discount);
        if discount < Decimal::ONE_HUNDRED {
            return Err(SubscriptionError::ThresholdNotReached {
                discount_percent: discount,
            });
        }
        Ok(SubscriptionStatus::FreeLifetime)
    }

    /// Generates a new referral code: 8 uppercase alphanumeric characters.
    ///
    /// Uniqueness against existing codes is the caller's responsibility
    /// (codes are unique per tenant and never reused once assigned).
    pub fn generate_referral_code<R: rand::Rng + ?Sized>(rng: &mut R) -> String {
        (0..CODE_LEN)
            .map(|_| char::from(CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())]))
            .collect()
    }
}
