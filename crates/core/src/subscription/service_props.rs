//! Property-based tests for `SubscriptionService`.
//!
//! - Discount monotonicity and [0, 100] bound
//! - Price floor: never negative, exactly zero at 100%
//! - Fail-closed gating for tenants without a usable signup date

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use trestle_shared::types::TenantId;

use super::service::SubscriptionService;
use super::types::{AccessDecision, DiscountPolicy, SubscriptionPolicy, SubscriptionStatus, Tenant};

fn referrer() -> Tenant {
    Tenant {
        id: TenantId::new(),
        username: "referrer".to_string(),
        signup_date: Some("2024-01-01".to_string()),
        status: SubscriptionStatus::Expired,
        referral_code: "AAAA1111".to_string(),
        referred_by: None,
    }
}

fn referred_directory(n: usize) -> Vec<Tenant> {
    (0..n)
        .map(|i| Tenant {
            id: TenantId::new(),
            username: format!("referee{i}"),
            signup_date: Some("2024-02-01".to_string()),
            status: SubscriptionStatus::Active,
            referral_code: format!("CODE{i:04}"),
            referred_by: Some("AAAA1111".to_string()),
        })
        .collect()
}

/// Strategy to generate positive base prices (0.01 to 1,000.00).
fn base_price() -> impl Strategy<Value = Decimal> {
    (1i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate discount percents, including out-of-range ones.
fn any_percent() -> impl Strategy<Value = Decimal> {
    (-50i64..200i64).prop_map(Decimal::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Discount is always within [0, 100].
    #[test]
    fn prop_discount_bounded(referrals in 0usize..40) {
        let tenant = referrer();
        let directory = referred_directory(referrals);
        let discount =
            SubscriptionService::discount_percent(&tenant, &directory, &DiscountPolicy::default());
        prop_assert!(discount >= Decimal::ZERO);
        prop_assert!(discount <= Decimal::ONE_HUNDRED);
    }

    /// Discount is non-decreasing in the number of active referrals.
    #[test]
    fn prop_discount_monotonic(referrals in 0usize..30) {
        let tenant = referrer();
        let policy = DiscountPolicy::default();
        let smaller =
            SubscriptionService::discount_percent(&tenant, &referred_directory(referrals), &policy);
        let larger = SubscriptionService::discount_percent(
            &tenant,
            &referred_directory(referrals + 1),
            &policy,
        );
        prop_assert!(smaller <= larger);
    }

    /// Price is never negative and never exceeds the base price.
    #[test]
    fn prop_price_within_range(base in base_price(), percent in any_percent()) {
        let price = SubscriptionService::final_price(base, percent);
        prop_assert!(price >= Decimal::ZERO);
        prop_assert!(price <= base);
    }

    /// A 100% discount always prices to exactly zero.
    #[test]
    fn prop_price_floor_at_full_discount(base in base_price()) {
        prop_assert_eq!(
            SubscriptionService::final_price(base, Decimal::ONE_HUNDRED),
            Decimal::ZERO
        );
    }

    /// A trial tenant with no usable signup date is never allowed in,
    /// whatever the date text says.
    #[test]
    fn prop_unparseable_signup_fails_closed(raw in "[a-z /.]{0,12}") {
        let tenant = Tenant {
            id: TenantId::new(),
            username: "smith".to_string(),
            signup_date: Some(raw),
            status: SubscriptionStatus::Trial,
            referral_code: "AAAA1111".to_string(),
            referred_by: None,
        };
        let policy = SubscriptionPolicy::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();

        let decision = SubscriptionService::access_decision(&tenant, &[], today, &policy);
        prop_assert_ne!(decision, AccessDecision::Allow);
    }
}
