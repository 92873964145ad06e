//! Subscription domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trestle_shared::config::AppConfig;
use trestle_shared::types::TenantId;

/// Subscription status of a tenant.
///
/// `FreeLifetime` is the absorbing variant of `Active` reached through the
/// referral reward; it keeps its own storage token so the state stays
/// observable. The legacy default "Inactive" parses as `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Inside the free trial window.
    Trial,
    /// Paying subscriber.
    Active,
    /// Trial ran out or subscription lapsed; no access.
    Expired,
    /// Earned free access via the referral threshold. Terminal.
    FreeLifetime,
    /// Non-billable tracking-only role, orthogonal to billing.
    Affiliate,
}

impl SubscriptionStatus {
    /// Returns true if a referral in this status counts toward the referrer's
    /// discount. `FreeLifetime` counts because it is the absorbing variant of
    /// `Active`.
    #[must_use]
    pub const fn counts_as_active_referral(self) -> bool {
        matches!(self, Self::Trial | Self::Active | Self::FreeLifetime)
    }

    /// Returns true if this status grants product access without any trial or
    /// payment check. Affiliates are never billed and are never gated.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::Active | Self::FreeLifetime | Self::Affiliate)
    }

    /// Returns true if this status participates in billing at all.
    #[must_use]
    pub const fn is_billable(self) -> bool {
        !matches!(self, Self::Affiliate)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trial => write!(f, "Trial"),
            Self::Active => write!(f, "Active"),
            Self::Expired => write!(f, "Expired"),
            Self::FreeLifetime => write!(f, "FreeLifetime"),
            Self::Affiliate => write!(f, "Affiliate"),
        }
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trial" => Ok(Self::Trial),
            "active" => Ok(Self::Active),
            // "Inactive" is the legacy storage default for expired accounts.
            "expired" | "inactive" => Ok(Self::Expired),
            "freelifetime" | "free_lifetime" => Ok(Self::FreeLifetime),
            "affiliate" => Ok(Self::Affiliate),
            _ => Err(format!("Unknown subscription status: {s}")),
        }
    }
}

/// A tenant (firm account), root of its own projects, invoices, and payments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Tenant ID.
    pub id: TenantId,
    /// Login name; also used to designate the administrative account.
    pub username: String,
    /// Signup date as stored (`YYYY-MM-DD` text). Absent on legacy rows
    /// created before the column existed; trial math fails closed on those.
    pub signup_date: Option<String>,
    /// Current subscription status.
    pub status: SubscriptionStatus,
    /// This tenant's own referral code, unique, assigned at signup and never
    /// reused.
    pub referral_code: String,
    /// Referral code of whoever referred this tenant, if any.
    pub referred_by: Option<String>,
}

impl Tenant {
    /// Returns true if `other` was referred by this tenant.
    #[must_use]
    pub fn refers(&self, other: &Self) -> bool {
        other.referred_by.as_deref() == Some(self.referral_code.as_str())
    }
}

/// Discount policy knobs.
///
/// The referred-by bonus exists only in some product variants, so it defaults
/// to zero; when non-zero it combines additively with the earned discount and
/// the cap still applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountPolicy {
    /// Percent earned per active referral.
    pub percent_per_referral: u32,
    /// Flat extra percent for tenants who were themselves referred.
    pub referred_bonus: u32,
    /// Maximum total discount percent.
    pub cap: u32,
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        Self {
            percent_per_referral: 10,
            referred_bonus: 0,
            cap: 100,
        }
    }
}

/// Subscription policy: trial window, pricing, discounts, admin bypass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPolicy {
    /// Length of the free trial window, in days.
    pub trial_days: i64,
    /// Monthly base price before discounts.
    pub base_price: Decimal,
    /// Discount knobs.
    pub discount: DiscountPolicy,
    /// Username of the designated administrative account, which bypasses
    /// access gating entirely.
    pub admin_username: Option<String>,
}

impl Default for SubscriptionPolicy {
    fn default() -> Self {
        Self {
            trial_days: 30,
            base_price: Decimal::new(2999, 2), // $29.99
            discount: DiscountPolicy::default(),
            admin_username: None,
        }
    }
}

impl From<&AppConfig> for SubscriptionPolicy {
    fn from(config: &AppConfig) -> Self {
        Self {
            trial_days: config.billing.trial_days,
            base_price: config.billing.base_price,
            discount: DiscountPolicy {
                percent_per_referral: config.billing.percent_per_referral,
                referred_bonus: config.billing.referred_bonus,
                cap: 100,
            },
            admin_username: config.admin.username.clone(),
        }
    }
}

/// Outcome of the access gate evaluated on every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// Render the product.
    Allow,
    /// Tenant has earned a 100% discount and may claim free lifetime access.
    FreeUnlockAvailable,
    /// Show the paywall with the discounted price for checkout handoff.
    RequirePayment {
        /// Discounted monthly price to display and charge.
        price: Decimal,
    },
}
