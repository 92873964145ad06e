//! Property-based tests for `LedgerService`.
//!
//! - Balance identity: final running balance equals charged - collected
//! - Monotonic ordering: entries are non-decreasing in date
//! - Idempotence and insertion-order invariance of the totals

use proptest::prelude::*;
use rust_decimal::Decimal;
use trestle_shared::types::{InvoiceId, PaymentId, ProjectId};

use super::service::LedgerService;
use super::types::{Invoice, Payment};

/// Strategy to generate positive decimal amounts (0.01 to 100,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate valid stored dates within 2024.
fn stored_date() -> impl Strategy<Value = String> {
    (1u32..=12u32, 1u32..=28u32).prop_map(|(m, d)| format!("2024-{m:02}-{d:02}"))
}

/// Strategy to generate an invoice row.
fn invoice_strategy(number: i64) -> impl Strategy<Value = Invoice> {
    (positive_amount(), stored_date()).prop_map(move |(amount, date)| Invoice {
        id: InvoiceId::new(),
        project_id: ProjectId::new(),
        number,
        amount,
        tax: Decimal::ZERO,
        date,
        description: "work".to_string(),
    })
}

/// Strategy to generate a payment row.
fn payment_strategy() -> impl Strategy<Value = Payment> {
    (positive_amount(), stored_date()).prop_map(|(amount, date)| Payment {
        id: PaymentId::new(),
        project_id: ProjectId::new(),
        amount,
        date,
        note: "check".to_string(),
    })
}

fn invoices_strategy(max_len: usize) -> impl Strategy<Value = Vec<Invoice>> {
    prop::collection::vec(invoice_strategy(1001), 0..=max_len)
}

fn payments_strategy(max_len: usize) -> impl Strategy<Value = Vec<Payment>> {
    prop::collection::vec(payment_strategy(), 0..=max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The final running balance always equals `charged - collected`, and the
    /// totals always equal the plain sums of the inputs.
    #[test]
    fn prop_balance_identity(
        invoices in invoices_strategy(20),
        payments in payments_strategy(20),
    ) {
        let ledger = LedgerService::build_ledger(&invoices, &payments).unwrap();

        let charged: Decimal = invoices.iter().map(|i| i.amount).sum();
        let collected: Decimal = payments.iter().map(|p| p.amount).sum();

        prop_assert_eq!(ledger.totals.charged, charged);
        prop_assert_eq!(ledger.totals.collected, collected);
        prop_assert_eq!(ledger.totals.balance, charged - collected);

        if let Some(last) = ledger.entries.last() {
            prop_assert_eq!(last.balance, ledger.totals.balance);
        } else {
            prop_assert_eq!(ledger.totals.balance, Decimal::ZERO);
        }
    }

    /// Entries come out in non-decreasing date order.
    #[test]
    fn prop_entries_sorted_by_date(
        invoices in invoices_strategy(20),
        payments in payments_strategy(20),
    ) {
        let ledger = LedgerService::build_ledger(&invoices, &payments).unwrap();
        for pair in ledger.entries.windows(2) {
            prop_assert!(pair[0].date <= pair[1].date);
        }
    }

    /// Each entry's balance equals the previous balance plus its signed amount.
    #[test]
    fn prop_running_balance_chain(
        invoices in invoices_strategy(20),
        payments in payments_strategy(20),
    ) {
        let ledger = LedgerService::build_ledger(&invoices, &payments).unwrap();
        let mut previous = Decimal::ZERO;
        for entry in &ledger.entries {
            prop_assert_eq!(entry.balance, previous + entry.signed_amount());
            previous = entry.balance;
        }
    }

    /// Building twice on the same input yields identical output.
    #[test]
    fn prop_build_ledger_idempotent(
        invoices in invoices_strategy(10),
        payments in payments_strategy(10),
    ) {
        let first = LedgerService::build_ledger(&invoices, &payments).unwrap();
        let second = LedgerService::build_ledger(&invoices, &payments).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Totals are invariant under permutation of the insertion order.
    #[test]
    fn prop_totals_invariant_under_permutation(
        invoices in invoices_strategy(10),
        payments in payments_strategy(10),
        seed in any::<u64>(),
    ) {
        let baseline = LedgerService::build_ledger(&invoices, &payments).unwrap();

        // Deterministic pseudo-shuffle driven by the seed.
        let mut shuffled_invoices = invoices.clone();
        let mut shuffled_payments = payments.clone();
        let mut state = seed;
        let mut next = |bound: usize| -> usize {
            state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            usize::try_from(state >> 33).unwrap_or(0) % bound.max(1)
        };
        for i in (1..shuffled_invoices.len()).rev() {
            shuffled_invoices.swap(i, next(i + 1));
        }
        for i in (1..shuffled_payments.len()).rev() {
            shuffled_payments.swap(i, next(i + 1));
        }

        let shuffled = LedgerService::build_ledger(&shuffled_invoices, &shuffled_payments).unwrap();
        prop_assert_eq!(baseline.totals, shuffled.totals);
        if let (Some(a), Some(b)) = (baseline.entries.last(), shuffled.entries.last()) {
            prop_assert_eq!(a.balance, b.balance);
        }
    }
}
