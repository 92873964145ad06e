//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A charge against the client (invoice issued). Increases AR.
    Charge,
    /// A credit from the client (payment received). Decreases AR.
    Credit,
}

/// One line of the reconciled AR ledger.
///
/// Exactly one of `debit`/`credit` is non-zero: charges carry the invoice
/// amount as debit, credits carry the payment amount as credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entry date.
    pub date: NaiveDate,
    /// Display label, e.g. `Invoice #1001 - Framing` or `Payment - Check 552`.
    pub label: String,
    /// Whether this line is a charge or a credit.
    pub kind: EntryKind,
    /// Amount charged (zero for credits).
    pub debit: Decimal,
    /// Amount collected (zero for charges).
    pub credit: Decimal,
    /// Cumulative `debit - credit` up to and including this entry.
    pub balance: Decimal,
}

impl LedgerEntry {
    /// Returns the signed effect of this entry on the running balance.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Summary totals over a ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Total charged (sum of debits).
    pub charged: Decimal,
    /// Total collected (sum of credits).
    pub collected: Decimal,
    /// Outstanding balance (`charged - collected`). Always equals the final
    /// running balance.
    pub balance: Decimal,
}

/// A reconciled, time-ordered AR ledger with running balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Entries in chronological order (charges before credits on ties).
    pub entries: Vec<LedgerEntry>,
    /// Summary totals.
    pub totals: LedgerTotals,
}

impl Ledger {
    /// Returns true if the ledger has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
