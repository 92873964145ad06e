//! Ledger reconciliation service.
//!
//! Merges the invoices and payments of a scope (one project, or every project
//! of a tenant) into a single chronological ledger with running balances and
//! summary totals. All arithmetic is `Decimal`; dates parse strictly.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::entry::{EntryKind, Ledger, LedgerEntry, LedgerTotals};
use super::error::LedgerError;
use super::types::{FirmSummary, Invoice, Payment, Project, ProjectSummary};

/// Date format used by the storage rows.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Invoice numbering starts here when a tenant has no invoices yet.
const FIRST_INVOICE_NUMBER: i64 = 1001;

/// A normalized row awaiting sort and balance assignment.
struct Draft {
    date: NaiveDate,
    kind: EntryKind,
    label: String,
    amount: Decimal,
}

/// Ledger service for reconciliation and aggregate calculations.
pub struct LedgerService;

impl LedgerService {
    /// Builds the reconciled AR ledger for a set of invoices and payments.
    ///
    /// Entries are sorted by date ascending. Same-date ties order charges
    /// before credits, then by original insertion order; the running balance
    /// depends on entry order, so the tie-break is part of the contract.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::MalformedDate`] if any row's date fails to
    /// parse, and [`LedgerError::InconsistentAggregate`] if the defensive
    /// totals check fails.
    pub fn build_ledger(invoices: &[Invoice], payments: &[Payment]) -> Result<Ledger, LedgerError> {
        let mut drafts = Vec::with_capacity(invoices.len() + payments.len());
        for invoice in invoices {
            drafts.push(Self::normalize_invoice(invoice)?);
        }
        for payment in payments {
            drafts.push(Self::normalize_payment(payment)?);
        }

        Self::assemble(drafts)
    }

    /// Builds the ledger while skipping rows whose dates fail to parse.
    ///
    /// The explicit skip-and-report alternative to the strict
    /// [`build_ledger`](Self::build_ledger): each skipped row is returned as
    /// an error so the caller can log or surface it. Rows are never dropped
    /// silently.
    #[must_use]
    pub fn build_ledger_skipping(
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> (Ledger, Vec<LedgerError>) {
        let mut drafts = Vec::with_capacity(invoices.len() + payments.len());
        let mut skipped = Vec::new();

        for invoice in invoices {
            match Self::normalize_invoice(invoice) {
                Ok(draft) => drafts.push(draft),
                Err(err) => skipped.push(err),
            }
        }
        for payment in payments {
            match Self::normalize_payment(payment) {
                Ok(draft) => drafts.push(draft),
                Err(err) => skipped.push(err),
            }
        }

        match Self::assemble(drafts) {
            Ok(ledger) => (ledger, skipped),
            Err(err) => {
                skipped.push(err);
                (Ledger::default(), skipped)
            }
        }
    }

    /// Returns `quoted_price - Σ invoice.amount`.
    ///
    /// May be negative (over-invoiced); that is a valid, displayable state,
    /// not an error.
    #[must_use]
    pub fn remaining_to_invoice(quoted_price: Decimal, invoices: &[Invoice]) -> Decimal {
        let invoiced: Decimal = invoices.iter().map(|i| i.amount).sum();
        quoted_price - invoiced
    }

    /// Returns the next invoice sequence number for a tenant.
    ///
    /// Numbers are unique and strictly increasing per tenant; the sequence
    /// starts at 1001 for a tenant with no invoices.
    #[must_use]
    pub fn next_invoice_number(invoices: &[Invoice]) -> i64 {
        invoices
            .iter()
            .map(|i| i.number)
            .max()
            .map_or(FIRST_INVOICE_NUMBER, |max| max + 1)
    }

    /// Builds the per-project financial summary shown on the dashboard
    /// deep-dive.
    ///
    /// # Errors
    ///
    /// Propagates ledger errors from [`build_ledger`](Self::build_ledger).
    pub fn project_summary(
        project: &Project,
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> Result<ProjectSummary, LedgerError> {
        let ledger = Self::build_ledger(invoices, payments)?;
        Ok(ProjectSummary {
            contract_value: project.quoted_price,
            total_billed: ledger.totals.charged,
            total_collected: ledger.totals.collected,
            balance: ledger.totals.balance,
            remaining_to_invoice: Self::remaining_to_invoice(project.quoted_price, invoices),
        })
    }

    /// Builds the firm-wide summary across every project of a tenant.
    ///
    /// Shares the same merge/sum code path as the per-project ledger; the
    /// caller passes the tenant's full set of projects, invoices, and
    /// payments from one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Propagates ledger errors from [`build_ledger`](Self::build_ledger).
    pub fn firm_summary(
        projects: &[Project],
        invoices: &[Invoice],
        payments: &[Payment],
    ) -> Result<FirmSummary, LedgerError> {
        let ledger = Self::build_ledger(invoices, payments)?;
        let total_contracts: Decimal = projects.iter().map(|p| p.quoted_price).sum();
        Ok(FirmSummary {
            total_contracts,
            total_invoiced: ledger.totals.charged,
            total_collected: ledger.totals.collected,
            remaining_to_invoice: total_contracts - ledger.totals.charged,
            outstanding_ar: ledger.totals.balance,
        })
    }

    fn normalize_invoice(invoice: &Invoice) -> Result<Draft, LedgerError> {
        Ok(Draft {
            date: Self::parse_date(&invoice.date)?,
            kind: EntryKind::Charge,
            label: format!("Invoice #{} - {}", invoice.number, invoice.description),
            amount: invoice.amount,
        })
    }

    fn normalize_payment(payment: &Payment) -> Result<Draft, LedgerError> {
        Ok(Draft {
            date: Self::parse_date(&payment.date)?,
            kind: EntryKind::Credit,
            label: format!("Payment - {}", payment.note),
            amount: payment.amount,
        })
    }

    fn parse_date(value: &str) -> Result<NaiveDate, LedgerError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LedgerError::MalformedDate {
            value: value.to_string(),
        })
    }

    /// Sorts normalized rows and attaches running balances and totals.
    fn assemble(mut drafts: Vec<Draft>) -> Result<Ledger, LedgerError> {
        // Stable sort: same-date charges keep invoice order, credits keep
        // payment order, and charges sort before credits (EntryKind ordering).
        drafts.sort_by_key(|d| (d.date, d.kind));

        let mut entries = Vec::with_capacity(drafts.len());
        let mut running = Decimal::ZERO;
        let mut charged = Decimal::ZERO;
        let mut collected = Decimal::ZERO;

        for draft in drafts {
            let (debit, credit) = match draft.kind {
                EntryKind::Charge => (draft.amount, Decimal::ZERO),
                EntryKind::Credit => (Decimal::ZERO, draft.amount),
            };
            charged += debit;
            collected += credit;
            running += debit - credit;
            entries.push(LedgerEntry {
                date: draft.date,
                label: draft.label,
                kind: draft.kind,
                debit,
                credit,
                balance: running,
            });
        }

        let expected = charged - collected;
        if running != expected {
            return Err(LedgerError::InconsistentAggregate { running, expected });
        }

        Ok(Ledger {
            entries,
            totals: LedgerTotals {
                charged,
                collected,
                balance: expected,
            },
        })
    }
}
