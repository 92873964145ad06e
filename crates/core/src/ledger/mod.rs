//! AR ledger reconciliation.
//!
//! This module implements the ledger engine:
//! - Typed billing records (projects, invoices, payments)
//! - Normalization of invoices/payments into charge/credit entries
//! - Chronological merge with a documented same-date tie-break
//! - Running balances and summary totals
//! - Error types for malformed rows and aggregate inconsistencies

pub mod entry;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use entry::{EntryKind, Ledger, LedgerEntry, LedgerTotals};
pub use error::LedgerError;
pub use service::LedgerService;
pub use types::{FirmSummary, Invoice, Payment, Project, ProjectStatus, ProjectSummary};
