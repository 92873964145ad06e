//! Billing domain records: projects, invoices, payments.
//!
//! These are typed views of the storage rows the read interface yields.
//! Dates are carried in their stored text form (`YYYY-MM-DD`) and parsed by
//! the ledger engine, which rejects malformed values instead of silently
//! coercing them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trestle_shared::types::{InvoiceId, PaymentId, ProjectId, TenantId};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Bid submitted, not yet won.
    Bidding,
    /// Contract won, work not started.
    PreConstruction,
    /// Work in progress.
    CourseOfConstruction,
    /// Work complete, warranty period running.
    Warranty,
    /// Closed out.
    PostConstruction,
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Bidding => "Bidding",
            Self::PreConstruction => "Pre-Construction",
            Self::CourseOfConstruction => "Course of Construction",
            Self::Warranty => "Warranty",
            Self::PostConstruction => "Post-Construction",
        };
        write!(f, "{label}")
    }
}

/// A project belonging to one tenant.
///
/// Projects exclusively own their invoices and payments; deleting a project
/// cascades to both (enforced by the persistence collaborator).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project ID.
    pub id: ProjectId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// Client name.
    pub client_name: String,
    /// Quoted contract value. Zero when no quote was recorded.
    pub quoted_price: Decimal,
    /// Lifecycle status.
    pub status: ProjectStatus,
}

/// An invoice issued against a project. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Sequence number, unique and strictly increasing per tenant.
    pub number: i64,
    /// Total amount, inclusive of tax.
    pub amount: Decimal,
    /// Tax portion of `amount`.
    pub tax: Decimal,
    /// Issue date as stored (`YYYY-MM-DD` text).
    pub date: String,
    /// Free-text description of the work billed.
    pub description: String,
}

impl Invoice {
    /// Returns the pre-tax portion of the invoice.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.amount - self.tax
    }
}

/// A payment received against a project. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Payment ID.
    pub id: PaymentId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Amount received.
    pub amount: Decimal,
    /// Date received as stored (`YYYY-MM-DD` text).
    pub date: String,
    /// Free-text note or check/reference number.
    pub note: String,
}

/// Per-project financial summary for the dashboard deep-dive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Quoted contract value.
    pub contract_value: Decimal,
    /// Total billed across all invoices.
    pub total_billed: Decimal,
    /// Total collected across all payments.
    pub total_collected: Decimal,
    /// Outstanding AR (billed minus collected).
    pub balance: Decimal,
    /// Contract value minus total billed. Negative means over-invoiced,
    /// which is a valid, displayable state.
    pub remaining_to_invoice: Decimal,
}

/// Firm-wide financial summary across every project of a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirmSummary {
    /// Sum of quoted contract values.
    pub total_contracts: Decimal,
    /// Sum of invoice amounts.
    pub total_invoiced: Decimal,
    /// Sum of payment amounts.
    pub total_collected: Decimal,
    /// Sum of contracts minus sum invoiced. May be negative.
    pub remaining_to_invoice: Decimal,
    /// Outstanding AR (invoiced minus collected).
    pub outstanding_ar: Decimal,
}
