//! Trestle development report.
//!
//! Builds a sample firm's AR ledger and access decision over in-memory data
//! and logs the result. Useful for eyeballing engine output during
//! development without a web or storage layer.
//!
//! Usage: cargo run --bin report

use chrono::Utc;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trestle_core::ledger::{Invoice, LedgerService, Payment, Project, ProjectStatus};
use trestle_core::subscription::{
    SubscriptionPolicy, SubscriptionService, SubscriptionStatus, Tenant,
};
use trestle_shared::AppConfig;
use trestle_shared::types::{InvoiceId, Money, PaymentId, ProjectId, TenantId};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trestle=info,report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let policy = SubscriptionPolicy::from(&config);
    info!(
        base_price = %Money::new(policy.base_price),
        trial_days = policy.trial_days,
        "Loaded billing policy"
    );

    let tenant = sample_tenant();
    let project = sample_project(tenant.id);
    let invoices = sample_invoices(project.id);
    let payments = sample_payments(project.id);

    let ledger = LedgerService::build_ledger(&invoices, &payments)?;
    info!(entries = ledger.len(), "Project ledger for {}", project.name);
    for entry in &ledger.entries {
        info!(
            date = %entry.date,
            debit = %Money::new(entry.debit),
            credit = %Money::new(entry.credit),
            balance = %Money::new(entry.balance),
            "{}",
            entry.label
        );
    }

    let summary = LedgerService::firm_summary(&[project], &invoices, &payments)?;
    info!(
        contracts = %Money::new(summary.total_contracts),
        invoiced = %Money::new(summary.total_invoiced),
        collected = %Money::new(summary.total_collected),
        outstanding_ar = %Money::new(summary.outstanding_ar),
        "Firm summary"
    );

    let today = Utc::now().date_naive();
    let decision = SubscriptionService::access_decision(&tenant, &[], today, &policy);
    info!(?decision, "Access decision for {}", tenant.username);

    let mut rng = rand::thread_rng();
    let code = SubscriptionService::generate_referral_code(&mut rng);
    info!(code = %code, "Sample referral code");

    Ok(())
}

fn sample_tenant() -> Tenant {
    Tenant {
        id: TenantId::new(),
        username: "demo-builder".to_string(),
        signup_date: Some(Utc::now().date_naive().format("%Y-%m-%d").to_string()),
        status: SubscriptionStatus::Trial,
        referral_code: "DEMO0001".to_string(),
        referred_by: None,
    }
}

fn sample_project(tenant_id: TenantId) -> Project {
    Project {
        id: ProjectId::new(),
        tenant_id,
        name: "Riverside Remodel".to_string(),
        client_name: "Acme Homes".to_string(),
        quoted_price: dec!(42000),
        status: ProjectStatus::CourseOfConstruction,
    }
}

fn sample_invoices(project_id: ProjectId) -> Vec<Invoice> {
    vec![
        Invoice {
            id: InvoiceId::new(),
            project_id,
            number: 1001,
            amount: dec!(12000),
            tax: dec!(600),
            date: "2024-01-05".to_string(),
            description: "Mobilization and demo".to_string(),
        },
        Invoice {
            id: InvoiceId::new(),
            project_id,
            number: 1002,
            amount: dec!(9500),
            tax: dec!(475),
            date: "2024-02-10".to_string(),
            description: "Rough-in complete".to_string(),
        },
    ]
}

fn sample_payments(project_id: ProjectId) -> Vec<Payment> {
    vec![
        Payment {
            id: PaymentId::new(),
            project_id,
            amount: dec!(12000),
            date: "2024-01-28".to_string(),
            note: "Check 552".to_string(),
        },
        Payment {
            id: PaymentId::new(),
            project_id,
            amount: dec!(4000),
            date: "2024-02-20".to_string(),
            note: "ACH partial".to_string(),
        },
    ]
}
