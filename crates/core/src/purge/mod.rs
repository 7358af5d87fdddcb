//! The clear-database engine.
//!
//! [`run_purge`] bulk-deletes shop data category by category, then prunes
//! customer accounts while keeping the staff who operate the shop. It is
//! meant for resetting demo and staging environments, so it refuses to run
//! outside debug mode unless explicitly forced, and every step prints a
//! `Removed <label>, total: <count>` line as it completes.
//!
//! The engine is storage-agnostic: anything implementing [`PurgeStore`] can
//! be purged. The CLI crate's `PgStore` is the production implementation;
//! [`MemoryStore`] here backs the test suites.

mod memory;
mod report;
mod store;

pub use memory::MemoryStore;
pub use report::{PurgeReport, PurgeStep};
pub use store::{PurgeStore, StoreError};

use std::io;

use thiserror::Error;

use crate::types::{AccountId, EntityKind};

/// Flags controlling a purge run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeOptions {
    /// Also delete staff accounts. Superusers are retained regardless.
    pub delete_staff: bool,
    /// Run even when the deployment is not in debug mode.
    pub force: bool,
    /// Whether the deployment runs in debug mode. Passed in explicitly so the
    /// caller decides where it comes from rather than reading ambient state.
    pub debug_mode: bool,
}

impl PurgeOptions {
    /// Whether these options permit a destructive run: the deployment is in
    /// debug mode, or `force` overrides the guard.
    #[must_use]
    pub const fn permitted(self) -> bool {
        self.debug_mode || self.force
    }
}

/// Errors produced by [`run_purge`].
#[derive(Debug, Error)]
pub enum PurgeError {
    /// The guard refused a destructive run outside debug mode.
    #[error("Cannot clear the database in DEBUG=False mode.")]
    Refused,

    /// The persistence layer failed. Earlier steps are not rolled back, so
    /// the store may be partially purged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing a report line failed.
    #[error("failed to write report line: {0}")]
    Report(#[from] io::Error),
}

/// Delete all rows of every category in `categories`, in the given order,
/// then prune accounts.
///
/// The account phase deletes every non-staff account, optionally deletes
/// non-superuser staff when [`PurgeOptions::delete_staff`] is set, and
/// finally scrubs the saved addresses of whoever is retained. Each step
/// writes one `Removed <label>, total: <count>` line to `sink` immediately
/// after it completes and is recorded in the returned [`PurgeReport`].
///
/// Callers purging a real shop should pass [`EntityKind::PURGE_ORDER`],
/// which sequences categories so child rows go before the rows they
/// reference. A second run over an already-empty store succeeds and reports
/// zero for every step.
///
/// # Errors
///
/// Returns [`PurgeError::Refused`] without touching the store when
/// `debug_mode` and `force` are both unset. Store and sink failures abort
/// the run at the step that failed.
pub async fn run_purge<S, W>(
    store: &S,
    options: &PurgeOptions,
    categories: &[EntityKind],
    sink: &mut W,
) -> Result<PurgeReport, PurgeError>
where
    S: PurgeStore + ?Sized,
    W: io::Write,
{
    if !options.permitted() {
        return Err(PurgeError::Refused);
    }

    let mut report = PurgeReport::default();

    for &kind in categories {
        let removed = store.count_all(kind).await?;
        store.delete_all(kind).await?;
        emit(&mut report, sink, kind.display_name(), removed)?;
    }

    let mut staff = store.staff_accounts().await?;
    let keep: Vec<AccountId> = staff.iter().map(|account| account.id).collect();
    let customers = store.delete_accounts_except(&keep).await?;
    emit(&mut report, sink, "customers", customers)?;

    if options.delete_staff {
        let doomed: Vec<AccountId> = staff
            .iter()
            .filter(|account| !account.is_superuser)
            .map(|account| account.id)
            .collect();
        let removed = store.delete_accounts(&doomed).await?;
        staff.retain(|account| account.is_superuser);
        emit(&mut report, sink, "staff users", removed)?;
    }

    // Retained accounts stay, but their saved checkout addresses go.
    let mut addresses = 0;
    for account in &staff {
        addresses += store.delete_addresses_of(account.id).await?;
    }
    emit(&mut report, sink, "staff addresses", addresses)?;

    Ok(report)
}

fn emit<W>(
    report: &mut PurgeReport,
    sink: &mut W,
    label: &str,
    removed: u64,
) -> Result<(), PurgeError>
where
    W: io::Write,
{
    writeln!(sink, "Removed {label}, total: {removed}")?;
    report.record(label, removed);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
