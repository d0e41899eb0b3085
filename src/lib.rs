#![doc(test(attr(deny(warnings))))]

//! BillDesk: inventory-backed billing with period sales reports.
//!
//! The library exposes [`desk::BillingDesk`], the facade the admin shell is
//! built on top of the workspace crates.

pub mod cli;
pub mod desk;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("BillDesk tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_is_idempotent() {
        super::init();
        super::init();
    }
}
