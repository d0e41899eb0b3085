//! billdesk-core
//!
//! Business logic for BillDesk: totals, bill assembly, period filtering,
//! selection aggregation and the data-access contracts.
//! Depends on billdesk-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod bill_service;
pub mod calculator;
pub mod error;
pub mod inventory_service;
pub mod period_filter;
pub mod report_service;
pub mod selection_service;
pub mod storage;
pub mod time;


pub use bill_service::*;
pub use calculator::*;
pub use error::{CoreError, ErrorKind};
pub use inventory_service::*;
pub use period_filter::*;
pub use report_service::*;
pub use selection_service::*;
pub use storage::{BillingStore, ImageStore};
pub use time::{Clock, FixedClock};
