//! Payment domain module.
//!
//! The append-only payment ledger and its reconciliation arithmetic, plus
//! the pending-request workflow members use to ask for a plan.
//!
//! # Module Structure
//!
//! - `payment` - Payment ledger entry and payment methods
//! - `receipt` - human-readable receipt numbers
//! - `ledger` - amount_paid / amount_due reconciliation
//! - `request` - PaymentRequest state machine (pending/completed/rejected)
//! - `events` - payment domain events

mod events;
mod ledger;
mod payment;
mod receipt;
mod request;

pub use events::PaymentEvent;
pub use ledger::{reconcile, totals_by_method, MethodTotal, PaymentSummary};
pub use payment::{Payment, PaymentMethod};
pub use receipt::ReceiptNumber;
pub use request::{PaymentRequest, RequestStatus};
