//! Payment handlers.

mod payment_summary;
mod record_payment;

pub use payment_summary::{GetPaymentSummaryHandler, PaymentSummaryQuery, PaymentSummaryView};
pub use record_payment::{RecordPaymentCommand, RecordPaymentHandler};
