//! Live call flow: admission, status transitions and provider lifecycle events.

pub mod admission;
pub mod lifecycle;
pub mod store;
pub mod transition;

pub use admission::{admit, evaluate, AdmissionOutcome, CallSession, Guard, GuardOutcome, RejectReason, GUARDS};
pub use lifecycle::{apply_event, CallEvent, WebhookPayload};
pub use store::CallStore;
pub use transition::{change_call_status, reset_completed_call};
