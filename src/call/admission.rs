//! Admission check for the live call page.
//!
//! Decides whether an attendee may be connected to the webinar's voice
//! assistant. Rejections carry a reason code the page turns into a redirect.
//! Guards run in a fixed order and the first rejection wins.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};
use url::{Position, Url};

use super::store::CallStore;
use super::transition::reset_completed_call;
use crate::db::{Attendee, CallStatus, CtaType, Webinar, WebinarStatus};

/// Why an attendee was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingParameters,
    AttendeeNotFound,
    WebinarNotFound,
    WebinarNotStarted,
    CannotBookACall,
    CallAlreadyActive,
}

impl RejectReason {
    /// Machine-readable code appended as `?error=<code>`.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingParameters => "missing-parameters",
            RejectReason::AttendeeNotFound => "attendee-not-found",
            RejectReason::WebinarNotFound => "webinar-not-found",
            RejectReason::WebinarNotStarted => "webinar-not-started",
            RejectReason::CannotBookACall => "cannot-book-a-call",
            RejectReason::CallAlreadyActive => "call-already-active",
        }
    }

    /// Where the call page sends a rejected attendee. The webinar id is
    /// percent-encoded as a single path segment.
    pub fn redirect_target(&self, webinar_id: &str) -> String {
        match self {
            RejectReason::MissingParameters | RejectReason::WebinarNotFound => {
                NOT_FOUND_PAGE.to_string()
            }
            _ => webinar_page(webinar_id, self.code()).unwrap_or_else(|| NOT_FOUND_PAGE.to_string()),
        }
    }
}

const NOT_FOUND_PAGE: &str = "/404";

/// Only used to borrow `Url`'s segment encoding; the host is stripped again.
const PAGE_BASE: &str = "http://hireflow.invalid/live-webinar";

fn webinar_page(webinar_id: &str, code: &str) -> Option<String> {
    let mut url = Url::parse(PAGE_BASE).ok()?;
    url.path_segments_mut().ok()?.push(webinar_id);
    url.query_pairs_mut().append_pair("error", code);
    Some(url[Position::BeforePath..].to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Pass,
    Reject(RejectReason),
}

/// A named admission rule.
pub struct Guard {
    pub name: &'static str,
    check: fn(&Webinar, &Attendee) -> GuardOutcome,
}

impl Guard {
    pub fn check(&self, webinar: &Webinar, attendee: &Attendee) -> GuardOutcome {
        (self.check)(webinar, attendee)
    }
}

/// Admission rules in priority order.
pub const GUARDS: [Guard; 3] = [
    Guard {
        name: "webinar-started",
        check: webinar_started,
    },
    Guard {
        name: "call-bookable",
        check: call_bookable,
    },
    Guard {
        name: "no-active-call",
        check: no_active_call,
    },
];

fn webinar_started(webinar: &Webinar, _attendee: &Attendee) -> GuardOutcome {
    match webinar.status {
        WebinarStatus::WaitingRoom | WebinarStatus::Scheduled => {
            GuardOutcome::Reject(RejectReason::WebinarNotStarted)
        }
        WebinarStatus::Live | WebinarStatus::Ended => GuardOutcome::Pass,
    }
}

fn call_bookable(webinar: &Webinar, _attendee: &Attendee) -> GuardOutcome {
    if webinar.cta_type != CtaType::BookACall || webinar.assistant_id().is_none() {
        return GuardOutcome::Reject(RejectReason::CannotBookACall);
    }
    GuardOutcome::Pass
}

fn no_active_call(_webinar: &Webinar, attendee: &Attendee) -> GuardOutcome {
    if attendee.call_status == CallStatus::InProgress {
        return GuardOutcome::Reject(RejectReason::CallAlreadyActive);
    }
    GuardOutcome::Pass
}

/// Run every guard in order, stopping at the first rejection.
///
/// On admission returns the assistant id the call will use.
pub fn evaluate<'w>(webinar: &'w Webinar, attendee: &Attendee) -> Result<&'w str, RejectReason> {
    for guard in &GUARDS {
        if let GuardOutcome::Reject(reason) = guard.check(webinar, attendee) {
            debug!("Guard {} rejected attendee {}", guard.name, attendee.id);
            return Err(reason);
        }
    }
    // Guaranteed present by `call-bookable`.
    webinar.assistant_id().ok_or(RejectReason::CannotBookACall)
}

/// Everything the call page needs to start the voice session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSession {
    pub user_name: String,
    pub user_id: String,
    pub assistant_id: String,
    pub webinar: Webinar,
    /// True when a completed call was reset to PENDING on the way in.
    #[serde(skip)]
    pub reset_previous_call: bool,
}

#[derive(Debug, Clone)]
pub enum AdmissionOutcome {
    Admitted(CallSession),
    Rejected(RejectReason),
}

/// Load the records for a call page request and decide admission.
///
/// Store failures are returned as errors; every other outcome is a decision.
pub async fn admit(
    store: &dyn CallStore,
    webinar_id: &str,
    attendee_id: &str,
) -> Result<AdmissionOutcome> {
    if webinar_id.trim().is_empty() || attendee_id.trim().is_empty() {
        return Ok(AdmissionOutcome::Rejected(RejectReason::MissingParameters));
    }

    let Some(attendee) = store.get_attendee_by_id(attendee_id, webinar_id).await? else {
        info!("Attendee {} not found in webinar {}", attendee_id, webinar_id);
        return Ok(AdmissionOutcome::Rejected(RejectReason::AttendeeNotFound));
    };

    let Some(webinar) = store.get_webinar_by_id(webinar_id).await? else {
        info!("Webinar {} not found", webinar_id);
        return Ok(AdmissionOutcome::Rejected(RejectReason::WebinarNotFound));
    };

    let assistant_id = match evaluate(&webinar, &attendee) {
        Ok(assistant_id) => assistant_id.to_string(),
        Err(reason) => {
            info!(
                "Attendee {} rejected from webinar {} call: {}",
                attendee_id,
                webinar_id,
                reason.code()
            );
            return Ok(AdmissionOutcome::Rejected(reason));
        }
    };

    let reset_previous_call = reset_completed_call(store, &attendee).await?;

    info!(
        "Attendee {} admitted to call with assistant {}",
        attendee_id, assistant_id
    );

    Ok(AdmissionOutcome::Admitted(CallSession {
        user_name: attendee.name,
        user_id: attendee.id,
        assistant_id,
        webinar,
        reset_previous_call,
    }))
}
