use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalizes user or provider supplied enum text: case-insensitive, `-` and `_` interchangeable.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}

/// Lifecycle state of a webinar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebinarStatus {
    Scheduled,
    WaitingRoom,
    Live,
    Ended,
}

impl WebinarStatus {
    pub fn parse(s: &str) -> Result<WebinarStatus> {
        match normalize(s).as_str() {
            "SCHEDULED" => Ok(WebinarStatus::Scheduled),
            "WAITING_ROOM" => Ok(WebinarStatus::WaitingRoom),
            "LIVE" => Ok(WebinarStatus::Live),
            "ENDED" => Ok(WebinarStatus::Ended),
            _ => bail!("Invalid webinar status: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WebinarStatus::Scheduled => "SCHEDULED",
            WebinarStatus::WaitingRoom => "WAITING_ROOM",
            WebinarStatus::Live => "LIVE",
            WebinarStatus::Ended => "ENDED",
        }
    }
}

/// Call-to-action shown to attendees during a webinar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CtaType {
    BookACall,
    BuyNow,
}

impl CtaType {
    pub fn parse(s: &str) -> Result<CtaType> {
        match normalize(s).as_str() {
            "BOOK_A_CALL" => Ok(CtaType::BookACall),
            "BUY_NOW" => Ok(CtaType::BuyNow),
            _ => bail!("Invalid call-to-action type: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CtaType::BookACall => "BOOK_A_CALL",
            CtaType::BuyNow => "BUY_NOW",
        }
    }
}

/// State of an attendee's voice call. Stored spellings are `PENDING`, `InProgress`, `COMPLETED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "InProgress")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl CallStatus {
    pub fn parse(s: &str) -> Result<CallStatus> {
        match normalize(s).as_str() {
            "PENDING" => Ok(CallStatus::Pending),
            "INPROGRESS" | "IN_PROGRESS" => Ok(CallStatus::InProgress),
            "COMPLETED" => Ok(CallStatus::Completed),
            _ => bail!("Invalid call status: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Pending => "PENDING",
            CallStatus::InProgress => "InProgress",
            CallStatus::Completed => "COMPLETED",
        }
    }
}

/// Where an attendee sits in the webinar's sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStage {
    Registered,
    Attended,
    AddedToCart,
    FollowUp,
    BreakoutRoom,
    Converted,
}

impl AttendanceStage {
    pub const ALL: [AttendanceStage; 6] = [
        AttendanceStage::Registered,
        AttendanceStage::Attended,
        AttendanceStage::AddedToCart,
        AttendanceStage::FollowUp,
        AttendanceStage::BreakoutRoom,
        AttendanceStage::Converted,
    ];

    pub fn parse(s: &str) -> Result<AttendanceStage> {
        match normalize(s).as_str() {
            "REGISTERED" => Ok(AttendanceStage::Registered),
            "ATTENDED" => Ok(AttendanceStage::Attended),
            "ADDED_TO_CART" => Ok(AttendanceStage::AddedToCart),
            "FOLLOW_UP" => Ok(AttendanceStage::FollowUp),
            "BREAKOUT_ROOM" => Ok(AttendanceStage::BreakoutRoom),
            "CONVERTED" => Ok(AttendanceStage::Converted),
            _ => bail!("Invalid attendance stage: {}", s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStage::Registered => "REGISTERED",
            AttendanceStage::Attended => "ATTENDED",
            AttendanceStage::AddedToCart => "ADDED_TO_CART",
            AttendanceStage::FollowUp => "FOLLOW_UP",
            AttendanceStage::BreakoutRoom => "BREAKOUT_ROOM",
            AttendanceStage::Converted => "CONVERTED",
        }
    }

    /// Column heading on the pipeline board.
    pub fn title(&self) -> &'static str {
        match self {
            AttendanceStage::Registered => "Registered",
            AttendanceStage::Attended => "Attended",
            AttendanceStage::AddedToCart => "Added to Cart",
            AttendanceStage::FollowUp => "Follow Up",
            AttendanceStage::BreakoutRoom => "Breakout Room",
            AttendanceStage::Converted => "Converted",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        })*
    };
}

display_as_str!(WebinarStatus, CtaType, CallStatus, AttendanceStage);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webinar {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: WebinarStatus,
    pub cta_type: CtaType,
    pub cta_label: String,
    pub ai_agent_id: Option<String>,
    pub tags: Vec<String>,
    pub start_time: String,
    pub created_at: String,
}

impl Webinar {
    /// The assistant id, if one is set and not blank.
    pub fn assistant_id(&self) -> Option<&str> {
        self.ai_agent_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Input for creating a webinar record.
#[derive(Debug, Clone)]
pub struct NewWebinar {
    pub title: String,
    pub description: Option<String>,
    pub status: WebinarStatus,
    pub cta_type: CtaType,
    pub cta_label: String,
    pub ai_agent_id: Option<String>,
    pub tags: Vec<String>,
    pub start_time: String,
}

impl NewWebinar {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: WebinarStatus::Scheduled,
            cta_type: CtaType::BookACall,
            cta_label: "Book a call".to_string(),
            ai_agent_id: None,
            tags: Vec::new(),
            start_time: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_status(mut self, status: WebinarStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_cta(mut self, cta_type: CtaType) -> Self {
        self.cta_type = cta_type;
        self
    }

    pub fn with_assistant(mut self, assistant_id: impl Into<String>) -> Self {
        self.ai_agent_id = Some(assistant_id.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub webinar_id: String,
    pub name: String,
    pub email: String,
    pub call_status: CallStatus,
    pub stage: AttendanceStage,
    pub created_at: String,
}
