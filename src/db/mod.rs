pub mod attendees;
mod init;
pub mod schemas;
mod store;
pub mod webinars;

#[cfg(test)]
mod tests;

pub use attendees::AttendeeRepository;
pub use init::{init_db, init_memory_db, migrate};
pub use schemas::{
    AttendanceStage, Attendee, CallStatus, CtaType, NewWebinar, Webinar, WebinarStatus,
};
pub use store::SqliteStore;
pub use webinars::WebinarRepository;
