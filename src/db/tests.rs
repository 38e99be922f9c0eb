use super::attendees::AttendeeRepository;
use super::init::{init_memory_db, migrate};
use super::schemas::{AttendanceStage, CallStatus, CtaType, NewWebinar, WebinarStatus};
use super::webinars::WebinarRepository;
use anyhow::Result;
use rusqlite::Connection;

fn setup_test_db() -> Result<Connection> {
    init_memory_db()
}

fn create_test_webinar(conn: &Connection, title: &str) -> String {
    let webinar = NewWebinar::new(title)
        .with_status(WebinarStatus::Live)
        .with_assistant("agent-1")
        .with_tags(vec!["hot-lead".to_string()]);
    WebinarRepository::insert(conn, &webinar).unwrap()
}

#[test]
fn test_migrate_creates_tables() {
    let conn = Connection::open_in_memory().unwrap();
    migrate(&conn).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('webinars', 'attendees')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn test_migrate_is_repeatable() {
    let conn = setup_test_db().unwrap();
    migrate(&conn).unwrap();
}

#[test]
fn test_insert_and_get_webinar() {
    let conn = setup_test_db().unwrap();
    let id = create_test_webinar(&conn, "Hiring Day");

    let webinar = WebinarRepository::get(&conn, &id).unwrap().unwrap();
    assert_eq!(webinar.id, id);
    assert_eq!(webinar.title, "Hiring Day");
    assert_eq!(webinar.status, WebinarStatus::Live);
    assert_eq!(webinar.cta_type, CtaType::BookACall);
    assert_eq!(webinar.ai_agent_id.as_deref(), Some("agent-1"));
    assert_eq!(webinar.tags, vec!["hot-lead".to_string()]);
    assert!(!webinar.created_at.is_empty());
}

#[test]
fn test_get_missing_webinar() {
    let conn = setup_test_db().unwrap();
    assert!(WebinarRepository::get(&conn, "missing").unwrap().is_none());
}

#[test]
fn test_update_webinar_status_and_assistant() {
    let conn = setup_test_db().unwrap();
    let id = create_test_webinar(&conn, "Hiring Day");

    assert!(WebinarRepository::update_status(&conn, &id, WebinarStatus::Ended).unwrap());
    assert!(WebinarRepository::set_assistant(&conn, &id, None).unwrap());
    assert!(WebinarRepository::set_cta(&conn, &id, CtaType::BuyNow, "Buy now").unwrap());

    let webinar = WebinarRepository::get(&conn, &id).unwrap().unwrap();
    assert_eq!(webinar.status, WebinarStatus::Ended);
    assert_eq!(webinar.ai_agent_id, None);
    assert_eq!(webinar.cta_type, CtaType::BuyNow);
    assert_eq!(webinar.cta_label, "Buy now");

    assert!(!WebinarRepository::update_status(&conn, "missing", WebinarStatus::Live).unwrap());
}

#[test]
fn test_list_webinars_limit() {
    let conn = setup_test_db().unwrap();
    for i in 1..=5 {
        create_test_webinar(&conn, &format!("Webinar {}", i));
    }

    let webinars = WebinarRepository::list(&conn, 3).unwrap();
    assert_eq!(webinars.len(), 3);
}

#[test]
fn test_insert_attendee_defaults() {
    let conn = setup_test_db().unwrap();
    let webinar_id = create_test_webinar(&conn, "Hiring Day");

    let id = AttendeeRepository::insert(&conn, &webinar_id, "Ada", "ada@example.com").unwrap();
    let attendee = AttendeeRepository::get(&conn, &id, &webinar_id)
        .unwrap()
        .unwrap();

    assert_eq!(attendee.name, "Ada");
    assert_eq!(attendee.email, "ada@example.com");
    assert_eq!(attendee.call_status, CallStatus::Pending);
    assert_eq!(attendee.stage, AttendanceStage::Registered);
}

#[test]
fn test_attendee_lookup_is_scoped_to_webinar() {
    let conn = setup_test_db().unwrap();
    let first = create_test_webinar(&conn, "First");
    let second = create_test_webinar(&conn, "Second");

    let id = AttendeeRepository::insert(&conn, &first, "Ada", "ada@example.com").unwrap();

    assert!(AttendeeRepository::get(&conn, &id, &first).unwrap().is_some());
    assert!(AttendeeRepository::get(&conn, &id, &second).unwrap().is_none());
}

#[test]
fn test_update_call_status_is_idempotent() {
    let conn = setup_test_db().unwrap();
    let webinar_id = create_test_webinar(&conn, "Hiring Day");
    let id = AttendeeRepository::insert(&conn, &webinar_id, "Ada", "ada@example.com").unwrap();

    assert!(AttendeeRepository::update_call_status(&conn, &id, CallStatus::Completed).unwrap());
    assert!(AttendeeRepository::update_call_status(&conn, &id, CallStatus::Completed).unwrap());

    let attendee = AttendeeRepository::get(&conn, &id, &webinar_id)
        .unwrap()
        .unwrap();
    assert_eq!(attendee.call_status, CallStatus::Completed);

    assert!(!AttendeeRepository::update_call_status(&conn, "missing", CallStatus::Pending).unwrap());
}

#[test]
fn test_list_attendees_by_webinar() {
    let conn = setup_test_db().unwrap();
    let first = create_test_webinar(&conn, "First");
    let second = create_test_webinar(&conn, "Second");

    AttendeeRepository::insert(&conn, &first, "Ada", "ada@example.com").unwrap();
    AttendeeRepository::insert(&conn, &first, "Grace", "grace@example.com").unwrap();
    AttendeeRepository::insert(&conn, &second, "Linus", "linus@example.com").unwrap();

    let attendees = AttendeeRepository::list_by_webinar(&conn, &first).unwrap();
    assert_eq!(attendees.len(), 2);
    assert!(attendees.iter().all(|a| a.webinar_id == first));
}

#[test]
fn test_update_stage() {
    let conn = setup_test_db().unwrap();
    let webinar_id = create_test_webinar(&conn, "Hiring Day");
    let id = AttendeeRepository::insert(&conn, &webinar_id, "Ada", "ada@example.com").unwrap();

    assert!(AttendeeRepository::update_stage(&conn, &id, AttendanceStage::FollowUp).unwrap());

    let attendee = AttendeeRepository::get(&conn, &id, &webinar_id)
        .unwrap()
        .unwrap();
    assert_eq!(attendee.stage, AttendanceStage::FollowUp);
}

#[test]
fn test_unknown_enum_text_is_an_error() {
    let conn = setup_test_db().unwrap();
    let id = create_test_webinar(&conn, "Hiring Day");
    conn.execute(
        "UPDATE webinars SET status = 'POSTPONED' WHERE id = ?1",
        [&id],
    )
    .unwrap();

    assert!(WebinarRepository::get(&conn, &id).is_err());
}

#[test]
fn test_attendee_requires_existing_webinar() {
    let conn = setup_test_db().unwrap();

    let result = AttendeeRepository::insert(&conn, "no-such-webinar", "Ada", "ada@example.com");

    assert!(result.is_err());
}

#[test]
fn test_deleting_webinar_removes_its_attendees() {
    let conn = setup_test_db().unwrap();
    let webinar_id = create_test_webinar(&conn, "Cascade");
    AttendeeRepository::insert(&conn, &webinar_id, "Ada", "ada@example.com").unwrap();

    conn.execute("DELETE FROM webinars WHERE id = ?1", [&webinar_id])
        .unwrap();

    assert!(AttendeeRepository::list_by_webinar(&conn, &webinar_id)
        .unwrap()
        .is_empty());
}
