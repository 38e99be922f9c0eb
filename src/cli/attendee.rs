use super::open_db;
use crate::call::{self, AdmissionOutcome, CallStore};
use crate::cli::{AttendeeCliArgs, AttendeeCommand};
use crate::db::{AttendanceStage, AttendeeRepository, CallStatus, SqliteStore, WebinarRepository};
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub async fn handle_attendee_command(args: AttendeeCliArgs) -> Result<()> {
    let conn = open_db()?;

    match args.command {
        AttendeeCommand::Register {
            webinar,
            name,
            email,
        } => {
            if WebinarRepository::get(&conn, &webinar)?.is_none() {
                return Err(anyhow!("Webinar {} not found", webinar));
            }
            let id = AttendeeRepository::insert(&conn, &webinar, name.trim(), email.trim())?;
            println!("Registered attendee {}", id);
            println!("Call page: /live-webinar/{}/call?attendeeId={}", webinar, id);
        }
        AttendeeCommand::List { webinar } => {
            let attendees = AttendeeRepository::list_by_webinar(&conn, &webinar)?;
            if attendees.is_empty() {
                println!("No attendees registered for webinar {}.", webinar);
                return Ok(());
            }
            for attendee in attendees {
                println!(
                    "{}  {:<10}  {:<14}  {} <{}>",
                    attendee.id, attendee.call_status, attendee.stage, attendee.name, attendee.email
                );
            }
        }
        AttendeeCommand::Stage { id, stage, webinar } => {
            let stage = AttendanceStage::parse(&stage)?;
            require_attendee(&conn, &id, &webinar)?;
            AttendeeRepository::update_stage(&conn, &id, stage)?;
            println!("Attendee {} moved to {}", id, stage.title());
        }
        AttendeeCommand::CallStatus {
            id,
            status,
            webinar,
        } => {
            let status = CallStatus::parse(&status)?;
            require_attendee(&conn, &id, &webinar)?;
            let store = SqliteStore::from_connection(conn);
            call::change_call_status(&store, &id, status).await?;
            println!("Attendee {} call status is now {}", id, status);
        }
        AttendeeCommand::Admit { webinar, attendee } => {
            let store = SqliteStore::from_connection(conn);
            match call::admit(&store, &webinar, &attendee).await? {
                AdmissionOutcome::Admitted(session) => {
                    if session.reset_previous_call {
                        println!("Previous completed call was reset to PENDING.");
                    }
                    println!("{}", serde_json::to_string_pretty(&session)?);
                }
                AdmissionOutcome::Rejected(reason) => {
                    println!("Rejected: {}", reason.code());
                    println!("Redirect: {}", reason.redirect_target(&webinar));
                    if let Some(current) = store.get_attendee_by_id(&attendee, &webinar).await? {
                        println!("Current call status: {}", current.call_status);
                    }
                }
            }
        }
    }

    Ok(())
}

fn require_attendee(conn: &Connection, id: &str, webinar_id: &str) -> Result<()> {
    AttendeeRepository::get(conn, id, webinar_id)?
        .map(|_| ())
        .ok_or_else(|| anyhow!("Attendee {} not found in webinar {}", id, webinar_id))
}
