use super::open_db;
use crate::cli::{WebinarCliArgs, WebinarCommand};
use crate::db::{
    AttendeeRepository, CtaType, NewWebinar, Webinar, WebinarRepository, WebinarStatus,
};
use crate::pipeline;
use anyhow::{anyhow, Result};
use rusqlite::Connection;

pub fn handle_webinar_command(args: WebinarCliArgs) -> Result<()> {
    let conn = open_db()?;

    match args.command {
        WebinarCommand::Create {
            title,
            description,
            status,
            cta,
            cta_label,
            assistant,
            tags,
            start_time,
        } => {
            let cta_type = CtaType::parse(&cta)?;
            let mut webinar = NewWebinar::new(title)
                .with_status(WebinarStatus::parse(&status)?)
                .with_cta(cta_type)
                .with_tags(
                    tags.into_iter()
                        .map(|tag| tag.trim().to_string())
                        .filter(|tag| !tag.is_empty())
                        .collect(),
                );
            webinar.description = description;
            webinar.cta_label = cta_label.unwrap_or_else(|| default_cta_label(cta_type).to_string());
            if let Some(assistant) = assistant {
                webinar = webinar.with_assistant(assistant);
            }
            if let Some(start_time) = start_time {
                chrono::DateTime::parse_from_rfc3339(&start_time)
                    .map_err(|e| anyhow!("Invalid start time '{}': {}", start_time, e))?;
                webinar.start_time = start_time;
            }

            let id = WebinarRepository::insert(&conn, &webinar)?;
            println!("Created webinar {}", id);
        }
        WebinarCommand::List { limit } => {
            let webinars = WebinarRepository::list(&conn, limit)?;
            if webinars.is_empty() {
                println!("No webinars found.");
                return Ok(());
            }
            for webinar in webinars {
                println!(
                    "{}  {:<12}  {}",
                    webinar.id, webinar.status, webinar.title
                );
            }
        }
        WebinarCommand::Show { id } => {
            let webinar = require_webinar(&conn, &id)?;
            print_webinar(&webinar);
        }
        WebinarCommand::Status { id, status } => {
            let status = WebinarStatus::parse(&status)?;
            require_webinar(&conn, &id)?;
            WebinarRepository::update_status(&conn, &id, status)?;
            println!("Webinar {} is now {}", id, status);
        }
        WebinarCommand::Assign {
            id,
            assistant_id,
            clear,
        } => {
            require_webinar(&conn, &id)?;
            let assistant_id = if clear { None } else { assistant_id };
            WebinarRepository::set_assistant(&conn, &id, assistant_id.as_deref())?;
            match assistant_id {
                Some(assistant_id) => println!("Assigned assistant {} to webinar {}", assistant_id, id),
                None => println!("Removed assistant from webinar {}", id),
            }
        }
        WebinarCommand::Cta { id, cta, label } => {
            let cta_type = CtaType::parse(&cta)?;
            require_webinar(&conn, &id)?;
            let label = label.unwrap_or_else(|| default_cta_label(cta_type).to_string());
            WebinarRepository::set_cta(&conn, &id, cta_type, &label)?;
            println!("Webinar {} call-to-action is now {} ({})", id, cta_type, label);
        }
        WebinarCommand::Pipeline { id } => {
            let webinar = require_webinar(&conn, &id)?;
            let attendees = AttendeeRepository::list_by_webinar(&conn, &id)?;
            let board = pipeline::build(&webinar, attendees);

            println!("{} ({} attendees)\n", board.webinar_title, board.total);
            for column in &board.columns {
                println!("{} [{}]", column.title, column.count);
                for attendee in &column.attendees {
                    println!(
                        "  {} <{}>  call: {}",
                        attendee.name, attendee.email, attendee.call_status
                    );
                }
            }
        }
    }

    Ok(())
}

fn require_webinar(conn: &Connection, id: &str) -> Result<Webinar> {
    WebinarRepository::get(conn, id)?.ok_or_else(|| anyhow!("Webinar {} not found", id))
}

fn default_cta_label(cta_type: CtaType) -> &'static str {
    match cta_type {
        CtaType::BookACall => "Book a call",
        CtaType::BuyNow => "Buy now",
    }
}

fn print_webinar(webinar: &Webinar) {
    println!("ID:          {}", webinar.id);
    println!("Title:       {}", webinar.title);
    if let Some(description) = webinar.description.as_deref() {
        println!("Description: {}", description);
    }
    println!("Status:      {}", webinar.status);
    println!("CTA:         {} ({})", webinar.cta_type, webinar.cta_label);
    println!(
        "Assistant:   {}",
        webinar.assistant_id().unwrap_or("<none>")
    );
    if !webinar.tags.is_empty() {
        println!("Tags:        {}", webinar.tags.join(", "));
    }
    println!("Starts:      {}", webinar.start_time);
    println!("Created:     {}", webinar.created_at);
}
