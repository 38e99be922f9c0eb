//! Pipeline board for a webinar.
//!
//! Groups the webinar's attendees by attendance stage, one column per stage.
//! Used by both the CLI and REST API.

use crate::call::CallStore;
use crate::db::{AttendanceStage, Attendee, Webinar};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineColumn {
    pub stage: AttendanceStage,
    pub title: String,
    pub count: usize,
    pub attendees: Vec<Attendee>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub webinar_id: String,
    pub webinar_title: String,
    pub total: usize,
    pub columns: Vec<PipelineColumn>,
}

impl Pipeline {
    pub fn column(&self, stage: AttendanceStage) -> Option<&PipelineColumn> {
        self.columns.iter().find(|c| c.stage == stage)
    }
}

/// Build the board. Every stage gets a column, empty or not, in pipeline order.
pub fn build(webinar: &Webinar, attendees: Vec<Attendee>) -> Pipeline {
    let total = attendees.len();
    let mut columns: Vec<PipelineColumn> = AttendanceStage::ALL
        .iter()
        .map(|stage| PipelineColumn {
            stage: *stage,
            title: stage.title().to_string(),
            count: 0,
            attendees: Vec::new(),
            tags: webinar.tags.clone(),
        })
        .collect();

    for attendee in attendees {
        if let Some(column) = columns.iter_mut().find(|c| c.stage == attendee.stage) {
            column.attendees.push(attendee);
        }
    }

    for column in &mut columns {
        column.count = column.attendees.len();
    }

    Pipeline {
        webinar_id: webinar.id.clone(),
        webinar_title: webinar.title.clone(),
        total,
        columns,
    }
}

/// Load the board for a webinar. `None` when the webinar does not exist.
pub async fn load(store: &dyn CallStore, webinar_id: &str) -> Result<Option<Pipeline>> {
    let Some(webinar) = store.get_webinar_by_id(webinar_id).await? else {
        return Ok(None);
    };
    let attendees = store.list_attendees(webinar_id).await?;
    Ok(Some(build(&webinar, attendees)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{CallStatus, CtaType, WebinarStatus};

    fn webinar() -> Webinar {
        Webinar {
            id: "w1".to_string(),
            title: "Hiring Day".to_string(),
            description: None,
            status: WebinarStatus::Live,
            cta_type: CtaType::BookACall,
            cta_label: "Book a call".to_string(),
            ai_agent_id: Some("agent-1".to_string()),
            tags: vec!["New".to_string(), "Hot lead".to_string()],
            start_time: "2025-01-01T00:00:00Z".to_string(),
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    fn attendee(name: &str, stage: AttendanceStage) -> Attendee {
        Attendee {
            id: format!("id-{}", name),
            webinar_id: "w1".to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name),
            call_status: CallStatus::Pending,
            stage,
            created_at: "2025-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_every_stage_has_a_column_in_order() {
        let pipeline = build(&webinar(), Vec::new());
        let titles: Vec<&str> = pipeline.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Registered",
                "Attended",
                "Added to Cart",
                "Follow Up",
                "Breakout Room",
                "Converted"
            ]
        );
        assert_eq!(pipeline.total, 0);
        assert!(pipeline.columns.iter().all(|c| c.count == 0));
    }

    #[test]
    fn test_attendees_grouped_by_stage() {
        let pipeline = build(
            &webinar(),
            vec![
                attendee("ada", AttendanceStage::Registered),
                attendee("grace", AttendanceStage::Converted),
                attendee("linus", AttendanceStage::Registered),
            ],
        );

        assert_eq!(pipeline.total, 3);
        let registered = pipeline.column(AttendanceStage::Registered).unwrap();
        assert_eq!(registered.count, 2);
        assert_eq!(registered.attendees[0].name, "ada");
        assert_eq!(pipeline.column(AttendanceStage::Converted).unwrap().count, 1);
        assert_eq!(pipeline.column(AttendanceStage::FollowUp).unwrap().count, 0);
    }

    #[test]
    fn test_columns_carry_webinar_tags() {
        let pipeline = build(&webinar(), Vec::new());
        assert!(pipeline
            .columns
            .iter()
            .all(|c| c.tags == vec!["New".to_string(), "Hot lead".to_string()]));
    }
}
