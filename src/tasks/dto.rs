use serde::Deserialize;
use time::{
    format_description::well_known::Iso8601, OffsetDateTime, PrimitiveDateTime,
};

use crate::tasks::repo::Task;

/// Form body shared by the add and edit operations.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl TaskForm {
    /// Absent or empty due date means "no due date". A present, malformed
    /// value is an error that the caller does not recover from.
    pub fn parse_due_date(&self) -> Result<Option<OffsetDateTime>, time::error::Parse> {
        match self.due_date.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => parse_due_date(raw).map(Some),
        }
    }
}

/// Parse an ISO-8601 date-time. Offset-less values, as emitted by
/// `datetime-local` form inputs, are taken as UTC.
pub fn parse_due_date(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
    OffsetDateTime::parse(raw, &Iso8601::DEFAULT)
        .or_else(|_| PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT).map(|dt| dt.assume_utc()))
}

/// The task list grouped the way the index page shows it.
///
/// `completed` and `deleted` overlap when both flags are set on one task;
/// only `active` is exclusive. The overlap is part of the page's contract.
#[derive(Debug, Default)]
pub struct TaskPartitions {
    pub active: Vec<Task>,
    pub completed: Vec<Task>,
    pub deleted: Vec<Task>,
}

pub fn partition(tasks: Vec<Task>) -> TaskPartitions {
    let mut partitions = TaskPartitions::default();
    for task in tasks {
        if task.completed {
            partitions.completed.push(task.clone());
        }
        if task.deleted {
            partitions.deleted.push(task.clone());
        }
        if !task.completed && !task.deleted {
            partitions.active.push(task);
        }
    }
    partitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;
    use uuid::Uuid;

    fn task(id: i64, completed: bool, deleted: bool) -> Task {
        Task {
            id,
            account_id: Uuid::new_v4(),
            title: format!("task {id}"),
            description: String::new(),
            due_date: None,
            completed,
            deleted,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn parses_offset_bearing_date_time() {
        let parsed = parse_due_date("2024-01-15T10:30:00Z").expect("parse");
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), Month::January);
        assert_eq!(parsed.hour(), 10);
    }

    #[test]
    fn offset_less_date_time_is_taken_as_utc() {
        let naive = parse_due_date("2024-01-15T10:30:00").expect("parse");
        let explicit = parse_due_date("2024-01-15T10:30:00Z").expect("parse");
        assert_eq!(naive, explicit);
    }

    #[test]
    fn malformed_date_time_is_an_error() {
        assert!(parse_due_date("not-a-date").is_err());
        assert!(parse_due_date("2024-13-40T99:99:99").is_err());
    }

    #[test]
    fn form_due_date_absent_or_empty_is_none() {
        let form = TaskForm {
            title: "x".into(),
            description: String::new(),
            due_date: None,
        };
        assert_eq!(form.parse_due_date().expect("parse"), None);

        let form = TaskForm {
            title: "x".into(),
            description: String::new(),
            due_date: Some(String::new()),
        };
        assert_eq!(form.parse_due_date().expect("parse"), None);
    }

    #[test]
    fn form_due_date_malformed_propagates() {
        let form = TaskForm {
            title: "x".into(),
            description: String::new(),
            due_date: Some("tomorrow-ish".into()),
        };
        assert!(form.parse_due_date().is_err());
    }

    #[test]
    fn fresh_task_lands_only_in_active() {
        let partitions = partition(vec![task(1, false, false)]);
        assert_eq!(partitions.active.len(), 1);
        assert!(partitions.completed.is_empty());
        assert!(partitions.deleted.is_empty());
    }

    #[test]
    fn completed_and_deleted_task_appears_in_both_partitions() {
        let partitions = partition(vec![task(1, true, true)]);
        assert!(partitions.active.is_empty());
        assert_eq!(partitions.completed.len(), 1);
        assert_eq!(partitions.deleted.len(), 1);
        assert_eq!(partitions.completed[0].id, 1);
        assert_eq!(partitions.deleted[0].id, 1);
    }

    #[test]
    fn completed_survives_deletion_and_vice_versa() {
        let partitions = partition(vec![task(1, true, false), task(2, false, true)]);
        assert!(partitions.active.is_empty());
        assert_eq!(partitions.completed.len(), 1);
        assert_eq!(partitions.completed[0].id, 1);
        assert_eq!(partitions.deleted.len(), 1);
        assert_eq!(partitions.deleted[0].id, 2);
    }

    #[test]
    fn partitions_preserve_input_order() {
        let partitions = partition(vec![
            task(1, false, false),
            task(2, true, false),
            task(3, false, false),
            task(4, true, true),
        ]);
        let active: Vec<i64> = partitions.active.iter().map(|t| t.id).collect();
        let completed: Vec<i64> = partitions.completed.iter().map(|t| t.id).collect();
        assert_eq!(active, vec![1, 3]);
        assert_eq!(completed, vec![2, 4]);
        assert_eq!(partitions.deleted[0].id, 4);
    }
}
