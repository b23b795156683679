//! Plain-text views of controller state.

use chrono::DateTime;
use std::fmt::Write;

use crate::controllers::{
    CommentThread, FormState, FormStatus, IssueFields, ListState, ListStatus, ProjectFields,
};
use crate::models::{Issue, Project};

pub const NO_PROJECTS: &str = "No projects found. Create your first project to get started.";
pub const NO_ISSUES: &str = "No issues found. Create your first issue to get started.";
pub const NO_COMMENTS: &str = "No comments yet. Be the first to add one!";

pub fn project_list(state: &ListState<Project, ()>) -> String {
    match state.status() {
        ListStatus::Loading => "Loading...".to_string(),
        ListStatus::Error => state.error().unwrap_or_default().to_string(),
        ListStatus::Empty => NO_PROJECTS.to_string(),
        ListStatus::Loaded => {
            let mut out = String::new();
            for project in state.items() {
                let _ = writeln!(
                    out,
                    "#{:<4} {:<40} {}{}",
                    project.id,
                    truncate(&project.name, 40),
                    format_date(&project.created_at),
                    deleting_marker(state.is_deleting(project.id)),
                );
            }
            out.trim_end().to_string()
        }
    }
}

/// Rows are numbered by position, not by id.
pub fn issue_table(state: &ListState<Issue, i64>) -> String {
    match state.status() {
        ListStatus::Loading => "Loading...".to_string(),
        ListStatus::Error => state.error().unwrap_or_default().to_string(),
        ListStatus::Empty => NO_ISSUES.to_string(),
        ListStatus::Loaded => {
            let mut out = String::new();
            for (index, issue) in state.items().iter().enumerate() {
                let number = format!("#{}", index + 1);
                let _ = writeln!(
                    out,
                    "{:<5} {:<40} {:<10} {:<20} {:<8} (id {}){}",
                    number,
                    truncate(&issue.title, 40),
                    format_date(&issue.created_at),
                    truncate(&issue.assigned_to, 20),
                    issue.status.label(),
                    issue.id,
                    deleting_marker(state.is_deleting(issue.id)),
                );
            }
            out.trim_end().to_string()
        }
    }
}

/// Comments added after a failed load are listed under the error line.
pub fn comment_thread(thread: &CommentThread) -> String {
    let mut out = String::from("Comments:\n");
    if let Some(err) = thread.submit_error() {
        let _ = writeln!(out, "  Error: {}", err);
    }

    match thread.status() {
        ListStatus::Loading => out.push_str("  Loading..."),
        ListStatus::Empty => {
            let _ = write!(out, "  {}", NO_COMMENTS);
        }
        ListStatus::Error | ListStatus::Loaded => {
            if let Some(err) = thread.list().error() {
                let _ = writeln!(out, "  {}", err);
            }
            for comment in thread.comments() {
                let _ = writeln!(
                    out,
                    "  [{}] #{}{}",
                    format_datetime(&comment.created_at),
                    comment.id,
                    deleting_marker(thread.list().is_deleting(comment.id)),
                );
                for line in comment.text.lines() {
                    let _ = writeln!(out, "    {}", line);
                }
            }
        }
    }
    out.trim_end().to_string()
}

pub fn project_form(state: &FormState<ProjectFields, ()>) -> String {
    let heading = if state.is_editing() {
        "Edit Project"
    } else {
        "Create New Project"
    };
    match state.status() {
        FormStatus::Loading => "Loading...".to_string(),
        FormStatus::LoadFailed => state.error().unwrap_or_default().to_string(),
        FormStatus::Ready | FormStatus::Submitting => {
            let mut out = format!("{}\n", heading);
            if let Some(err) = state.error() {
                let _ = writeln!(out, "Error: {}", err);
            }
            let _ = write!(out, "Name: {}", state.fields().name);
            out
        }
    }
}

pub fn issue_form(state: &FormState<IssueFields, i64>) -> String {
    match state.status() {
        FormStatus::Loading => "Loading...".to_string(),
        FormStatus::LoadFailed => state.error().unwrap_or_default().to_string(),
        FormStatus::Ready | FormStatus::Submitting => {
            let fields = state.fields();
            let mut out = if state.is_editing() {
                format!("Edit {}\n", fields.title)
            } else {
                "Create New Issue\n".to_string()
            };
            if let Some(err) = state.error() {
                let _ = writeln!(out, "Error: {}", err);
            }
            if let Some(issue) = state.loaded() {
                let _ = writeln!(out, "Created At: {}", format_date(&issue.created_at));
            }
            let _ = writeln!(out, "Title: {}", fields.title);
            let _ = writeln!(out, "Assigned To: {}", fields.assigned_to);
            let _ = writeln!(out, "Status: {}", fields.status.label());
            if !fields.description.is_empty() {
                out.push_str("\nDescription:\n");
                for line in fields.description.lines() {
                    let _ = writeln!(out, "  {}", line);
                }
            }
            out.trim_end().to_string()
        }
    }
}

fn deleting_marker(deleting: bool) -> &'static str {
    if deleting {
        " (deleting...)"
    } else {
        ""
    }
}

/// Date part of an ISO-8601 timestamp; unparsable values are shown as-is.
pub fn format_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

pub fn format_datetime(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
