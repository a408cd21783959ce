use time::macros::format_description;

use crate::flash::{FlashMessage, Level};
use crate::tasks::dto::TaskPartitions;
use crate::tasks::repo::Task;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }\n\
ul { padding-left: 1.25rem; }\n\
li { margin: 0.25rem 0; }\n\
.flash.error { color: #b00020; }\n\
.flash.success { color: #1b7f32; }\n\
.due { color: #555; font-size: 0.9em; }\n";

/// Replace characters that would otherwise be interpreted as markup.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flashes: &[FlashMessage], body: &str) -> String {
    let mut flash_html = String::new();
    for message in flashes {
        let class = match message.level {
            Level::Success => "flash success",
            Level::Error => "flash error",
        };
        flash_html.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            escape(&message.text)
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | Taskpad</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n{flash_html}{body}</body>\n</html>\n"
    )
}

pub fn register_page(flashes: &[FlashMessage]) -> String {
    let body = "\
<form method=\"post\" action=\"/register/\">\n\
<p><label>Username <input type=\"text\" name=\"username\"></label></p>\n\
<p><label>Email <input type=\"email\" name=\"email\"></label></p>\n\
<p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
<p><label>Confirm password <input type=\"password\" name=\"password2\"></label></p>\n\
<button type=\"submit\">Register</button>\n\
</form>\n\
<p><a href=\"/login/\">Already have an account? Log in</a></p>\n";
    layout("Register", flashes, body)
}

pub fn login_page(flashes: &[FlashMessage]) -> String {
    let body = "\
<form method=\"post\" action=\"/login/\">\n\
<p><label>Username <input type=\"text\" name=\"username\"></label></p>\n\
<p><label>Password <input type=\"password\" name=\"password\"></label></p>\n\
<button type=\"submit\">Log in</button>\n\
</form>\n\
<p><a href=\"/register/\">Need an account? Register</a></p>\n";
    layout("Log in", flashes, body)
}

fn due_badge(task: &Task) -> String {
    match task.due_date {
        Some(due) => {
            let value = due
                .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
                .unwrap_or_default();
            format!(" <span class=\"due\">(due {value})</span>")
        }
        None => String::new(),
    }
}

fn active_item(task: &Task) -> String {
    format!(
        "<li>{title}{due} <a href=\"/complete/{id}/\">complete</a> \
         <a href=\"/edit/{id}/\">edit</a> \
         <a href=\"/delete/{id}/\">delete</a></li>\n",
        title = escape(&task.title),
        due = due_badge(task),
        id = task.id,
    )
}

fn completed_item(task: &Task) -> String {
    format!(
        "<li>{title}{due} <a href=\"/delete/{id}/\">delete</a></li>\n",
        title = escape(&task.title),
        due = due_badge(task),
        id = task.id,
    )
}

fn deleted_item(task: &Task) -> String {
    format!(
        "<li>{title} <a href=\"/undo/{id}/\">undo</a></li>\n",
        title = escape(&task.title),
        id = task.id,
    )
}

pub fn index_page(partitions: &TaskPartitions, flashes: &[FlashMessage]) -> String {
    let mut body = String::from(
        "<p><a href=\"/logout/\">Log out</a></p>\n\
         <form method=\"post\" action=\"/add/\">\n\
         <p><label>Title <input type=\"text\" name=\"title\"></label></p>\n\
         <p><label>Description <input type=\"text\" name=\"description\"></label></p>\n\
         <p><label>Due <input type=\"datetime-local\" name=\"due_date\"></label></p>\n\
         <button type=\"submit\">Add task</button>\n\
         </form>\n",
    );

    body.push_str("<h2>Active</h2>\n<ul>\n");
    for task in &partitions.active {
        body.push_str(&active_item(task));
    }
    body.push_str("</ul>\n<h2>Completed</h2>\n<ul>\n");
    for task in &partitions.completed {
        body.push_str(&completed_item(task));
    }
    body.push_str("</ul>\n<h2>Deleted</h2>\n<ul>\n");
    for task in &partitions.deleted {
        body.push_str(&deleted_item(task));
    }
    body.push_str("</ul>\n");

    layout("Tasks", flashes, &body)
}

pub fn edit_page(task: &Task) -> String {
    let due_value = task
        .due_date
        .map(|due| {
            due.format(&format_description!("[year]-[month]-[day]T[hour]:[minute]"))
                .unwrap_or_default()
        })
        .unwrap_or_default();
    let body = format!(
        "<form method=\"post\" action=\"/edit/{id}/\">\n\
         <p><label>Title <input type=\"text\" name=\"title\" value=\"{title}\"></label></p>\n\
         <p><label>Description <input type=\"text\" name=\"description\" value=\"{description}\"></label></p>\n\
         <p><label>Due <input type=\"datetime-local\" name=\"due_date\" value=\"{due_value}\"></label></p>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n\
         <p><a href=\"/\">Back to tasks</a></p>\n",
        id = task.id,
        title = escape(&task.title),
        description = escape(&task.description),
    );
    layout("Edit task", &[], &body)
}

pub fn not_found_page() -> String {
    layout("Not found", &[], "<p>No such task.</p>\n<p><a href=\"/\">Back to tasks</a></p>\n")
}
