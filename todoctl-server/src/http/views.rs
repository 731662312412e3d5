//! HTML rendering for the todo page
//!
//! The page is small enough to build directly with `format!`; every piece of
//! stored text goes through [`escape_html`] first.

use crate::models::Todo;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Todo List</title>
</head>
<body>
<h1>Todo List</h1>
"#;

const ADD_FORM: &str = r#"<form action="/add" method="post">
<input type="text" name="todo" placeholder="What needs doing?" maxlength="1024" required>
<button type="submit">Add</button>
</form>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render the index page: the add form followed by every todo.
pub fn render_index(todos: &[Todo]) -> String {
    let mut html = String::with_capacity(PAGE_HEAD.len() + ADD_FORM.len() + todos.len() * 64);
    html.push_str(PAGE_HEAD);
    html.push_str(ADD_FORM);

    if todos.is_empty() {
        html.push_str("<p class=\"empty\">Nothing to do yet.</p>\n");
    } else {
        html.push_str("<ul>\n");
        for todo in todos {
            html.push_str(&format!(
                "<li id=\"todo-{}\">{}</li>\n",
                todo.id,
                escape_html(&todo.text)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(PAGE_TAIL);
    html
}
