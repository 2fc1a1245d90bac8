//! Minimal server-rendered HTML. Every interpolated value goes through
//! [`escape`]; forms carry a `_method` field where browsers cannot send the
//! verb themselves.

use crate::db::models::{Category, CustomUser, Page};
use crate::forms::{CategoryInput, FieldErrors, PageInput, UserInput};

pub fn escape(s: &str) -> String {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.message(field) {
        Some(msg) => format!(" <span class=\"error\">{}</span>", escape(msg)),
        None => String::new(),
    }
}

fn text_field(label: &str, name: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        "<div><label for=\"{name}\">{label}</label>{err}<br>\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\"></div>\n",
        err = field_error(errors, name),
        value = escape(value),
    )
}

fn password_field(label: &str, name: &str, errors: &FieldErrors) -> String {
    // never echo a submitted password back
    format!(
        "<div><label for=\"{name}\">{label}</label>{err}<br>\
         <input type=\"password\" id=\"{name}\" name=\"{name}\"></div>\n",
        err = field_error(errors, name),
    )
}

fn textarea_field(label: &str, name: &str, value: &str, errors: &FieldErrors) -> String {
    format!(
        "<div><label for=\"{name}\">{label}</label>{err}<br>\
         <textarea id=\"{name}\" name=\"{name}\">{value}</textarea></div>\n",
        err = field_error(errors, name),
        value = escape(value),
    )
}

fn category_select(selected: &str, categories: &[Category], errors: &FieldErrors) -> String {
    let mut options = String::from("<option value=\"\"></option>");
    for c in categories {
        let sel = if selected == c.id.to_string() {
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{}\"{sel}>{}</option>",
            c.id,
            escape(&c.name)
        ));
    }
    format!(
        "<div><label for=\"category_id\">Category</label>{err}<br>\
         <select id=\"category_id\" name=\"category_id\">{options}</select></div>\n",
        err = field_error(errors, "category_id"),
    )
}

fn delete_form(action: &str) -> String {
    format!(
        "<form action=\"{action}\" method=\"POST\">\
         <input type=\"hidden\" name=\"_method\" value=\"DELETE\">\
         <button type=\"submit\">Delete</button></form>\n"
    )
}

/// Wrap entity fields into a create or edit form. Edit forms submit with a
/// `_method=PUT` override and carry a delete form below.
fn entity_form(resource: &str, id: Option<i64>, fields: &str) -> String {
    match id {
        None => format!(
            "<form action=\"/cms/{resource}/\" method=\"POST\">\n{fields}\
             <button type=\"submit\">Create</button>\n</form>\n"
        ),
        Some(id) => format!(
            "<form action=\"/cms/{resource}/{id}\" method=\"POST\">\n\
             <input type=\"hidden\" name=\"_method\" value=\"PUT\">\n{fields}\
             <button type=\"submit\">Update</button>\n</form>\n{delete}",
            delete = delete_form(&format!("/cms/{resource}/{id}"))
        ),
    }
}

fn list_footer(resource: &str) -> String {
    format!("<p><a href=\"/cms/{resource}/new\">Create a new entry</a></p>\n")
}

fn back_link(resource: &str) -> String {
    format!("<p><a href=\"/cms/{resource}/\">Back to the list</a></p>\n")
}

// -- shared pages --

pub fn not_found_page() -> String {
    layout("Not Found", "<h1>404 Not Found</h1>\n")
}

pub fn server_error_page() -> String {
    layout(
        "Internal Server Error",
        "<h1>Something went wrong</h1>\n<p>Please try again later.</p>\n",
    )
}

pub fn validation_page(errors: &FieldErrors) -> String {
    let mut items = String::new();
    for (field, message) in errors.iter() {
        items.push_str(&format!(
            "<li>{}: {}</li>\n",
            escape(field),
            escape(message)
        ));
    }
    layout(
        "Invalid Submission",
        &format!("<h1>Invalid submission</h1>\n<ul>\n{items}</ul>\n"),
    )
}

pub fn admin_page(username: &str) -> String {
    layout(
        "Administration",
        &format!(
            "<h1>Administration</h1>\n<p>Signed in as {}</p>\n\
             <ul>\n\
             <li><a href=\"/cms/category/\">Categories</a></li>\n\
             <li><a href=\"/cms/page/\">Pages</a></li>\n\
             <li><a href=\"/cms/user/\">Users</a></li>\n\
             </ul>\n<p><a href=\"/logout\">Logout</a></p>\n",
            escape(username)
        ),
    )
}

pub fn login_page(last_username: &str, failed: bool) -> String {
    let error = if failed {
        "<p class=\"error\">Invalid credentials.</p>\n"
    } else {
        ""
    };
    layout(
        "Login",
        &format!(
            "<h1>Login</h1>\n{error}\
             <form action=\"/login_check\" method=\"POST\">\n\
             <div><label for=\"username\">Username</label><br>\
             <input type=\"text\" id=\"username\" name=\"username\" value=\"{}\"></div>\n\
             <div><label for=\"password\">Password</label><br>\
             <input type=\"password\" id=\"password\" name=\"password\"></div>\n\
             <button type=\"submit\">Login</button>\n</form>\n",
            escape(last_username)
        ),
    )
}

// -- categories --

pub fn category_list(categories: &[Category]) -> String {
    let mut rows = String::new();
    for c in categories {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/cms/category/{id}\">{name}</a></td>\
             <td><a href=\"/cms/category/{id}/edit\">Edit</a></td></tr>\n",
            id = c.id,
            name = escape(&c.name),
        ));
    }
    layout(
        "Categories",
        &format!(
            "<h1>Category list</h1>\n<table>\n\
             <thead><tr><th>Id</th><th>Name</th><th></th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n</table>\n{footer}",
            footer = list_footer("category")
        ),
    )
}

pub fn category_form(id: Option<i64>, input: &CategoryInput, errors: &FieldErrors) -> String {
    let fields = text_field("Name", "name", &input.name, errors);
    let title = if id.is_some() {
        "Category edit"
    } else {
        "Category creation"
    };
    layout(
        title,
        &format!(
            "<h1>{title}</h1>\n{form}{back}",
            form = entity_form("category", id, &fields),
            back = back_link("category"),
        ),
    )
}

pub fn category_show(category: &Category, pages: &[Page]) -> String {
    let mut page_items = String::new();
    for p in pages {
        page_items.push_str(&format!(
            "<li><a href=\"/cms/page/{}\">{}</a></li>\n",
            p.id,
            escape(&p.title)
        ));
    }
    layout(
        "Category",
        &format!(
            "<h1>Category</h1>\n<table>\n\
             <tr><th>Id</th><td>{id}</td></tr>\n\
             <tr><th>Name</th><td>{name}</td></tr>\n\
             </table>\n<h2>Pages</h2>\n<ul>\n{page_items}</ul>\n\
             <p><a href=\"/cms/category/{id}/edit\">Edit</a></p>\n{delete}{back}",
            id = category.id,
            name = escape(&category.name),
            delete = delete_form(&format!("/cms/category/{}", category.id)),
            back = back_link("category"),
        ),
    )
}

// -- pages --

pub fn page_list(pages: &[Page]) -> String {
    let mut rows = String::new();
    for p in pages {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/cms/page/{id}\">{title}</a></td>\
             <td><a href=\"/cms/page/{id}/edit\">Edit</a></td></tr>\n",
            id = p.id,
            title = escape(&p.title),
        ));
    }
    layout(
        "Pages",
        &format!(
            "<h1>Page list</h1>\n<table>\n\
             <thead><tr><th>Id</th><th>Title</th><th></th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n</table>\n{footer}",
            footer = list_footer("page")
        ),
    )
}

pub fn page_form(
    id: Option<i64>,
    input: &PageInput,
    categories: &[Category],
    errors: &FieldErrors,
) -> String {
    let mut fields = text_field("Title", "title", &input.title, errors);
    fields.push_str(&textarea_field("Content", "content", &input.content, errors));
    fields.push_str(&category_select(&input.category_id, categories, errors));
    let title = if id.is_some() {
        "Page edit"
    } else {
        "Page creation"
    };
    layout(
        title,
        &format!(
            "<h1>{title}</h1>\n{form}{back}",
            form = entity_form("page", id, &fields),
            back = back_link("page"),
        ),
    )
}

pub fn page_show(page: &Page, category: Option<&Category>) -> String {
    let category_cell = match category {
        Some(c) => format!(
            "<a href=\"/cms/category/{}\">{}</a>",
            c.id,
            escape(&c.name)
        ),
        None => String::new(),
    };
    layout(
        "Page",
        &format!(
            "<h1>Page</h1>\n<table>\n\
             <tr><th>Id</th><td>{id}</td></tr>\n\
             <tr><th>Title</th><td>{title}</td></tr>\n\
             <tr><th>Content</th><td>{content}</td></tr>\n\
             <tr><th>Category</th><td>{category_cell}</td></tr>\n\
             </table>\n\
             <p><a href=\"/cms/page/{id}/edit\">Edit</a></p>\n{delete}{back}",
            id = page.id,
            title = escape(&page.title),
            content = escape(&page.content),
            delete = delete_form(&format!("/cms/page/{}", page.id)),
            back = back_link("page"),
        ),
    )
}

// -- users --

pub fn user_list(users: &[CustomUser]) -> String {
    let mut rows = String::new();
    for u in users {
        rows.push_str(&format!(
            "<tr><td>{id}</td><td><a href=\"/cms/user/{id}\">{username}</a></td>\
             <td><a href=\"/cms/user/{id}/edit\">Edit</a></td></tr>\n",
            id = u.id,
            username = escape(&u.username),
        ));
    }
    layout(
        "Users",
        &format!(
            "<h1>User list</h1>\n<table>\n\
             <thead><tr><th>Id</th><th>Username</th><th></th></tr></thead>\n\
             <tbody>\n{rows}</tbody>\n</table>\n{footer}",
            footer = list_footer("user")
        ),
    )
}

pub fn user_form(id: Option<i64>, input: &UserInput, errors: &FieldErrors) -> String {
    let mut fields = text_field("Username", "username", &input.username, errors);
    fields.push_str(&password_field("Password", "password", errors));
    let title = if id.is_some() {
        "User edit"
    } else {
        "User creation"
    };
    layout(
        title,
        &format!(
            "<h1>{title}</h1>\n{form}{back}",
            form = entity_form("user", id, &fields),
            back = back_link("user"),
        ),
    )
}

pub fn user_show(user: &CustomUser) -> String {
    layout(
        "User",
        &format!(
            "<h1>User</h1>\n<table>\n\
             <tr><th>Id</th><td>{id}</td></tr>\n\
             <tr><th>Username</th><td>{username}</td></tr>\n\
             </table>\n\
             <p><a href=\"/cms/user/{id}/edit\">Edit</a></p>\n{delete}{back}",
            id = user.id,
            username = escape(&user.username),
            delete = delete_form(&format!("/cms/user/{}", user.id)),
            back = back_link("user"),
        ),
    )
}
