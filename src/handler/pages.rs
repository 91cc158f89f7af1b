//! HTML page builders
//!
//! Page content for the message form, the user list, the user confirmation,
//! and the default greeting.

/// Home page with the message form
#[must_use]
pub fn form_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Formlet</title>
</head>
<body>
    <h1>Leave a message</h1>
    <form action="/message" method="POST">
        <input type="text" name="message" />
        <input type="text" name="second" />
        <button type="submit">Send</button>
    </form>
</body>
</html>"#,
    )
}

/// User list page
#[must_use]
pub fn users_page(users: &[String]) -> String {
    let items: String = users
        .iter()
        .map(|user| format!("        <li>{}</li>\n", escape_html(user)))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Users</title>
</head>
<body>
    <ul>
{items}    </ul>
</body>
</html>"#
    )
}

/// Confirmation page for a newly submitted user name
#[must_use]
pub fn user_created_page(username: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Formlet</title>
</head>
<body>
    <p>New user called {}</p>
</body>
</html>"#,
        escape_html(username)
    )
}

/// Default page for unmatched requests
#[must_use]
pub fn default_page() -> String {
    String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Formlet</title>
</head>
<body>
    <h1>Hello from Formlet!</h1>
</body>
</html>"#,
    )
}

/// Escape text interpolated into HTML
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_page_has_exactly_one_form() {
        let page = form_page();
        assert_eq!(page.matches("<form").count(), 1);
        assert!(page.contains(r#"action="/message""#));
        assert!(page.contains(r#"name="message""#));
    }

    #[test]
    fn test_users_page_lists_every_user() {
        let users = vec!["Michelle".to_string(), "David".to_string()];
        let page = users_page(&users);
        assert!(page.contains("<li>Michelle</li>"));
        assert!(page.contains("<li>David</li>"));
    }

    #[test]
    fn test_user_created_page_escapes_html() {
        let page = user_created_page("<script>");
        assert!(page.contains("New user called &lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_default_page_has_no_form() {
        assert_eq!(default_page().matches("<form").count(), 0);
    }
}
