//! HTML pages
//!
//! Small hand-written pages for the member list and the add and edit forms.
//! Every interpolated value goes through [`escape_html`].

use domain_person::{Gender, Person};

use crate::dto::person::{AddPersonForm, EditPersonForm};

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Member Registry</title>
</head>
<body>
<nav><a href="/">Members</a> | <a href="/Add">Add member</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

fn error_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape_html(e)))
        .collect();
    format!("<ul class=\"errors\">{}</ul>\n", items)
}

fn text_input(label: &str, name: &str, value: &str, input_type: &str) -> String {
    format!(
        "<p><label>{label} <input type=\"{input_type}\" name=\"{name}\" value=\"{value}\"></label></p>\n",
        label = escape_html(label),
        input_type = input_type,
        name = name,
        value = escape_html(value),
    )
}

fn gender_select(selected: &str) -> String {
    let selected = selected.parse::<Gender>().unwrap_or_default();
    let options: String = [Gender::Unspecified, Gender::Female, Gender::Male, Gender::Other]
        .iter()
        .map(|g| {
            format!(
                "<option value=\"{value}\"{sel}>{value}</option>",
                value = g.as_str(),
                sel = if *g == selected { " selected" } else { "" },
            )
        })
        .collect();
    format!("<p><label>Gender <select name=\"gender\">{}</select></label></p>\n", options)
}

fn address_inputs(address: &str, city: &str, postcode: &str, country: &str) -> String {
    [
        text_input("Address", "address", address, "text"),
        text_input("City", "city", city, "text"),
        text_input("Post code", "postcode", postcode, "text"),
        text_input("Country", "country", country, "text"),
    ]
    .concat()
}

/// Member list with a result count, or an empty-state message
pub fn index_page(persons: &[Person]) -> String {
    if persons.is_empty() {
        return layout(
            "Members",
            "<p class=\"empty\">No members registered yet.</p>\n",
        );
    }

    let rows: String = persons
        .iter()
        .map(|p| {
            let id = escape_html(p.id.as_str());
            format!(
                "<tr><td>{name}</td><td>{username}</td><td>{email}</td><td>{phone}</td>\
                 <td>{gender}</td><td>{city}</td><td>{country}</td><td>{registered}</td>\
                 <td><a href=\"/Edit/{id}\">Edit</a> <a href=\"/Delete/{id}\">Delete</a></td></tr>\n",
                name = escape_html(&p.full_name()),
                username = escape_html(&p.login.username),
                email = escape_html(&p.email.data),
                phone = escape_html(&p.phone.data),
                gender = p.gender,
                city = escape_html(&p.location.city),
                country = escape_html(&p.location.country),
                registered = p.registered.format("%Y-%m-%d %H:%M"),
                id = id,
            )
        })
        .collect();

    let body = format!(
        "<p class=\"count\">{count} result(s)</p>\n<table>\n\
         <tr><th>Name</th><th>Username</th><th>Email</th><th>Phone</th><th>Gender</th>\
         <th>City</th><th>Country</th><th>Registered</th><th></th></tr>\n{rows}</table>\n",
        count = persons.len(),
        rows = rows,
    );
    layout("Members", &body)
}

/// Registration form, refilled with `form` and listing `errors`
pub fn add_page(form: &AddPersonForm, errors: &[String]) -> String {
    let body = format!(
        "{errors}<form method=\"post\" action=\"/Add\">\n{fields}<p><button type=\"submit\">Add</button></p>\n</form>\n",
        errors = error_list(errors),
        fields = [
            text_input("First name", "first", &form.first, "text"),
            text_input("Last name", "last", &form.last, "text"),
            text_input("Email", "email", &form.email, "email"),
            text_input("Phone", "phone", &form.phone, "tel"),
            gender_select(&form.gender),
            text_input("Date of birth", "birthdate", &form.birthdate, "date"),
            text_input("Username", "username", &form.username, "text"),
            text_input("Password", "password", "", "password"),
            address_inputs(&form.address, &form.city, &form.postcode, &form.country),
        ]
        .concat(),
    );
    layout("Add member", &body)
}

/// Edit form for the member `id`
pub fn edit_page(id: &str, form: &EditPersonForm, errors: &[String]) -> String {
    let body = format!(
        "{errors}<form method=\"post\" action=\"/Edit/{id}\">\n{fields}<p><button type=\"submit\">Save</button></p>\n</form>\n",
        errors = error_list(errors),
        id = escape_html(id),
        fields = [
            text_input("First name", "first", &form.first, "text"),
            text_input("Last name", "last", &form.last, "text"),
            text_input("Email", "email", &form.email, "email"),
            text_input("Phone", "phone", &form.phone, "tel"),
            gender_select(&form.gender),
            address_inputs(&form.address, &form.city, &form.postcode, &form.country),
        ]
        .concat(),
    );
    layout("Edit member", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::PersonFixtures;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_index() {
        let page = index_page(&[]);
        assert!(page.contains("No members registered yet."));
        assert!(!page.contains("<table>"));
    }

    #[test]
    fn test_index_lists_people_with_count() {
        let mut person = PersonFixtures::registered_ayse();
        person.name.first = "<script>".to_string();

        let page = index_page(&[person.clone()]);
        assert!(page.contains("1 result(s)"));
        assert!(page.contains(&format!("/Edit/{}", person.id)));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_edit_page_prefills_and_selects_gender() {
        let person = PersonFixtures::registered_ayse();
        let page = edit_page(person.id.as_str(), &EditPersonForm::from(&person), &[]);

        assert!(page.contains("value=\"ayse.yilmaz@example.com\""));
        assert!(page.contains("<option value=\"female\" selected>"));
    }

    #[test]
    fn test_add_page_never_echoes_password() {
        let form = AddPersonForm {
            password: "leak-me".to_string(),
            ..AddPersonForm::default()
        };
        let page = add_page(&form, &["Email must be a valid address".to_string()]);
        assert!(!page.contains("leak-me"));
        assert!(page.contains("<li>Email must be a valid address</li>"));
    }

    proptest! {
        #[test]
        fn prop_escaped_text_has_no_markup(text in ".*") {
            let escaped = escape_html(&text);
            prop_assert!(!escaped.contains(['<', '>', '"', '\'']));
        }
    }
}
