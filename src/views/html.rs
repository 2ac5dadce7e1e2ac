//! Server-rendered pages.

use crate::forms::{AddressInput, ClientInput};
use crate::models::{Client, SortColumn, SortState};
use crate::validation::ValidationErrors;

use super::IndexView;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left}\
.pagination{list-style:none;display:flex;gap:.5rem;padding:0}\
.pagination .active{font-weight:bold}\
.pagination .disabled{color:#999}\
.field-error{color:#b00020;display:block}\
form.inline{display:inline}";

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{} - Client Manager</title>\
<style>{STYLE}</style></head><body>{body}</body></html>",
        escape(title)
    )
}

/// Link to the client index. An empty filter is left out of the query string.
pub fn index_href(filter: &str, page: Option<i64>, sort: SortState) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    if !filter.is_empty() {
        params.push(("filterText", filter.to_string()));
    }
    if let Some(page) = page {
        params.push(("page", page.to_string()));
    }
    params.push(("sortOrder", sort.as_str().to_string()));

    let query = serde_urlencoded::to_string(&params).unwrap_or_default();
    format!("/?{query}")
}

fn address_summary(client: &Client) -> String {
    match &client.address {
        Some(a) => format!("{}, {}, {} {}", a.street_address, a.city, a.state, a.zip),
        None => String::new(),
    }
}

fn filter_form(view: &IndexView) -> String {
    let mut html = format!(
        "<form method=\"get\" action=\"/\">\
<input type=\"text\" name=\"filterText\" value=\"{}\" placeholder=\"Search clients\">\
<input type=\"hidden\" name=\"sortOrder\" value=\"{}\">\
<button type=\"submit\">Filter</button>",
        escape(&view.filter.selected_text),
        view.sort.current.as_str()
    );
    if view.filter.is_applied() {
        html.push_str(&format!(
            " <a href=\"{}\">Clear</a>",
            escape(&index_href("", None, view.sort.current))
        ));
    }
    html.push_str("</form>");
    html
}

fn header_row(view: &IndexView) -> String {
    let mut html = String::from("<tr>");
    for column in SortColumn::ALL {
        let next = view.sort.for_column(column);
        let marker = if view.sort.current.column() != column {
            ""
        } else if view.sort.current.is_descending() {
            " &#9660;"
        } else {
            " &#9650;"
        };
        html.push_str(&format!(
            "<th><a href=\"{}\">{}</a>{marker}</th>",
            escape(&index_href(&view.filter.selected_text, None, next)),
            column.label()
        ));
    }
    html.push_str("<th></th></tr>");
    html
}

fn client_row(client: &Client) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
<td><a href=\"/clients/edit?id={id}\">Edit</a> \
<a href=\"/clients/edit-address?id={id}\">Edit Address</a> \
<form class=\"inline\" method=\"post\" action=\"/clients/delete\" \
onsubmit=\"return confirm('Delete this client?');\">\
<input type=\"hidden\" name=\"id\" value=\"{id}\"><button type=\"submit\">Delete</button></form></td></tr>",
        escape(&client.first_name),
        escape(&client.last_name),
        escape(&client.email),
        escape(&client.phone),
        escape(&address_summary(client)),
        escape(client.description.as_deref().unwrap_or_default()),
        id = client.id
    )
}

fn pagination(view: &IndexView) -> String {
    let pages = &view.pagination;
    let filter = &view.filter.selected_text;
    let sort = view.sort.current;

    let mut html = String::from("<ul class=\"pagination\">");
    if pages.has_previous() {
        html.push_str(&format!(
            "<li><a href=\"{}\">Previous</a></li>",
            escape(&index_href(filter, Some(pages.page_number - 1), sort))
        ));
    } else {
        html.push_str("<li class=\"disabled\">Previous</li>");
    }
    html.push_str(&format!(
        "<li class=\"active\">{} of {}</li>",
        pages.page_number, pages.total_pages
    ));
    if pages.has_next() {
        html.push_str(&format!(
            "<li><a href=\"{}\">Next</a></li>",
            escape(&index_href(filter, Some(pages.page_number + 1), sort))
        ));
    } else {
        html.push_str("<li class=\"disabled\">Next</li>");
    }
    html.push_str("</ul>");
    html
}

pub fn index_page(view: &IndexView) -> String {
    let mut body = String::from("<h1>Clients</h1>");
    body.push_str(&filter_form(view));
    body.push_str("<table><thead>");
    body.push_str(&header_row(view));
    body.push_str("</thead><tbody>");
    for client in &view.clients {
        body.push_str(&client_row(client));
    }
    if view.clients.is_empty() {
        body.push_str("<tr><td colspan=\"7\">No clients found.</td></tr>");
    }
    body.push_str("</tbody></table>");
    body.push_str(&pagination(view));

    layout("Clients", &body)
}

fn text_field(
    label: &str,
    name: &str,
    value: Option<&str>,
    errors: Option<&ValidationErrors>,
) -> String {
    let message = errors
        .and_then(|e| e.message_for(name))
        .map(|m| format!("<span class=\"field-error\">{}</span>", escape(m)))
        .unwrap_or_default();
    format!(
        "<p><label for=\"{name}\">{label}</label><br>\
<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">{message}</p>",
        escape(value.unwrap_or_default())
    )
}

fn hidden_id(id: Option<i64>) -> String {
    let value = id.map(|id| id.to_string()).unwrap_or_default();
    format!("<input type=\"hidden\" name=\"id\" value=\"{value}\">")
}

/// Edit form for a client, with the address inlined.
pub fn client_form(input: &ClientInput, errors: Option<&ValidationErrors>) -> String {
    let address = input.address.clone().unwrap_or_default();

    let mut body = String::from("<h1>Edit Client</h1>");
    if let Some(message) = errors.and_then(|e| e.message_for("id")) {
        body.push_str(&format!("<p class=\"field-error\">{}</p>", escape(message)));
    }
    body.push_str("<form method=\"post\" action=\"/clients/edit\">");
    body.push_str(&hidden_id(input.id));
    body.push_str(&text_field("First Name", "firstName", input.first_name.as_deref(), errors));
    body.push_str(&text_field("Last Name", "lastName", input.last_name.as_deref(), errors));
    body.push_str(&text_field("Email", "email", input.email.as_deref(), errors));
    body.push_str(&text_field("Phone", "phone", input.phone.as_deref(), errors));
    body.push_str(&text_field(
        "Street Address",
        "streetAddress",
        address.street_address.as_deref(),
        errors,
    ));
    body.push_str(&text_field("City", "city", address.city.as_deref(), errors));
    body.push_str(&text_field("State", "state", address.state.as_deref(), errors));
    body.push_str(&text_field("ZIP", "zip", address.zip.as_deref(), errors));
    body.push_str(&text_field(
        "Description",
        "description",
        input.description.as_deref(),
        errors,
    ));
    body.push_str("<button type=\"submit\">Save</button> <a href=\"/\">Back to list</a></form>");

    layout("Edit Client", &body)
}

pub fn address_form(input: &AddressInput, errors: Option<&ValidationErrors>) -> String {
    let mut body = String::from("<h1>Edit Address</h1>");
    if let Some(message) = errors.and_then(|e| e.message_for("id")) {
        body.push_str(&format!("<p class=\"field-error\">{}</p>", escape(message)));
    }
    body.push_str("<form method=\"post\" action=\"/clients/edit-address\">");
    body.push_str(&hidden_id(input.id));
    body.push_str(&text_field(
        "Street Address",
        "streetAddress",
        input.street_address.as_deref(),
        errors,
    ));
    body.push_str(&text_field("City", "city", input.city.as_deref(), errors));
    body.push_str(&text_field("State", "state", input.state.as_deref(), errors));
    body.push_str(&text_field("ZIP", "zip", input.zip.as_deref(), errors));
    body.push_str("<button type=\"submit\">Save</button> <a href=\"/\">Back to list</a></form>");

    layout("Edit Address", &body)
}

/// A titled page carrying one message and a link back to the list.
pub fn message_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1><p>{}</p><p><a href=\"/\">Back to list</a></p>",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;
    use crate::views::{FilterView, Pagination, SortHeaders};

    fn view(clients: Vec<Client>, page: i64, total: i64, filter: &str) -> IndexView {
        IndexView::new(
            clients,
            Pagination::new(total, page, 10),
            FilterView::new(filter),
            SortHeaders::new(SortState::LastNameAsc),
        )
    }

    fn client(first: &str) -> Client {
        Client {
            id: 7,
            first_name: first.into(),
            last_name: "Doe".into(),
            email: "x@example.com".into(),
            phone: "555-000-1111".into(),
            description: None,
            address: Some(Address {
                id: 3,
                street_address: "1 Main St".into(),
                city: "Anytown".into(),
                state: "CA".into(),
                zip: "123450".into(),
            }),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<a href=\"x\">Tom & 'Jerry'</a>"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn index_href_encodes_filter_and_skips_empty() {
        assert_eq!(
            index_href("a b&c", Some(2), SortState::EmailDesc),
            "/?filterText=a+b%26c&page=2&sortOrder=EmailDesc"
        );
        assert_eq!(index_href("", None, SortState::FirstNameAsc), "/?sortOrder=FirstNameAsc");
    }

    #[test]
    fn index_page_renders_rows_and_escapes_text() {
        let html = index_page(&view(vec![client("<script>")], 1, 1, ""));

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("/clients/edit?id=7"));
        assert!(html.contains("/clients/edit-address?id=7"));
        assert!(html.contains("1 Main St, Anytown, CA 123450"));
    }

    #[test]
    fn header_links_keep_filter_and_toggle_active_column() {
        let html = index_page(&view(vec![], 1, 0, "doe"));

        assert!(html.contains("/?filterText=doe&amp;sortOrder=LastNameDesc"));
        assert!(html.contains("/?filterText=doe&amp;sortOrder=FirstNameAsc"));
        assert!(html.contains("No clients found."));
    }

    #[test]
    fn pagination_links_only_where_pages_exist() {
        let html = index_page(&view(vec![], 2, 25, "doe"));

        assert!(html.contains("filterText=doe&amp;page=1&amp;sortOrder=LastNameAsc"));
        assert!(html.contains("filterText=doe&amp;page=3&amp;sortOrder=LastNameAsc"));
        assert!(html.contains("<li class=\"active\">2 of 3</li>"));

        let html = index_page(&view(vec![], 1, 5, ""));
        assert!(html.contains("<li class=\"disabled\">Previous</li>"));
        assert!(html.contains("<li class=\"disabled\">Next</li>"));
    }

    #[test]
    fn client_form_shows_field_messages() {
        let input = ClientInput {
            id: Some(4),
            first_name: Some("J0hn".into()),
            ..ClientInput::default()
        };
        let errors = crate::validation::validate_client(&input).unwrap_err();
        let html = client_form(&input, Some(&errors));

        assert!(html.contains("value=\"J0hn\""));
        assert!(html.contains("First Name should contain only letters"));
        assert!(html.contains("Email is required"));
        assert!(html.contains("name=\"id\" value=\"4\""));
    }
}
