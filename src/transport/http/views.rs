//! Server-rendered HTML pages.

use crate::domain::ParkingSlot;
use crate::storage::SlotCounts;
use axum::response::Html;

/// A one-line status message shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    fn render(&self) -> String {
        let (class, text) = match self {
            Notice::Success(text) => ("success", text),
            Notice::Error(text) => ("error", text),
        };
        format!("<p class=\"message {}\">{}</p>", class, escape(text))
    }
}

pub fn index_page(slots: &[ParkingSlot], counts: SlotCounts) -> Html<String> {
    let mut body = format!(
        "<h1>Parking Slots</h1>\n<p class=\"summary\">{} slots, {} free</p>\n",
        counts.total, counts.free
    );

    if slots.is_empty() {
        body.push_str("<p>No slots registered yet. <a href=\"/add\">Add one</a>.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Slot</th><th>Covered</th><th>EV Charging</th><th>Status</th><th></th></tr>\n",
        );
        for slot in slots {
            let action = if slot.is_occupied {
                format!("<a href=\"/remove/{}\">Remove vehicle</a>", slot.slot_no)
            } else {
                String::new()
            };
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                slot.slot_no,
                yes_no(slot.is_covered),
                yes_no(slot.is_ev_charging),
                if slot.is_occupied { "Occupied" } else { "Free" },
                action
            ));
        }
        body.push_str("</table>\n");
    }

    Html(layout("Parking Slots", &body))
}

pub fn add_slot_page(notice: Option<&Notice>) -> Html<String> {
    let body = format!(
        "<h1>Add Slot</h1>\n{}<form method=\"post\" action=\"/add\">\n\
         <label>Slot number <input type=\"number\" name=\"slotNo\" min=\"1\" required></label>\n\
         <label><input type=\"checkbox\" name=\"isCovered\"> Covered</label>\n\
         <label><input type=\"checkbox\" name=\"isEVCharging\"> EV charging</label>\n\
         <button type=\"submit\">Add slot</button>\n</form>\n",
        notice.map(Notice::render).unwrap_or_default()
    );
    Html(layout("Add Slot", &body))
}

pub fn park_page(notice: Option<&Notice>) -> Html<String> {
    let body = format!(
        "<h1>Park Vehicle</h1>\n{}<form method=\"post\" action=\"/park\">\n\
         <label><input type=\"checkbox\" name=\"needsEV\"> Needs EV charging</label>\n\
         <label><input type=\"checkbox\" name=\"needsCover\"> Needs cover</label>\n\
         <button type=\"submit\">Park</button>\n</form>\n",
        notice.map(Notice::render).unwrap_or_default()
    );
    Html(layout("Park Vehicle", &body))
}

pub fn error_page(message: &str) -> Html<String> {
    let body = format!(
        "<h1>Something went wrong</h1>\n{}",
        Notice::Error(message.to_string()).render()
    );
    Html(layout("Error", &body))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Slots</a> | <a href=\"/add\">Add slot</a> | <a href=\"/park\">Park vehicle</a></nav>\n\
         {}</body>\n</html>\n",
        escape(title),
        body
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
