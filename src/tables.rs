//! Builders for the two fixed tables of the lease annexes: the room
//! inventory and the apartment condition survey.
//!
//! These produce literal `<table>` markup from already-structured arrays and
//! are spliced into named slots of the rendered document, outside the
//! directive system.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;

use crate::context::JsonRender;
use crate::formatters::format_rub_short;
use crate::utils::escape_html;

lazy_static! {
    static ref SLOT_RE: Regex = Regex::new(r"<!--\s*slot:([A-Za-z0-9_-]+)\s*-->").unwrap();
}

fn rows(value: &Value) -> &[Value] {
    value.as_array().map(|a| a.as_slice()).unwrap_or(&[])
}

/// Escaped string form of one field of a row
fn cell(row: &Value, key: &str) -> String {
    escape_html(&row.get(key).map(JsonRender::render).unwrap_or_default())
}

/// Room inventory: a list of rooms, each with an `items` array of
/// name/condition/price/note entries. Prices render in the short `руб.` form.
pub fn inventory_table(rooms: &Value) -> String {
    let mut html = String::from(
        "<table class=\"doc-table\"><thead><tr>\
         <th>№</th><th>Наименование</th><th>Состояние</th><th>Стоимость</th><th>Примечание</th>\
         </tr></thead><tbody>",
    );

    let mut row_number = 0;
    for room in rows(rooms) {
        let room_name = cell(room, "name");
        if !room_name.is_empty() {
            html.push_str("<tr><td class=\"doc-table__room\" colspan=\"5\">");
            html.push_str(&room_name);
            html.push_str("</td></tr>");
        }
        for item in rows(room.get("items").unwrap_or(&Value::Null)) {
            row_number += 1;
            let price = room_price(item);
            html.push_str("<tr>");
            html.push_str(&format!("<td>{}</td>", row_number));
            html.push_str(&format!("<td>{}</td>", cell(item, "name")));
            html.push_str(&format!("<td>{}</td>", cell(item, "condition")));
            html.push_str(&format!("<td>{}</td>", price));
            html.push_str(&format!("<td>{}</td>", cell(item, "note")));
            html.push_str("</tr>");
        }
    }

    html.push_str("</tbody></table>");
    html
}

fn room_price(item: &Value) -> String {
    let raw = item.get("price").map(JsonRender::render).unwrap_or_default();
    if raw.is_empty() {
        return String::new();
    }
    escape_html(&format_rub_short(&raw))
}

/// Apartment condition survey: a list of rooms with six descriptive fields
pub fn condition_survey_table(rooms: &Value) -> String {
    let mut html = String::from(
        "<table class=\"doc-table\"><thead><tr>\
         <th>Помещение</th><th>Пол</th><th>Стены</th><th>Потолок</th>\
         <th>Двери</th><th>Окна</th><th>Состояние</th>\
         </tr></thead><tbody>",
    );

    for room in rows(rooms) {
        html.push_str("<tr>");
        for key in ["name", "floor", "walls", "ceiling", "doors", "windows", "condition"] {
            html.push_str(&format!("<td>{}</td>", cell(room, key)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table>");
    html
}

/// Splices an already-built HTML fragment into the named slot marker
/// (`<!-- slot:inventory -->`) of a rendered document. Other slots are left
/// untouched.
pub fn fill_slot(html: &str, slot: &str, fragment: &str) -> String {
    SLOT_RE
        .replace_all(html, |caps: &Captures| {
            if &caps[1] == slot {
                fragment.to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inventory_numbers_items_across_rooms() {
        let rooms = json!([
            {"name": "Кухня", "items": [
                {"name": "Холодильник", "condition": "хорошее", "price": 25000, "note": ""}
            ]},
            {"name": "Спальня", "items": [
                {"name": "Кровать", "condition": "новая", "price": 40000, "note": "с матрасом"}
            ]}
        ]);
        let html = inventory_table(&rooms);
        assert!(html.contains("<td class=\"doc-table__room\" colspan=\"5\">Кухня</td>"));
        assert!(html.contains("<td>1</td><td>Холодильник</td>"));
        assert!(html.contains("<td>2</td><td>Кровать</td>"));
        assert!(html.contains("<td>25 000 руб.</td>"));
        assert!(html.contains("<td>40 000 руб.</td>"));
    }

    #[test]
    fn inventory_escapes_cell_values() {
        let rooms = json!([
            {"name": "Зал <script>", "items": [
                {"name": "Стол & стул", "condition": "б/у", "price": "n/a", "note": ""}
            ]}
        ]);
        let html = inventory_table(&rooms);
        assert!(html.contains("Зал &lt;script&gt;"));
        assert!(html.contains("Стол &amp; стул"));
        assert!(html.contains("б&#x2F;у"));
        // unparseable price passes through, escaped
        assert!(html.contains("<td>n&#x2F;a</td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn inventory_of_nothing_is_an_empty_table() {
        let html = inventory_table(&json!([]));
        assert!(html.starts_with("<table"));
        assert!(html.contains("<tbody></tbody>"));
        // a non-array degrades to the same empty table
        assert_eq!(inventory_table(&json!("nope")), html);
    }

    #[test]
    fn condition_survey_lists_all_fields() {
        let rooms = json!([
            {"name": "Кухня", "floor": "ламинат", "walls": "обои", "ceiling": "побелка",
             "doors": "деревянные", "windows": "ПВХ", "condition": "хорошее"}
        ]);
        let html = condition_survey_table(&rooms);
        assert!(html.contains(
            "<tr><td>Кухня</td><td>ламинат</td><td>обои</td><td>побелка</td>\
             <td>деревянные</td><td>ПВХ</td><td>хорошее</td></tr>"
        ));
    }

    #[test]
    fn fills_only_the_named_slot() {
        let html = "<h2>Опись</h2><!-- slot:inventory --><h2>Состояние</h2><!--slot:survey-->";
        let out = fill_slot(html, "inventory", "<table>X</table>");
        assert_eq!(out, "<h2>Опись</h2><table>X</table><h2>Состояние</h2><!--slot:survey-->");
        let out = fill_slot(&out, "survey", "<table>Y</table>");
        assert_eq!(out, "<h2>Опись</h2><table>X</table><h2>Состояние</h2><table>Y</table>");
    }
}
