use std::cmp::Ordering;

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;

/// Generic search/filter/sort over any serializable record shape. Every
/// list surface composes these the same way: `filter_data` narrows, then
/// `sort_data` orders the survivors.

fn record_of<T: Serialize>(item: &T) -> Value {
    serde_json::to_value(item).unwrap_or(Value::Null)
}

fn field<'v>(record: &'v Value, name: &str) -> Option<&'v Value> {
    record.get(name)
}

/// String form of a field the way a template would render it: strings
/// verbatim, everything else via its JSON representation.
fn stringify(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::from("null"),
    }
}

fn field_str<'v>(record: &'v Value, name: &str) -> Option<&'v str> {
    field(record, name).and_then(Value::as_str)
}

/// First of `deadline`, `end_date`, `start_date` that is a non-empty
/// string; the date the "this-week" filter judges a record by.
fn due_date<'v>(record: &'v Value) -> Option<&'v str> {
    ["deadline", "end_date", "start_date"]
        .into_iter()
        .find_map(|name| field_str(record, name).filter(|s| !s.is_empty()))
}

/// Whether a `YYYY-MM-DD` date falls inside the current local week,
/// Sunday through Saturday inclusive. Unparseable input is never "this
/// week".
pub fn is_this_week(date_str: &str) -> bool {
    let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") else {
        return false;
    };
    let today = Local::now().date_naive();
    let start_of_week = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let end_of_week = start_of_week + Duration::days(6);
    date >= start_of_week && date <= end_of_week
}

/// Search then category filter, AND-composed, input order preserved.
///
/// A non-empty `search_term` keeps records where any of `search_fields`,
/// stringified and lowercased, contains the lowercased term. A `filter_by`
/// other than `"all"` then keeps records whose `status` or `type` equals
/// the token exactly, or, for `"this-week"`, whose due date falls in the
/// current week.
pub fn filter_data<T: Serialize + Clone>(
    data: &[T],
    search_term: &str,
    filter_by: &str,
    search_fields: &[&str],
) -> Vec<T> {
    let needle = search_term.to_lowercase();

    data.iter()
        .filter(|item| {
            let record = record_of(item);

            if !search_term.is_empty() {
                let hit = search_fields.iter().any(|&name| {
                    stringify(field(&record, name))
                        .to_lowercase()
                        .contains(&needle)
                });
                if !hit {
                    return false;
                }
            }

            match filter_by {
                "" | "all" => true,
                "this-week" => due_date(&record).is_some_and(is_this_week),
                token => {
                    field_str(&record, "status") == Some(token)
                        || field_str(&record, "type") == Some(token)
                }
            }
        })
        .cloned()
        .collect()
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        // ISO dates are strings here, so this branch also orders them
        // chronologically.
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        _ => stringify(Some(a)).cmp(&stringify(Some(b))),
    }
}

/// Ascending stable sort by the named field, on a copy of the input.
pub fn sort_data<T: Serialize + Clone>(data: &[T], sort_by: &str) -> Vec<T> {
    let mut keyed: Vec<(Value, T)> = data
        .iter()
        .map(|item| {
            let key = field(&record_of(item), sort_by)
                .cloned()
                .unwrap_or(Value::Null);
            (key, item.clone())
        })
        .collect();
    keyed.sort_by(|a, b| compare_values(&a.0, &b.0));
    keyed.into_iter().map(|(_, item)| item).collect()
}
