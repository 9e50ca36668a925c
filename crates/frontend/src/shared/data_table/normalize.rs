//! Response-shape adapters. Each list endpoint declares which envelope it
//! answers with; anything else is a decode error naming the adapter.

use contracts::shared::list_query::{ListQuery, SortDirection};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::error::TableError;

const TOTAL_KEYS: [&str; 3] = ["total", "total_count", "totalCount"];
const META_KEYS: [&str; 9] = [
    "data",
    "total",
    "total_count",
    "totalCount",
    "current_page",
    "currentPage",
    "per_page",
    "perPage",
    "last_page",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// `{ data: { data: [...], current_page, per_page, total, last_page }, filters?: {...} }`
    NestedData,
    /// `{ filters: { data: [...], total, ..., <option lists> } }`
    FiltersData,
    /// Bare array, paginated on the client.
    PlainList,
}

impl Envelope {
    fn name(&self) -> &'static str {
        match self {
            Envelope::NestedData => "data.data",
            Envelope::FiltersData => "filters.data",
            Envelope::PlainList => "plain list",
        }
    }
}

/// One normalized page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub rows: Vec<R>,
    pub total: u64,
    /// Server-driven filter options (campaigns, stages, ...).
    pub options: BTreeMap<String, Vec<String>>,
}

pub fn normalize<R: DeserializeOwned>(
    envelope: Envelope,
    body: Value,
    query: &ListQuery,
) -> Result<ListPage<R>, TableError> {
    match envelope {
        Envelope::NestedData => {
            let page = body
                .get("data")
                .and_then(Value::as_object)
                .ok_or_else(|| shape_error(envelope))?;
            let options = body
                .get("filters")
                .and_then(Value::as_object)
                .map(option_lists)
                .unwrap_or_default();
            paged(envelope, page, options)
        }
        Envelope::FiltersData => {
            let page = body
                .get("filters")
                .and_then(Value::as_object)
                .ok_or_else(|| shape_error(envelope))?;
            paged(envelope, page, option_lists(page))
        }
        Envelope::PlainList => {
            let items = body.as_array().ok_or_else(|| shape_error(envelope))?;
            let mut items: Vec<&Value> = items
                .iter()
                .filter(|item| matches_search(item, &query.search))
                .collect();
            if let Some(field) = &query.sort_field {
                items.sort_by(|a, b| compare_field(a, b, field));
                if query.sort_direction == SortDirection::Desc {
                    items.reverse();
                }
            }
            let total = items.len() as u64;
            let per_page = query.per_page.max(1) as usize;
            let start = (query.current_page.max(1) as usize - 1) * per_page;
            let rows = items
                .into_iter()
                .skip(start)
                .take(per_page)
                .map(|item| decode_row(item.clone()))
                .collect::<Result<Vec<R>, _>>()?;
            Ok(ListPage {
                rows,
                total,
                options: BTreeMap::new(),
            })
        }
    }
}

fn paged<R: DeserializeOwned>(
    envelope: Envelope,
    page: &Map<String, Value>,
    options: BTreeMap<String, Vec<String>>,
) -> Result<ListPage<R>, TableError> {
    let items = page
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| shape_error(envelope))?;
    let rows = items
        .iter()
        .map(|item| decode_row(item.clone()))
        .collect::<Result<Vec<R>, _>>()?;
    let total = first_number(page, &TOTAL_KEYS).unwrap_or(rows.len() as u64);
    Ok(ListPage {
        rows,
        total,
        options,
    })
}

/// Client-side search for unpaged lists: any string or number field
/// containing the text, case-insensitively.
fn matches_search(item: &Value, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.as_object().is_some_and(|obj| {
        obj.values().any(|v| match v {
            Value::String(s) => s.to_lowercase().contains(&needle),
            Value::Number(n) => n.to_string().contains(&needle),
            _ => false,
        })
    })
}

/// Numbers compare numerically, everything else as lowercase text. Missing
/// values sort first.
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (x, y) => sort_text(x).cmp(&sort_text(y)),
    }
}

fn sort_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string(),
    }
}

fn decode_row<R: DeserializeOwned>(item: Value) -> Result<R, TableError> {
    serde_json::from_value(item).map_err(|e| TableError::Decode(format!("row: {}", e)))
}

fn shape_error(envelope: Envelope) -> TableError {
    TableError::Decode(format!("expected a `{}` envelope", envelope.name()))
}

fn first_number(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| match obj.get(*k)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Arrays of strings, numbers or `{value|name|label}` objects, keyed by their
/// field name. Pagination keys and `data` are skipped.
fn option_lists(obj: &Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    obj.iter()
        .filter(|(k, _)| !META_KEYS.contains(&k.as_str()))
        .filter_map(|(k, v)| {
            let items = v.as_array()?;
            let values = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    Value::Object(o) => ["value", "name", "label"]
                        .iter()
                        .find_map(|f| o.get(*f).and_then(Value::as_str))
                        .map(str::to_string),
                    _ => None,
                })
                .collect::<Vec<_>>();
            Some((k.clone(), values))
        })
        .collect()
}

/// Replaces every server-driven list in `cache` with the static list for that
/// key (if any) followed by the incoming values not already present. Keys the
/// server did not send are left alone.
pub fn merge_options(
    static_options: &BTreeMap<String, Vec<String>>,
    cache: &mut BTreeMap<String, Vec<String>>,
    incoming: BTreeMap<String, Vec<String>>,
) {
    for (key, values) in incoming {
        let mut merged = static_options.get(&key).cloned().unwrap_or_default();
        for v in values {
            if !merged.contains(&v) {
                merged.push(v);
            }
        }
        cache.insert(key, merged);
    }
}
