//! Search request builder for the learn search endpoint.

use common::search_query::{OfferedByType, PriceType, QueryParams, ResourceType};
use serde_json::{Value, json};

// field boosts follow the discussions frontend search configuration
pub const COURSE_QUERY_FIELDS: &[&str] = &[
    "title.english^3",
    "short_description.english^2",
    "full_description.english",
    "topics",
    "platform",
    "course_id",
    "coursenum^5",
    "offered_by",
];

pub const PROGRAM_QUERY_FIELDS: &[&str] = &[
    "title.english^3",
    "short_description.english^2",
    "topics",
    "platform",
];

pub const VIDEO_QUERY_FIELDS: &[&str] = &[
    "title.english^3",
    "short_description.english^2",
    "full_description.english",
    "transcript.english^2",
    "topics",
    "platform",
    "video_id",
    "offered_by",
];

pub const BOOTCAMP_QUERY_FIELDS: &[&str] = &[
    "title.english^3",
    "short_description.english^2",
    "full_description.english",
    "course_id",
    "coursenum^5",
    "offered_by",
];

pub const LIST_QUERY_FIELDS: &[&str] = &["title.english", "short_description.english", "topics"];

pub const RESOURCE_QUERY_NESTED_FIELDS: &[&str] = &[
    "runs.year",
    "runs.semester",
    "runs.level",
    "runs.instructors^5",
];

/// Price separating free runs from paid ones. Both filters include it.
pub const PRICE_THRESHOLD: f64 = 0.01;

pub fn query_fields(resource_type: ResourceType) -> &'static [&'static str] {
    match resource_type {
        ResourceType::Course => COURSE_QUERY_FIELDS,
        ResourceType::Program => PROGRAM_QUERY_FIELDS,
        ResourceType::Bootcamp => BOOTCAMP_QUERY_FIELDS,
        ResourceType::Video => VIDEO_QUERY_FIELDS,
        ResourceType::Userlist | ResourceType::LearningPath => LIST_QUERY_FIELDS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatchMode {
    /// Quoted text: exact phrase matching.
    QueryString,
    /// Free text: best-fields fuzzy matching.
    MultiMatch,
}

impl TextMatchMode {
    pub fn for_text(text: &str) -> Self {
        if text.contains('"') {
            TextMatchMode::QueryString
        } else {
            TextMatchMode::MultiMatch
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            TextMatchMode::QueryString => "query_string",
            TextMatchMode::MultiMatch => "multi_match",
        }
    }
}

fn text_clause(mode: TextMatchMode, text: &str, fields: &[&str]) -> Value {
    let mut clause = serde_json::Map::new();
    clause.insert(mode.key().to_string(), json!({ "query": text, "fields": fields }));
    Value::Object(clause)
}

fn price_clause(price: PriceType) -> Value {
    let range = match price {
        PriceType::Paid => json!({ "from": PRICE_THRESHOLD }),
        PriceType::Free => json!({ "to": PRICE_THRESHOLD }),
    };
    json!({
        "nested": {
            "path": "runs.prices",
            "query": {
                "range": {
                    "runs.prices.price": range
                }
            }
        }
    })
}

fn offered_by_clause(offered_by: OfferedByType) -> Value {
    json!({ "term": { "offered_by": offered_by.as_str() } })
}

/// Builds the bool query fragment matching documents of one resource type.
pub fn generate_type_query(params: &QueryParams, resource_type: ResourceType) -> Value {
    let mode = TextMatchMode::for_text(&params.text);

    let mut text_query = vec![text_clause(mode, &params.text, query_fields(resource_type))];

    if resource_type.has_runs() {
        text_query.push(json!({
            "nested": {
                "path": "runs",
                "query": text_clause(mode, &params.text, RESOURCE_QUERY_NESTED_FIELDS)
            }
        }));
    }

    let mut must = vec![
        json!({ "term": { "object_type": resource_type.as_str() } }),
        json!({ "bool": { "should": text_query.clone() } }),
    ];

    if !params.price.is_empty() && resource_type.has_runs() {
        let should = params.price.iter().copied().map(price_clause).collect::<Vec<_>>();
        must.push(json!({ "bool": { "should": should } }));
    }

    if !params.offered_by.is_empty() {
        let should = params.offered_by.iter().copied().map(offered_by_clause).collect::<Vec<_>>();
        must.push(json!({ "bool": { "should": should } }));
    }

    // the text clauses are repeated outside the filter so they still score
    json!({
        "bool": {
            "filter": {
                "bool": {
                    "must": must
                }
            },
            "should": text_query
        }
    })
}

/// Builds the complete search request for one result page.
pub fn generate_learn_query(params: &QueryParams, offset: u64, limit: u64) -> Value {
    let should = params
        .types
        .iter()
        .map(|resource_type| generate_type_query(params, *resource_type))
        .collect::<Vec<_>>();
    json!({
        "aggs": aggregations(),
        "query": {
            "bool": {
                "should": should
            }
        },
        "from": offset,
        "size": limit,
    })
}

/// Facet buckets requested with every search.
pub fn aggregations() -> Value {
    json!({
        "availability": {
            "aggs": {
                "runs": {
                    "aggs": {
                        "courses": {
                            "reverse_nested": {}
                        }
                    },
                    "date_range": {
                        "field": "runs.best_start_date",
                        "keyed": false,
                        "missing": "1970-01-01T00:00:00Z",
                        "ranges": [
                            { "key": "availableNow", "to": "now" },
                            { "from": "now", "key": "nextWeek", "to": "now+7d" },
                            { "from": "now", "key": "nextMonth", "to": "now+1M" },
                            { "from": "now", "key": "next3Months", "to": "now+3M" },
                            { "from": "now", "key": "next6Months", "to": "now+6M" },
                            { "from": "now", "key": "nextYear", "to": "now+12M" }
                        ]
                    }
                }
            },
            "nested": {
                "path": "runs"
            }
        },
        "cost": {
            "aggs": {
                "prices": {
                    "aggs": {
                        "courses": {
                            "reverse_nested": {}
                        }
                    },
                    "range": {
                        "field": "runs.prices.price",
                        "keyed": false,
                        "missing": 0,
                        "ranges": [
                            { "key": "free", "to": PRICE_THRESHOLD },
                            { "from": PRICE_THRESHOLD, "key": "paid" }
                        ]
                    }
                }
            },
            "nested": {
                "path": "runs.prices"
            }
        },
        "offered_by": {
            "terms": {
                "field": "offered_by",
                "size": 10000
            }
        },
        "topics": {
            "terms": {
                "field": "topics",
                "size": 10000
            }
        },
        "type": {
            "terms": {
                "field": "object_type.keyword",
                "size": 10000
            }
        }
    })
}
