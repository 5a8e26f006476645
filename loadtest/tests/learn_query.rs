use common::search_query::{OfferedByType, PriceType, QueryParams, ResourceType};
use loadtest::learn::search_query::{generate_learn_query, generate_type_query};
use serde_json::{Value, json};

fn params(text: &str, types: &[ResourceType], offered_by: &[OfferedByType], price: &[PriceType]) -> QueryParams {
    QueryParams::new(text, types.iter().copied(), offered_by.iter().copied(), price.iter().copied())
}

fn collect_nested_paths(value: &Value, paths: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            if let Some(path) = map.get("nested").and_then(|nested| nested.get("path")).and_then(Value::as_str) {
                paths.push(path.to_string());
            }
            map.values().for_each(|v| collect_nested_paths(v, paths));
        }
        Value::Array(items) => items.iter().for_each(|v| collect_nested_paths(v, paths)),
        _ => {}
    }
}

fn nested_paths(value: &Value) -> Vec<String> {
    let mut paths = vec![];
    collect_nested_paths(value, &mut paths);
    paths
}

fn price_ranges(fragment: &Value) -> Vec<Value> {
    let mut ranges = vec![];
    for clause in fragment["bool"]["filter"]["bool"]["must"].as_array().unwrap() {
        for inner in clause["bool"]["should"].as_array().into_iter().flatten() {
            if inner["nested"]["path"] == "runs.prices" {
                ranges.push(inner["nested"]["query"]["range"]["runs.prices.price"].clone());
            }
        }
    }
    ranges
}

#[test]
fn no_types_means_no_should_clauses() {
    let query = generate_learn_query(&params("Albedo", &[], &OfferedByType::ALL, &PriceType::ALL), 0, 6);
    assert_eq!(query["query"]["bool"]["should"], json!([]));
}

#[test]
fn only_types_with_runs_search_the_runs() {
    for resource_type in ResourceType::ALL {
        let fragment = generate_type_query(&params("Kinetic", &[resource_type], &[], &[]), resource_type);
        let runs = nested_paths(&fragment).into_iter().filter(|path| path == "runs").count();
        // once in the filter's text clauses and once in the scoring clauses
        let expected = if resource_type.has_runs() { 2 } else { 0 };
        assert_eq!(runs, expected, "{resource_type:?}");
        assert_eq!(fragment["bool"]["should"].as_array().unwrap().len(), 1 + expected / 2);
    }
}

#[test]
fn type_queries_are_deterministic() {
    let p = params(
        "Machine Learning",
        &[ResourceType::Video, ResourceType::Course, ResourceType::Program],
        &[OfferedByType::Xpro, OfferedByType::Mitx],
        &[PriceType::Paid, PriceType::Free],
    );
    for resource_type in ResourceType::ALL {
        let first = serde_json::to_string(&generate_type_query(&p, resource_type)).unwrap();
        let second = serde_json::to_string(&generate_type_query(&p, resource_type)).unwrap();
        assert_eq!(first, second);
    }
    let shuffled = params(
        "Machine Learning",
        &[ResourceType::Program, ResourceType::Course, ResourceType::Video],
        &[OfferedByType::Mitx, OfferedByType::Xpro],
        &[PriceType::Free, PriceType::Paid],
    );
    assert_eq!(
        serde_json::to_string(&generate_learn_query(&p, 6, 6)).unwrap(),
        serde_json::to_string(&generate_learn_query(&shuffled, 6, 6)).unwrap(),
    );
}

#[test]
fn paid_and_free_price_ranges() {
    let paid = generate_type_query(&params("", &[ResourceType::Course], &[], &[PriceType::Paid]), ResourceType::Course);
    assert_eq!(price_ranges(&paid), [json!({"from": 0.01})]);

    let free = generate_type_query(&params("", &[ResourceType::Bootcamp], &[], &[PriceType::Free]), ResourceType::Bootcamp);
    assert_eq!(price_ranges(&free), [json!({"to": 0.01})]);

    let video = generate_type_query(&params("", &[ResourceType::Video], &[], &[PriceType::Free]), ResourceType::Video);
    assert!(price_ranges(&video).is_empty());
}

#[test]
fn paging_and_aggregations() {
    let query = generate_learn_query(&params("", &[ResourceType::Userlist], &[], &[]), 12, 6);
    assert_eq!(query["from"], 12);
    assert_eq!(query["size"], 6);
    let mut keys = query["aggs"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    keys.sort();
    assert_eq!(keys, ["availability", "cost", "offered_by", "topics", "type"]);

    let other = generate_learn_query(&params("Albedo", &ResourceType::ALL, &OfferedByType::ALL, &PriceType::ALL), 0, 6);
    assert_eq!(query["aggs"], other["aggs"]);
}

#[test]
fn quoted_course_search_for_free_ocw() {
    let p = params("\"Quantum Mechanics\"", &[ResourceType::Course], &[OfferedByType::Ocw], &[PriceType::Free]);
    let query = generate_learn_query(&p, 0, 6);
    let fragment = &query["query"]["bool"]["should"][0];

    let text_clauses = fragment["bool"]["should"].as_array().unwrap();
    assert_eq!(text_clauses[0]["query_string"]["query"], "\"Quantum Mechanics\"");
    assert!(text_clauses[0].get("multi_match").is_none());
    assert_eq!(text_clauses[1]["nested"]["query"]["query_string"]["query"], "\"Quantum Mechanics\"");

    let must = fragment["bool"]["filter"]["bool"]["must"].as_array().unwrap();
    assert_eq!(must[0], json!({"term": {"object_type": "course"}}));
    assert!(must.contains(&json!({"bool": {"should": [{"term": {"offered_by": "OCW"}}]}})));
    assert_eq!(price_ranges(fragment), [json!({"to": 0.01})]);
}
