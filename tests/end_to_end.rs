//! Full parse → plan → optimize → execute pipeline, exercised through
//! [`sieve::IndexedSet`] the way a caller actually uses the crate.

use sieve::condition::attr;
use sieve::index::{HashIndex, SortedIndex};
use sieve::value::Value;
use sieve::IndexedSet;
use std::collections::HashMap;
use std::rc::Rc;

struct Employee {
    name: &'static str,
    age: i64,
    department: &'static str,
    tags: Vec<&'static str>,
}

fn build_set() -> IndexedSet<Employee> {
    let mut attrs: HashMap<String, Box<dyn Fn(&Employee) -> Value>> = HashMap::new();
    attrs.insert(
        "name".into(),
        Box::new(|e: &Employee| Value::Str(e.name.to_string())),
    );
    attrs.insert("age".into(), Box::new(|e: &Employee| Value::Int(e.age)));
    attrs.insert(
        "department".into(),
        Box::new(|e: &Employee| Value::Str(e.department.to_string())),
    );
    attrs.insert(
        "tags".into(),
        Box::new(|e: &Employee| {
            Value::List(e.tags.iter().map(|t| Value::Str((*t).to_string())).collect())
        }),
    );

    let mut set = IndexedSet::new(attrs);
    set.register_index(Rc::new(HashIndex::new("department")));
    set.register_index(Rc::new(SortedIndex::new("age")));
    set.register_index(Rc::new(sieve::index::InvertedIndex::new("tags")));

    for (name, age, department, tags) in [
        ("alice", 30, "eng", vec!["rust", "backend"]),
        ("bob", 25, "eng", vec!["frontend"]),
        ("carol", 41, "sales", vec!["backend"]),
        ("dave", 35, "eng", vec!["rust"]),
        ("erin", 22, "sales", vec!["frontend", "rust"]),
    ] {
        set.add(Employee { name, age, department, tags });
    }
    set
}

#[test]
fn hash_index_serves_an_equality_filter() {
    let set = build_set();
    let found = set.filter("department = \"eng\"").unwrap();
    assert_eq!(found.len(), 3);
}

#[test]
fn sorted_index_serves_a_combined_range() {
    let set = build_set();
    let found = set.filter("age > 25 AND age <= 35").unwrap();
    let mut names: Vec<&str> = found.iter().map(|e| e.name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["alice", "dave"]);
}

#[test]
fn empty_range_intersection_yields_nothing() {
    let set = build_set();
    let found = set.filter("age > 40 AND age < 30").unwrap();
    assert!(found.is_empty());
}

#[test]
fn in_expands_to_a_union_of_lookups_on_a_hash_index() {
    let set = build_set();
    let found = set.filter("department IN (\"eng\", \"sales\")").unwrap();
    assert_eq!(found.len(), 5);
}

#[test]
fn inverted_index_serves_membership_in_a_collection_attribute() {
    let set = build_set();
    let found = set.filter("\"rust\" IN tags").unwrap();
    let mut names: Vec<&str> = found.iter().map(|e| e.name).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["alice", "dave", "erin"]);
}

#[test]
fn fluent_builder_and_parsed_string_agree() {
    let set = build_set();
    let via_string = set.filter("department = \"eng\" AND age > 28").unwrap();
    let via_builder = set.filter_condition(&attr("department").eq("eng").and_(attr("age").gt(28))).unwrap();
    let mut a: Vec<&str> = via_string.iter().map(|e| e.name).collect();
    let mut b: Vec<&str> = via_builder.iter().map(|e| e.name).collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
    assert_eq!(a, vec!["alice", "dave"]);
}

#[test]
fn unindexed_attribute_still_falls_back_to_a_linear_scan() {
    let set = build_set();
    let found = set.filter("name = \"bob\"").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "bob");
}

#[test]
fn discard_removes_an_object_from_every_registered_index() {
    let mut set = build_set();
    let handle = set.iter().find(|e| e.name == "alice").unwrap().clone();
    set.discard(&handle);
    assert_eq!(set.filter("department = \"eng\"").unwrap().len(), 2);
    assert_eq!(set.filter("age > 25 AND age <= 35").unwrap().len(), 1);
}
