//! Interactive shell over a small in-memory `IndexedSet`, for manually
//! poking at the filter/plan/optimize pipeline. Grounded on helium's
//! `src/bin/dbcli.rs`: same `rustyline` read loop and `.`-prefixed meta
//! commands, minus the SQL statement buffering (a condition here is always
//! one line).

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use sieve::index::HashIndex;
use sieve::value::Value;
use sieve::IndexedSet;
use std::collections::HashMap;
use std::rc::Rc;

struct Person {
    name: &'static str,
    age: i64,
    city: &'static str,
}

fn demo_set() -> IndexedSet<Person> {
    let mut attrs: HashMap<String, Box<dyn Fn(&Person) -> Value>> = HashMap::new();
    attrs.insert("name".into(), Box::new(|p: &Person| Value::Str(p.name.to_string())));
    attrs.insert("age".into(), Box::new(|p: &Person| Value::Int(p.age)));
    attrs.insert("city".into(), Box::new(|p: &Person| Value::Str(p.city.to_string())));

    let mut set = IndexedSet::new(attrs);
    set.register_index(Rc::new(HashIndex::new("city")));

    for (name, age, city) in [
        ("alice", 30, "nyc"),
        ("bob", 25, "sf"),
        ("carol", 35, "nyc"),
        ("dave", 28, "sf"),
        ("erin", 41, "nyc"),
    ] {
        set.add(Person { name, age, city });
    }
    set
}

fn main() -> Result<()> {
    let set = demo_set();

    println!("sieve filter shell");
    println!("Type a condition, e.g. `age > 28 AND city = \"nyc\"`.");
    println!("Commands: .plan <condition>  .explain <condition>  .exit");
    println!("------------------------------------------------------");

    let mut rl = DefaultEditor::new()?;

    Ok(loop {
        match rl.readline("sieve> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line).ok();

                if line == ".exit" || line == ".quit" {
                    break;
                }
                if let Some(condition_str) = line.strip_prefix(".plan ") {
                    show_plan(&set, condition_str, false);
                    continue;
                }
                if let Some(condition_str) = line.strip_prefix(".explain ") {
                    show_plan(&set, condition_str, true);
                    continue;
                }

                match set.filter(line) {
                    Ok(results) => {
                        for person in results {
                            println!("  {} ({}, {})", person.name, person.age, person.city);
                        }
                    }
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("read error: {err}");
                break;
            }
        }
    })
}

fn show_plan(set: &IndexedSet<Person>, condition_str: &str, optimized: bool) {
    let condition = match sieve::parse::parse(condition_str) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("error: {err}");
            return;
        }
    };
    let plan = set.plan(&condition);
    let plan = if optimized { set.optimize(plan) } else { plan };
    println!("{plan}");
}
