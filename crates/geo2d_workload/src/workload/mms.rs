//! Deep-document update suite.
//!
//! Every test resets the collection to one wide document
//! (`h.<0..24>.<0..60>.{n,t,v}`) and increments shallow or deeply nested
//! fields, with and without a shared path prefix.
use serde_json::{json, Map, Value};

use crate::workload::setup::SetupStep;
use crate::workload::{Op, TestCase, Workload};

const OUTER_KEYS: usize = 24;
const INNER_KEYS: usize = 60;

/// `(test name, $inc document)` for each test, in suite order.
const INCREMENTS: [(&str, &[&str]); 7] = [
    ("Update.MmsIncShallow1", &["a"]),
    ("Update.MmsIncShallow2", &["a", "z"]),
    ("Update.MmsIncDeep1", &["h.23.59.n"]),
    ("Update.MmsIncDeepSharedPath2", &["h.23.59.n", "h.23.59.t"]),
    (
        "Update.MmsIncDeepSharedPath3",
        &["h.23.59.n", "h.23.59.t", "h.23.59.v"],
    ),
    ("Update.MmsIncDeepDistinctPath2", &["h.22.59.n", "h.23.59.t"]),
    (
        "Update.MmsIncDeepDistinctPath3",
        &["h.21.59.n", "h.22.59.t", "h.23.59.v"],
    ),
];

/// The document every test starts from.
pub fn base_document() -> Value {
    let mut outer = Map::new();
    for i in 0..OUTER_KEYS {
        let mut inner = Map::new();
        for j in 0..INNER_KEYS {
            inner.insert(j.to_string(), json!({ "n": 0, "t": 0, "v": 0 }));
        }
        outer.insert(i.to_string(), Value::Object(inner));
    }
    json!({ "_id": 0, "a": 0, "h": outer, "z": 0 })
}

pub fn mms_update_workload() -> Workload {
    let setup = [
        SetupStep::DropCollection,
        SetupStep::Insert {
            doc: base_document(),
        },
    ];

    let mut workload = Workload::new();
    for (name, fields) in INCREMENTS {
        let inc: Map<String, Value> = fields.iter().map(|f| (f.to_string(), json!(1))).collect();
        workload.push(
            TestCase::new(name)
                .with_steps(setup.clone())
                .with_ops(vec![Op::Update {
                    query: json!({ "_id": 0 }),
                    update: json!({ "$inc": inc }),
                    multi: None,
                }]),
        );
    }
    workload
}
