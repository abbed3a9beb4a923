//! Operation records consumed by the benchmark harness.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One harness operation, serialised with an `op` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Op {
    Find {
        query: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        skip: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        limit: Option<u32>,
    },
    Insert {
        doc: Value,
    },
    Update {
        query: Value,
        update: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        multi: Option<bool>,
    },
    Remove {
        query: Value,
    },
    Command {
        ns: String,
        command: Value,
    },
    /// Binds a harness variable for the following operations.
    Let {
        target: String,
        value: Value,
    },
}

impl Op {
    /// A find with skip/limit set only when positive.
    pub fn find(query: Value, skip: u32, limit: u32) -> Self {
        Op::Find {
            query,
            skip: (skip > 0).then_some(skip),
            limit: (limit > 0).then_some(limit),
        }
    }

    /// Tag name as written in the `op` field.
    pub fn name(&self) -> &'static str {
        match self {
            Op::Find { .. } => "find",
            Op::Insert { .. } => "insert",
            Op::Update { .. } => "update",
            Op::Remove { .. } => "remove",
            Op::Command { .. } => "command",
            Op::Let { .. } => "let",
        }
    }
}
