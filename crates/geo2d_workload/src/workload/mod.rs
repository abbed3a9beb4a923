//! Benchmark workload descriptors.
//!
//! A [`Workload`] is an ordered list of [`TestCase`]s. Each test pairs a
//! declarative `pre` phase ([`SetupStep`]s run against a [`Collection`]) with
//! the [`Op`] list the harness replays. Suites:
//! - [`geo2d::geo2d_index_workload`]: find/update/remove/insert/map-reduce
//!   over generated shapes
//! - [`mms::mms_update_workload`]: deep-document `$inc` updates
use serde::Serialize;

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;

pub mod collection;
pub mod geo2d;
pub mod mms;
pub mod op;
pub mod query;
pub mod setup;
pub mod tokens;

pub use collection::{Collection, CollectionCall, RecordingCollection};
pub use op::Op;
pub use setup::{Env, PlaceType, Population, SetupStep};

/// A named test: setup steps plus the operations to replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub pre: Vec<SetupStep>,
    pub ops: Vec<Op>,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pre: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn with_step(mut self, step: SetupStep) -> Self {
        self.pre.push(step);
        self
    }

    pub fn with_steps(mut self, steps: impl IntoIterator<Item = SetupStep>) -> Self {
        self.pre.extend(steps);
        self
    }

    pub fn with_ops(mut self, ops: Vec<Op>) -> Self {
        self.ops.extend(ops);
        self
    }

    /// Runs the `pre` steps in order, stopping at the first collection error.
    ///
    /// Population steps draw from `rng`; pass the generator the workload was
    /// built with to reproduce fixture data.
    pub fn run_pre<C, R>(
        &self,
        collection: &mut C,
        env: &Env,
        config: &GeoConfig,
        rng: &mut R,
    ) -> Result<()>
    where
        C: Collection + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.pre
            .iter()
            .try_for_each(|step| step.run(collection, env, config, rng))
    }
}

/// An ordered suite of tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workload {
    pub tests: Vec<TestCase>,
}

impl Workload {
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }

    pub fn push(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Appends all tests of `other`.
    pub fn extend(&mut self, other: Workload) {
        self.tests.extend(other.tests);
    }

    pub fn get(&self, name: &str) -> Option<&TestCase> {
        self.tests.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|t| t.name.as_str())
    }

    /// Total operations across all tests.
    pub fn op_count(&self) -> usize {
        self.tests.iter().map(|t| t.ops.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
