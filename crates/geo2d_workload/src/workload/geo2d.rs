//! The 2D geospatial index suite.
//!
//! Tests are generated in a fixed order from one [`RandomSource`], so a given
//! seed always produces the same shapes in the same tests: find runs, then
//! map-reduce, insert, update runs and finally remove.
use serde_json::{json, Value};
use tracing::info;

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::shapes::{planar_position, ShapeKind};
use crate::workload::query::{geo_within, point_document};
use crate::workload::setup::{Population, SetupStep};
use crate::workload::{tokens, Op, TestCase, Workload};

/// Prefix shared by every test name in this suite.
pub const SUITE: &str = "Geo2DIndex";

/// Parameters of one find run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindRun {
    pub ops: usize,
    pub points: usize,
    pub skip: u32,
    pub limit: u32,
}

/// Parameters of one update run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateRun {
    pub ops: usize,
    pub points: usize,
    pub multi: bool,
}

pub const FIND_RUNS: [FindRun; 6] = [
    FindRun { ops: 100, points: 30, skip: 0, limit: 0 },
    FindRun { ops: 100, points: 1000, skip: 0, limit: 0 },
    FindRun { ops: 100, points: 30, skip: 15, limit: 0 },
    FindRun { ops: 100, points: 1000, skip: 500, limit: 0 },
    FindRun { ops: 100, points: 30, skip: 0, limit: 15 },
    FindRun { ops: 100, points: 1000, skip: 0, limit: 500 },
];

pub const UPDATE_RUNS: [UpdateRun; 2] = [
    UpdateRun { ops: 100, points: 30, multi: false },
    UpdateRun { ops: 100, points: 30, multi: true },
];

pub const MAP_REDUCE_OPS: usize = 100;
pub const MAP_REDUCE_POINTS: usize = 1000;
pub const INSERT_OPS: usize = 10_000;
pub const REMOVE_ROUNDS: usize = 1000;
pub const REMOVE_POINTS: usize = 30;

/// Emits one count per document type.
pub const MAP_FUNCTION: &str = "function () { emit(this.type, 1); }";
/// Sums the emitted counts.
pub const REDUCE_FUNCTION: &str = "function (type, count) { return Array.sum(count); }";

/// Builds the full suite. Fails only when a capped shape placement gives up.
pub fn geo2d_index_workload<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    rng: &mut R,
) -> Result<Workload> {
    let mut workload = Workload::new();

    for run in FIND_RUNS {
        for kind in ShapeKind::ALL {
            workload.push(find_test(config, run, kind, rng)?);
        }
    }
    for kind in ShapeKind::ALL {
        workload.push(map_reduce_test(config, kind, rng)?);
    }
    workload.push(insert_test(config, rng));
    for run in UPDATE_RUNS {
        for kind in ShapeKind::ALL {
            workload.push(update_test(config, run, kind, rng)?);
        }
    }
    for kind in ShapeKind::ALL {
        workload.push(remove_test(config, kind, rng)?);
    }

    info!(
        tests = workload.len(),
        ops = workload.op_count(),
        seed = config.seed,
        "assembled geo 2d index workload"
    );
    Ok(workload)
}

/// Query operator name used in test names.
fn operator_label(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::Box => "Box",
        ShapeKind::Hexagon => "Polygon",
        ShapeKind::Circle => "Center",
        ShapeKind::SphericalCircle => "CenterSphere",
    }
}

/// `<base><points>[Skip<n>][Limit<n>]`
pub fn find_test_name(base: &str, run: &FindRun) -> String {
    let mut name = format!("{base}{}", run.points);
    if run.skip > 0 {
        name.push_str(&format!("Skip{}", run.skip));
    }
    if run.limit > 0 {
        name.push_str(&format!("Limit{}", run.limit));
    }
    name
}

/// `<base>MultiTrue` or `<base>MultiFalse`.
pub fn update_test_name(base: &str, multi: bool) -> String {
    format!("{base}Multi{}", if multi { "True" } else { "False" })
}

fn shape_queries<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    kind: ShapeKind,
    points: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Value>> {
    (0..count)
        .map(|_| Ok(geo_within(&kind.try_generate(config, points, rng)?)))
        .collect()
}

fn find_test<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    run: FindRun,
    kind: ShapeKind,
    rng: &mut R,
) -> Result<TestCase> {
    let ops = shape_queries(config, kind, run.points, run.ops, rng)?
        .into_iter()
        .map(|query| Op::find(query, run.skip, run.limit))
        .collect();

    let base = format!("{SUITE}.FindGeoWithin{}Find", operator_label(kind));
    let pre = match kind {
        ShapeKind::Box => vec![
            SetupStep::populate(Population::Grid),
            SetupStep::bounded_2d_index(config),
        ],
        ShapeKind::Hexagon | ShapeKind::Circle => vec![
            SetupStep::bounded_2d_index(config),
            SetupStep::populate(Population::Grid),
        ],
        ShapeKind::SphericalCircle => vec![
            SetupStep::default_2d_index(),
            SetupStep::populate(Population::Spherical),
        ],
    };

    Ok(TestCase::new(find_test_name(&base, &run))
        .with_steps(pre)
        .with_ops(ops))
}

fn map_reduce_test<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    kind: ShapeKind,
    rng: &mut R,
) -> Result<TestCase> {
    let ops = shape_queries(config, kind, MAP_REDUCE_POINTS, MAP_REDUCE_OPS, rng)?
        .into_iter()
        .map(|query| Op::Command {
            ns: tokens::DATABASE.into(),
            command: json!({
                "mapReduce": tokens::COLLECTION,
                "map": { "$code": MAP_FUNCTION },
                "reduce": { "$code": REDUCE_FUNCTION },
                "out": { "inline": 1 },
                "query": query,
            }),
        })
        .collect();

    Ok(
        TestCase::new(format!("{SUITE}.MapReduceGeoWithin{}", operator_label(kind)))
            .with_steps([
                SetupStep::bounded_2d_index(config),
                SetupStep::populate(Population::Grid),
            ])
            .with_ops(ops),
    )
}

fn insert_test<R: RandomSource + ?Sized>(config: &GeoConfig, rng: &mut R) -> TestCase {
    let ops = (0..INSERT_OPS)
        .map(|_| {
            let p = planar_position(config, rng);
            Op::Insert {
                doc: json!({
                    "loc": [p.x, p.y],
                    "type": tokens::rand_string(20),
                    "note": tokens::rand_string(50),
                }),
            }
        })
        .collect();

    TestCase::new(format!("{SUITE}.Insert"))
        .with_step(SetupStep::index_2d("geometry", Some(config)))
        .with_ops(ops)
}

fn update_test<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    run: UpdateRun,
    kind: ShapeKind,
    rng: &mut R,
) -> Result<TestCase> {
    let ops = shape_queries(config, kind, run.points, run.ops, rng)?
        .into_iter()
        .map(|query| Op::Update {
            query,
            update: json!({ "$set": { "note": tokens::rand_string(50) } }),
            multi: Some(run.multi),
        })
        .collect();

    let base = format!("{SUITE}.UpdateGeoWithin{}", operator_label(kind));
    Ok(TestCase::new(update_test_name(&base, run.multi))
        .with_steps([
            SetupStep::populate(Population::Grid),
            SetupStep::bounded_2d_index(config),
        ])
        .with_ops(ops))
}

/// Each round binds a per-thread tag, removes the documents inside a shape
/// and re-inserts a point from that shape, so the collection stays the same
/// size. The `pre` phase performs one untagged round per shape up front.
fn remove_test<R: RandomSource + ?Sized>(
    config: &GeoConfig,
    kind: ShapeKind,
    rng: &mut R,
) -> Result<TestCase> {
    let mut ops = Vec::with_capacity(REMOVE_ROUNDS * 3);
    let mut shapes = Vec::with_capacity(REMOVE_ROUNDS);
    let mut points = Vec::with_capacity(REMOVE_ROUNDS);

    for _ in 0..REMOVE_ROUNDS {
        let shape = kind.try_generate(config, REMOVE_POINTS, rng)?;
        let query = geo_within(&shape);
        let point = point_document(&shape);

        ops.push(Op::Let {
            target: "thread".into(),
            value: tokens::rand_int_plus_thread(0, 1),
        });
        ops.push(Op::Remove {
            query: with_thread_variable(query.clone()),
        });
        ops.push(Op::Insert {
            doc: with_thread_variable(point.clone()),
        });
        shapes.push(query);
        points.push(point);
    }

    let (index, population) = match kind {
        ShapeKind::SphericalCircle => (SetupStep::default_2d_index(), Population::Spherical),
        _ => (SetupStep::bounded_2d_index(config), Population::Grid),
    };

    Ok(
        TestCase::new(format!("{SUITE}.RemoveGeoWithin{}", operator_label(kind)))
            .with_steps([
                index,
                SetupStep::populate(population),
                SetupStep::RemoveEach { queries: shapes },
                SetupStep::InsertPerThread { docs: points },
            ])
            .with_ops(ops),
    )
}

fn with_thread_variable(mut doc: Value) -> Value {
    if let Some(fields) = doc.as_object_mut() {
        fields.insert("thread".into(), tokens::variable("thread"));
    }
    doc
}
