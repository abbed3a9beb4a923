//! Declarative `pre` steps and the population routine they drive.
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::GeoConfig;
use crate::error::Result;
use crate::random::RandomSource;
use crate::sampling::{PoissonDiscSampler, Sample};
use crate::workload::collection::Collection;
use crate::workload::query::LOCATION_FIELD;

/// Execution environment supplied by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Env {
    /// Number of worker threads the harness runs the ops with.
    pub threads: u32,
}

impl Default for Env {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

/// Which domain a population step samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    /// The planar `width x height` domain.
    Grid,
    /// The `sphere_width x sphere_height` longitude/latitude domain.
    Spherical,
}

/// Category tag attached to populated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceType {
    GasStation,
    Store,
    Restaurant,
    School,
    Resident,
    Untyped,
}

/// Cumulative thresholds on a roll in `[0, 100)`; rolls above the last are untyped.
pub const PLACE_TYPE_TABLE: [(f64, PlaceType); 5] = [
    (5.0, PlaceType::GasStation),
    (15.0, PlaceType::Store),
    (25.0, PlaceType::Restaurant),
    (30.0, PlaceType::School),
    (90.0, PlaceType::Resident),
];

impl PlaceType {
    pub fn from_roll(roll: f64) -> Self {
        PLACE_TYPE_TABLE
            .iter()
            .find(|(threshold, _)| roll <= *threshold)
            .map_or(PlaceType::Untyped, |(_, place)| *place)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceType::GasStation => "gas-station",
            PlaceType::Store => "store",
            PlaceType::Restaurant => "restaurant",
            PlaceType::School => "school",
            PlaceType::Resident => "resident",
            PlaceType::Untyped => "",
        }
    }
}

/// One step of a test's `pre` phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum SetupStep {
    DropCollection,
    EnsureIndex {
        keys: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<Value>,
    },
    Populate {
        population: Population,
    },
    Insert {
        doc: Value,
    },
    /// Removes each query once.
    RemoveEach {
        queries: Vec<Value>,
    },
    /// Inserts every document once per harness thread, tagged `thread: i`.
    InsertPerThread {
        docs: Vec<Value>,
    },
}

impl SetupStep {
    /// `{ loc: "2d" }` bounded to the planar domain.
    pub fn bounded_2d_index(config: &GeoConfig) -> Self {
        Self::index_2d(LOCATION_FIELD, Some(config))
    }

    /// `{ loc: "2d" }` with the index defaults.
    pub fn default_2d_index() -> Self {
        Self::index_2d(LOCATION_FIELD, None)
    }

    /// A 2d index on `field`, bounded to the planar domain when `config` is given.
    pub fn index_2d(field: &str, config: Option<&GeoConfig>) -> Self {
        SetupStep::EnsureIndex {
            keys: json!({ field: "2d" }),
            options: config.map(|c| json!({ "min": c.x_min(), "max": c.x_max() })),
        }
    }

    pub fn populate(population: Population) -> Self {
        SetupStep::Populate { population }
    }

    pub fn run<C, R>(
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
        match self {
            SetupStep::DropCollection => collection.drop_collection(),
            SetupStep::EnsureIndex { keys, options } => {
                collection.ensure_index(keys, options.as_ref())
            }
            SetupStep::Populate { population } => {
                populate(collection, *population, config, rng).map(|_| ())
            }
            SetupStep::Insert { doc } => collection.insert(doc.clone()),
            SetupStep::RemoveEach { queries } => {
                queries.iter().try_for_each(|query| collection.remove(query))
            }
            SetupStep::InsertPerThread { docs } => {
                for thread in 0..env.threads {
                    for doc in docs {
                        let mut doc = doc.clone();
                        if let Some(fields) = doc.as_object_mut() {
                            fields.insert("thread".into(), json!(thread));
                        }
                        collection.insert(doc)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Fills `collection` with Poisson-disc points, centered on the origin and
/// tagged with a [`PlaceType`].
///
/// Each point costs the sampler's draws followed by one type roll, so the
/// stream stays aligned with existing fixtures. Stops at exhaustion or after
/// [`GeoConfig::max_points`] documents; returns the number inserted.
pub fn populate<C, R>(
    collection: &mut C,
    population: Population,
    config: &GeoConfig,
    rng: &mut R,
) -> Result<usize>
where
    C: Collection + ?Sized,
    R: RandomSource + ?Sized,
{
    let extent = match population {
        Population::Grid => config.extent(),
        Population::Spherical => config.sphere_extent(),
    };
    let half = extent / 2.0;
    let mut sampler = PoissonDiscSampler::new(extent.x, extent.y, config.radius);

    let mut inserted = 0;
    while inserted < config.max_points {
        let Sample::Point(point) = sampler.next_sample(rng) else {
            break;
        };
        let loc = point - half;
        let place = PlaceType::from_roll(rng.next_int(100.0));
        collection.insert(json!({ "type": place.as_str(), LOCATION_FIELD: [loc.x, loc.y] }))?;
        inserted += 1;
    }

    debug!(?population, inserted, "populated collection");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::random::SeededRng;
    use crate::workload::collection::{CollectionCall, RecordingCollection};

    #[test]
    fn place_type_thresholds_are_inclusive() {
        assert_eq!(PlaceType::from_roll(0.0), PlaceType::GasStation);
        assert_eq!(PlaceType::from_roll(5.0), PlaceType::GasStation);
        assert_eq!(PlaceType::from_roll(5.01), PlaceType::Store);
        assert_eq!(PlaceType::from_roll(15.0), PlaceType::Store);
        assert_eq!(PlaceType::from_roll(25.0), PlaceType::Restaurant);
        assert_eq!(PlaceType::from_roll(29.9), PlaceType::School);
        assert_eq!(PlaceType::from_roll(90.0), PlaceType::Resident);
        assert_eq!(PlaceType::from_roll(90.5), PlaceType::Untyped);
        assert_eq!(PlaceType::Untyped.as_str(), "");
    }

    #[test]
    fn populate_interleaves_sampler_and_type_draws() {
        let config = GeoConfig::new(40.0, 20.0, 2.0).with_max_points(3);
        let mut rng = SeededRng::new(1000);
        let mut collection = RecordingCollection::new();
        let inserted = populate(&mut collection, Population::Grid, &config, &mut rng).unwrap();
        assert_eq!(inserted, 3);

        let mut replay = SeededRng::new(1000);
        let mut sampler = PoissonDiscSampler::new(40.0, 20.0, 2.0);
        let first = sampler.next_sample(&mut replay).point().unwrap();
        let roll = replay.next_int(100.0);

        let doc = collection.inserted().next().unwrap();
        let loc = first - DVec2::new(20.0, 10.0);
        assert_eq!(
            doc,
            &json!({ "type": PlaceType::from_roll(roll).as_str(), "loc": [loc.x, loc.y] })
        );
    }

    #[test]
    fn populate_stops_at_exhaustion_and_centers_points() {
        let config = GeoConfig::new(30.0, 30.0, 3.0);
        let mut rng = SeededRng::new(17);
        let mut collection = RecordingCollection::new();
        let inserted = populate(&mut collection, Population::Grid, &config, &mut rng).unwrap();

        assert!(inserted > 10);
        assert_eq!(collection.len(), inserted);
        for doc in collection.inserted() {
            let x = doc["loc"][0].as_f64().unwrap();
            let y = doc["loc"][1].as_f64().unwrap();
            assert!((-15.0..15.0).contains(&x));
            assert!((-15.0..15.0).contains(&y));
            assert!(doc["type"].is_string());
        }
    }

    #[test]
    fn spherical_population_uses_lon_lat_domain() {
        let config = GeoConfig::default().with_max_points(200);
        let mut rng = SeededRng::new(1000);
        let mut collection = RecordingCollection::new();
        populate(&mut collection, Population::Spherical, &config, &mut rng).unwrap();

        assert_eq!(collection.len(), 200);
        for doc in collection.inserted() {
            let lon = doc["loc"][0].as_f64().unwrap();
            let lat = doc["loc"][1].as_f64().unwrap();
            assert!((-180.0..180.0).contains(&lon));
            assert!((-90.0..90.0).contains(&lat));
        }
    }

    #[test]
    fn insert_per_thread_tags_each_copy() {
        let config = GeoConfig::default();
        let mut rng = SeededRng::new(1);
        let mut collection = RecordingCollection::new();
        let step = SetupStep::InsertPerThread {
            docs: vec![json!({ "loc": [1.0, 2.0] })],
        };
        step.run(&mut collection, &Env { threads: 3 }, &config, &mut rng)
            .unwrap();

        let threads: Vec<u64> = collection
            .inserted()
            .map(|doc| doc["thread"].as_u64().unwrap())
            .collect();
        assert_eq!(threads, vec![0, 1, 2]);
    }

    #[test]
    fn index_steps_carry_domain_bounds() {
        let config = GeoConfig::default();
        let mut rng = SeededRng::new(1);
        let mut collection = RecordingCollection::new();
        SetupStep::bounded_2d_index(&config)
            .run(&mut collection, &Env::default(), &config, &mut rng)
            .unwrap();
        SetupStep::default_2d_index()
            .run(&mut collection, &Env::default(), &config, &mut rng)
            .unwrap();

        assert_eq!(
            collection.calls(),
            &[
                CollectionCall::EnsureIndex {
                    keys: json!({ "loc": "2d" }),
                    options: Some(json!({ "min": -500.0, "max": 500.0 })),
                },
                CollectionCall::EnsureIndex {
                    keys: json!({ "loc": "2d" }),
                    options: None,
                },
            ]
        );
        assert_eq!(rng, SeededRng::new(1), "index steps must not draw");
    }

    #[test]
    fn steps_serialise_with_step_tag() {
        let step = SetupStep::populate(Population::Spherical);
        assert_eq!(
            serde_json::to_value(&step).unwrap(),
            json!({ "step": "populate", "population": "spherical" })
        );
    }
}
