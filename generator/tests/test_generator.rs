//! End-to-end generation tests on a realistic stimulus pool.

use std::collections::{HashMap, HashSet};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use samediff::generator::{generate_trial_specs, GenerationParams, TrialComposition};
use samediff::megablock::trial_types_per_megablock;
use samediff::types::{Role, StimCondition, TrialSpec};

const SHAPES: [&str; 8] = [
    "binoculars",
    "cannon",
    "otter",
    "plane",
    "apron",
    "ostrich",
    "guitar",
    "bear",
];
const TEXTURES: [&str; 8] = [
    "bison",
    "gong",
    "pineapple",
    "flamingo",
    "otter",
    "clock",
    "knife",
    "bottle",
];

/// Every shape/texture pairing except shape == texture.
fn baker_pool() -> Vec<String> {
    let mut names = Vec::new();
    for s in SHAPES {
        for t in TEXTURES {
            if s != t {
                names.push(format!("{s}_{t}.png"));
            }
        }
    }
    names
}

/// Numbered gst instances: `<shape><i>_<texture><j>.png`.
fn gst_pool() -> Vec<String> {
    let shapes = ["bird", "chair", "car", "bottle", "knife"];
    let textures = ["clock", "elephant", "keyboard", "oven", "truck"];
    let mut names = Vec::new();
    for (si, s) in shapes.iter().enumerate() {
        for (ti, t) in textures.iter().enumerate() {
            for inst in 1..=2 {
                names.push(format!("{s}{}_{t}{}.png", si + inst, ti + inst));
            }
        }
    }
    names
}

fn params(condition: StimCondition, targets: usize, blocks: usize, trials: usize) -> GenerationParams {
    GenerationParams {
        condition,
        num_targets: targets,
        num_blocks_per_target: blocks,
        num_trials_per_block: trials,
    }
}

fn composition_matches(trials: &[TrialSpec], p: &GenerationParams) {
    let quota = trial_types_per_megablock(p.num_blocks_per_target, p.num_trials_per_block).unwrap();
    let expected = TrialComposition::expected(p, &quota);
    let actual = TrialComposition::of(trials);
    assert_eq!(actual, expected);
    assert_eq!(
        trials.len(),
        p.num_targets * p.num_blocks_per_target + quota.total() * p.num_targets
    );
}

#[test]
fn full_experiment_counts() {
    let pool = baker_pool();
    let p = params(StimCondition::Baker, 25, 2, 50);
    let mut rng = SmallRng::seed_from_u64(2024);
    let trials = generate_trial_specs(&pool, &p, &mut rng).unwrap();

    let comp = TrialComposition::of(&trials);
    assert_eq!(trials.len(), 2550);
    assert_eq!(comp.get(Role::Target), 50);
    assert_eq!(comp.get(Role::ExactMatch), 1250);
    assert_eq!(comp.get(Role::ShapeLure), 400);
    assert_eq!(comp.get(Role::TextureLure), 400);
    assert_eq!(comp.get(Role::Filler), 450);
    assert_eq!(comp.total(), 2550);
    composition_matches(&trials, &p);
}

#[test]
fn gst_counts_and_class_disjoint_fillers() {
    let pool = gst_pool();
    let p = params(StimCondition::Gst, 10, 2, 12);
    let mut rng = SmallRng::seed_from_u64(77);
    let trials = generate_trial_specs(&pool, &p, &mut rng).unwrap();
    composition_matches(&trials, &p);

    let by_fname: HashMap<&str, &TrialSpec> = trials
        .iter()
        .filter(|t| t.role == Role::Target)
        .map(|t| (t.fname(), t))
        .collect();

    for t in trials.iter().filter(|t| t.role == Role::Filler) {
        let target = by_fname[t.target.as_deref().unwrap()];
        let (s, x) = t.item.classes().unwrap();
        let (ts, tx) = target.item.classes().unwrap();
        for c in [s, x] {
            assert!(c != ts && c != tx, "filler {} overlaps {}", t.fname(), target.fname());
        }
    }
}

#[test]
fn roles_agree_with_attributes() {
    let pool = baker_pool();
    let p = params(StimCondition::Baker, 12, 1, 20);
    let mut rng = SmallRng::seed_from_u64(5);
    let trials = generate_trial_specs(&pool, &p, &mut rng).unwrap();

    let targets: HashMap<(usize, &str), &TrialSpec> = trials
        .iter()
        .filter(|t| t.role == Role::Target)
        .map(|t| ((t.block_num.unwrap(), t.fname()), t))
        .collect();

    for t in trials.iter().filter(|t| t.role != Role::Target) {
        let target = targets[&(t.block_num.unwrap(), t.target.as_deref().unwrap())];
        let (item, tgt) = (&t.item, &target.item);
        match t.role {
            Role::ExactMatch => assert_eq!(item, tgt),
            Role::ShapeLure => {
                assert_eq!(item.shape, tgt.shape);
                assert_ne!(item.texture, tgt.texture);
            }
            Role::TextureLure => {
                assert_eq!(item.texture, tgt.texture);
                assert_ne!(item.shape, tgt.shape);
            }
            Role::Filler => {
                assert_ne!(item.shape, tgt.shape);
                assert_ne!(item.texture, tgt.texture);
            }
            other => panic!("unexpected role {other:?}"),
        }
    }
}

#[test]
fn block_and_trial_numbers_are_dense() {
    let pool = baker_pool();
    let p = params(StimCondition::Baker, 7, 3, 4);
    let mut rng = SmallRng::seed_from_u64(11);
    let trials = generate_trial_specs(&pool, &p, &mut rng).unwrap();

    let mut seen = HashSet::new();
    let mut per_block: HashMap<usize, Vec<usize>> = HashMap::new();
    for t in &trials {
        let key = (t.block_num.unwrap(), t.trial_num.unwrap());
        assert!(seen.insert(key), "duplicate {key:?}");
        per_block.entry(key.0).or_default().push(key.1);
    }
    let num_blocks = p.num_targets * p.num_blocks_per_target;
    assert_eq!(per_block.len(), num_blocks);
    for b in 0..num_blocks {
        let nums = &per_block[&b];
        assert_eq!(nums, &(0..=p.num_trials_per_block).collect::<Vec<_>>());
    }
}

#[test]
fn different_seeds_differ() {
    let pool = baker_pool();
    let p = params(StimCondition::Baker, 5, 2, 10);
    let a = generate_trial_specs(&pool, &p, &mut SmallRng::seed_from_u64(1)).unwrap();
    let b = generate_trial_specs(&pool, &p, &mut SmallRng::seed_from_u64(2)).unwrap();
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
}

#[test]
fn json_output_is_flat_and_numbered() {
    let pool = baker_pool();
    let p = params(StimCondition::Baker, 2, 1, 4);
    let mut rng = SmallRng::seed_from_u64(3);
    let trials = generate_trial_specs(&pool, &p, &mut rng).unwrap();
    let json = serde_json::to_value(&trials).unwrap();
    let first = &json[0];
    assert_eq!(first["role"], "target");
    assert!(first["target"].is_null());
    assert_eq!(first["block_num"], 0);
    assert_eq!(first["trial_num"], 0);
    assert!(first["fname"].as_str().unwrap().ends_with(".png"));
    assert_eq!(json[1]["trial_num"], 1);

    let back: Vec<TrialSpec> = serde_json::from_value(json).unwrap();
    assert_eq!(back, trials);
}
