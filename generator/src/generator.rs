//! Full trial-sequence generation.
//!
//! Samples targets, builds and splits one megablock per target, shuffles
//! blocks across targets, then numbers every trial with a dense zero-based
//! `(block_num, trial_num)` pair.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::megablock::{
    megablock, split_megablock_into_blocks, trial_types_per_megablock, TrialQuota,
};
use crate::sampling::{sample_with_replacement, shuffle};
use crate::stimulus::stim_properties;
use crate::types::{Block, Role, StimCondition, TrialSpec};

/// Shape of a generation run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GenerationParams {
    pub condition: StimCondition,
    pub num_targets: usize,
    pub num_blocks_per_target: usize,
    pub num_trials_per_block: usize,
}

/// Generate the flat, numbered trial sequence.
pub fn generate_trial_specs<S: AsRef<str>, R: Rng + ?Sized>(
    stim_fnames: &[S],
    params: &GenerationParams,
    rng: &mut R,
) -> Result<Vec<TrialSpec>> {
    let items = stim_properties(stim_fnames, params.condition)?;
    let targets = sample_with_replacement(&items, params.num_targets, rng)?;
    let quota =
        trial_types_per_megablock(params.num_blocks_per_target, params.num_trials_per_block)?;

    let mut blocks: Vec<Block> =
        Vec::with_capacity(params.num_targets * params.num_blocks_per_target);
    for target in &targets {
        let (trials, target_trial) = megablock(target, &items, &quota, rng)?;
        blocks.extend(split_megablock_into_blocks(
            &trials,
            &target_trial,
            params.num_blocks_per_target,
        )?);
    }

    let mut blocks = shuffle(&blocks, rng);
    number_blocks(&mut blocks);
    let all_trials: Vec<TrialSpec> = blocks.into_iter().flatten().collect();

    info!(
        condition = params.condition.as_str(),
        targets = params.num_targets,
        blocks = params.num_targets * params.num_blocks_per_target,
        trials = all_trials.len(),
        "generated trial specs"
    );
    Ok(all_trials)
}

/// Assign `block_num` = block position and `trial_num` = position in block.
pub fn number_blocks(blocks: &mut [Block]) {
    for (block_num, block) in blocks.iter_mut().enumerate() {
        for (trial_num, trial) in block.iter_mut().enumerate() {
            trial.block_num = Some(block_num);
            trial.trial_num = Some(trial_num);
        }
    }
}

// ── Composition ──

/// Per-role trial counts of a sequence.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
pub struct TrialComposition {
    pub counts: BTreeMap<&'static str, usize>,
}

impl TrialComposition {
    pub fn of(trials: &[TrialSpec]) -> Self {
        let mut counts = BTreeMap::new();
        for role in Role::GENERATED {
            counts.insert(role.as_str(), 0);
        }
        for t in trials {
            *counts.entry(t.role.as_str()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// What [`generate_trial_specs`] must produce for these parameters.
    pub fn expected(params: &GenerationParams, quota: &TrialQuota) -> Self {
        let blocks = params.num_targets * params.num_blocks_per_target;
        let mut counts = BTreeMap::new();
        counts.insert(Role::Target.as_str(), blocks);
        for role in &Role::GENERATED[1..] {
            counts.insert(role.as_str(), quota.count(*role) * params.num_targets);
        }
        Self { counts }
    }

    pub fn get(&self, role: Role) -> usize {
        self.counts.get(role.as_str()).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}
