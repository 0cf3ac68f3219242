//! Per-target trial sets ("megablocks") and their split into presentation
//! blocks.
//!
//! A megablock holds every comparison trial for one target: half exact
//! matches, the other half split as evenly as possible between shape lures,
//! texture lures, and fillers (fillers absorb the remainder). It is then cut
//! into `num_blocks_per_target` equal blocks, each opened by the target.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TrialError};
use crate::roles::options_by_role;
use crate::sampling::{sample_with_replacement, shuffle};
use crate::types::{Block, Role, StimulusItem, TrialSpec};

/// Trial counts for one target's megablock.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct TrialQuota {
    pub num_exact_match: usize,
    pub num_shape_lure: usize,
    pub num_texture_lure: usize,
    pub num_filler: usize,
}

impl TrialQuota {
    pub fn total(&self) -> usize {
        self.num_exact_match + self.num_shape_lure + self.num_texture_lure + self.num_filler
    }

    /// Quota for `role`; zero for roles never sampled into a megablock.
    pub fn count(&self, role: Role) -> usize {
        match role {
            Role::ExactMatch => self.num_exact_match,
            Role::ShapeLure => self.num_shape_lure,
            Role::TextureLure => self.num_texture_lure,
            Role::Filler => self.num_filler,
            _ => 0,
        }
    }
}

/// Split `blocks_per_target * trials_per_block` trials into role quotas.
/// The product must be even.
pub fn trial_types_per_megablock(
    blocks_per_target: usize,
    trials_per_block: usize,
) -> Result<TrialQuota> {
    let total = blocks_per_target * trials_per_block;
    if total % 2 != 0 {
        return Err(TrialError::InfeasibleTrialParameters {
            blocks_per_target,
            trials_per_block,
        });
    }
    let num_exact_match = total / 2;
    let num_non_match = total - num_exact_match;
    let num_shape_lure = num_non_match / 3;
    let num_texture_lure = num_non_match / 3;
    let num_filler = num_non_match - num_shape_lure - num_texture_lure;
    Ok(TrialQuota {
        num_exact_match,
        num_shape_lure,
        num_texture_lure,
        num_filler,
    })
}

/// Build one target's shuffled megablock.
///
/// Returns `(trials, target_trial)`. The target trial is not part of the
/// shuffled list; [`split_megablock_into_blocks`] prepends it to each block.
pub fn megablock<R: Rng + ?Sized>(
    target: &StimulusItem,
    items: &[StimulusItem],
    quota: &TrialQuota,
    rng: &mut R,
) -> Result<(Vec<TrialSpec>, TrialSpec)> {
    let target_trial = TrialSpec::target(target);
    let exact_match = TrialSpec::for_target(target, target, Role::ExactMatch);

    let options = options_by_role(target, items, rng)?;

    let mut trials = Vec::with_capacity(quota.total());
    trials.extend((0..quota.num_exact_match).map(|_| exact_match.clone()));
    trials.extend(sample_with_replacement(
        &options.shape_lures,
        quota.num_shape_lure,
        rng,
    )?);
    trials.extend(sample_with_replacement(
        &options.texture_lures,
        quota.num_texture_lure,
        rng,
    )?);
    trials.extend(sample_with_replacement(
        &options.fillers,
        quota.num_filler,
        rng,
    )?);

    debug!(
        target_fname = %target.fname,
        shape_options = options.shape_lures.len(),
        texture_options = options.texture_lures.len(),
        filler_options = options.fillers.len(),
        trials = trials.len(),
        "built megablock"
    );

    Ok((shuffle(&trials, rng), target_trial))
}

/// Cut `trials` into `num_blocks` contiguous equal chunks, in order, each
/// prefixed with a copy of `target`.
pub fn split_megablock_into_blocks(
    trials: &[TrialSpec],
    target: &TrialSpec,
    num_blocks: usize,
) -> Result<Vec<Block>> {
    if trials.is_empty() {
        return Err(TrialError::EmptyInput {
            what: "megablock trials",
        });
    }
    if num_blocks == 0 || trials.len() % num_blocks != 0 {
        return Err(TrialError::InfeasibleBlockCount {
            trials: trials.len(),
            blocks: num_blocks,
        });
    }

    let step = trials.len() / num_blocks;
    let blocks: Vec<Block> = trials
        .chunks(step)
        .map(|chunk| {
            let mut block = Vec::with_capacity(step + 1);
            block.push(target.clone());
            block.extend_from_slice(chunk);
            block
        })
        .collect();
    debug!(target_fname = %target.fname(), blocks = blocks.len(), step, "split megablock");
    Ok(blocks)
}
