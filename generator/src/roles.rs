//! Role classification: which pool items can serve as shape lures, texture
//! lures, or fillers for a given target.

use rand::Rng;
use tracing::warn;

use crate::error::{Result, TrialError};
use crate::sampling::sample_without_replacement;
use crate::types::{Role, StimulusItem, TrialSpec};

/// Candidate trials for one target, already tagged with role and target.
#[derive(Clone, Debug)]
pub struct RoleOptions {
    pub shape_lures: Vec<TrialSpec>,
    pub texture_lures: Vec<TrialSpec>,
    pub fillers: Vec<TrialSpec>,
}

/// True when none of `item`'s class attributes equals either of the
/// target's. Baker items have no classes and always pass.
fn class_disjoint(item: &StimulusItem, target: &StimulusItem) -> bool {
    match (item.classes(), target.classes()) {
        (Some((shape, texture)), Some((t_shape, t_texture))) => {
            shape != t_shape && texture != t_texture && shape != t_texture && texture != t_shape
        }
        _ => true,
    }
}

/// Partition `items` into lure and filler options for `target`.
///
/// Items sharing the target's filename are skipped. Shape match wins over
/// texture match. Gst fillers must also be class-disjoint from the target;
/// items failing that are dropped, and the two lure pools are subsampled to
/// equal size.
pub fn options_by_role<R: Rng + ?Sized>(
    target: &StimulusItem,
    items: &[StimulusItem],
    rng: &mut R,
) -> Result<RoleOptions> {
    let mut shape_lures = Vec::new();
    let mut texture_lures = Vec::new();
    let mut fillers = Vec::new();

    for item in items.iter().filter(|it| it.fname != target.fname) {
        if item.shape == target.shape {
            shape_lures.push(TrialSpec::for_target(item, target, Role::ShapeLure));
        } else if item.texture == target.texture {
            texture_lures.push(TrialSpec::for_target(item, target, Role::TextureLure));
        } else if class_disjoint(item, target) {
            fillers.push(TrialSpec::for_target(item, target, Role::Filler));
        }
    }

    if shape_lures.is_empty() {
        return Err(TrialError::EmptyShapeLures {
            target: target.fname.clone(),
        });
    }
    if texture_lures.is_empty() {
        return Err(TrialError::EmptyTextureLures {
            target: target.fname.clone(),
        });
    }
    if fillers.is_empty() {
        return Err(TrialError::EmptyFillers {
            target: target.fname.clone(),
        });
    }

    if target.classes().is_some() {
        let num_lures = shape_lures.len().min(texture_lures.len());
        if shape_lures.len() != texture_lures.len() {
            warn!(
                target_fname = %target.fname,
                shape_lures = shape_lures.len(),
                texture_lures = texture_lures.len(),
                kept = num_lures,
                "balancing lure pools"
            );
        }
        shape_lures = sample_without_replacement(&shape_lures, num_lures, rng)?;
        texture_lures = sample_without_replacement(&texture_lures, num_lures, rng)?;
    }

    Ok(RoleOptions {
        shape_lures,
        texture_lures,
        fillers,
    })
}
