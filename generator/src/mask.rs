//! Mask selection for the post-stimulus response screen.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrialError};
use crate::sampling::sample_one;
use crate::types::StimulusItem;

/// What follows each comparison stimulus.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskCondition {
    /// A plain response cue, no mask image.
    NoMask,
    /// A mask that shares neither attribute with the stimulus.
    Scramble,
    /// Any mask from the pool.
    Random,
}

/// Draw a mask whose name contains neither `shape` nor `texture`.
///
/// Valid candidates are collected first and one is drawn uniformly, so the
/// call always terminates; an empty candidate set is reported as
/// [`TrialError::MaskSamplingExhausted`].
pub fn sample_nonmatch_mask<'a, S: AsRef<str>, R: Rng + ?Sized>(
    mask_names: &'a [S],
    shape: &str,
    texture: &str,
    rng: &mut R,
) -> Result<&'a str> {
    if mask_names.is_empty() {
        return Err(TrialError::EmptyInput { what: "mask names" });
    }
    let valid: Vec<&str> = mask_names
        .iter()
        .map(|m| m.as_ref())
        .filter(|name| !name.contains(shape) && !name.contains(texture))
        .collect();
    if valid.is_empty() {
        return Err(TrialError::MaskSamplingExhausted {
            shape: shape.to_string(),
            texture: texture.to_string(),
            pool: mask_names.len(),
        });
    }
    Ok(*sample_one(&valid, rng)?)
}

/// Pick the mask for `item` under `condition`; `None` for
/// [`MaskCondition::NoMask`].
pub fn select_mask<'a, S: AsRef<str>, R: Rng + ?Sized>(
    condition: MaskCondition,
    mask_names: &'a [S],
    item: &StimulusItem,
    rng: &mut R,
) -> Result<Option<&'a str>> {
    match condition {
        MaskCondition::NoMask => Ok(None),
        MaskCondition::Scramble => {
            let (shape, texture) = item.mask_exclusions();
            sample_nonmatch_mask(mask_names, shape, texture, rng).map(Some)
        }
        MaskCondition::Random => sample_one(mask_names, rng).map(|m| Some(m.as_ref())),
    }
}
