//! Experiment configuration.
//!
//! [`ExperimentConfig`] is the static record loaded from JSON. Resolving it
//! for a session samples the yes/no key mapping and yields the
//! [`ExperimentParams`] the timeline is built from. Two environment
//! variables are honoured: `SAMEDIFF_SEED` and `SAMEDIFF_CONFIG`.

use std::path::{Path, PathBuf};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::*;
use crate::error::{Result, TrialError};
use crate::generator::GenerationParams;
use crate::mask::MaskCondition;
use crate::megablock::trial_types_per_megablock;
use crate::sampling::sample_key_mapping;
use crate::types::{KeyMapping, StimCondition};

fn default_mask_condition() -> MaskCondition {
    MaskCondition::Scramble
}
fn default_num_targets() -> usize {
    DEFAULT_NUM_TARGETS
}
fn default_num_blocks_per_target() -> usize {
    DEFAULT_NUM_BLOCKS_PER_TARGET
}
fn default_num_trials_per_block() -> usize {
    DEFAULT_NUM_TRIALS_PER_BLOCK
}
fn default_valid_keys() -> Vec<String> {
    DEFAULT_VALID_KEYS.iter().map(|k| k.to_string()).collect()
}
fn default_stim_size() -> u32 {
    DEFAULT_STIM_SIZE
}
fn default_iti_dur() -> u32 {
    DEFAULT_ITI_DUR_MS
}
fn default_stim_dur() -> u32 {
    DEFAULT_STIM_DUR_MS
}
fn default_mask_dur() -> u32 {
    DEFAULT_MASK_DUR_MS
}

/// Static experiment configuration (camelCase JSON).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentConfig {
    pub stim_condition: StimCondition,
    #[serde(default = "default_mask_condition")]
    pub mask_condition: MaskCondition,
    #[serde(default = "default_num_targets")]
    pub num_targets: usize,
    #[serde(default = "default_num_blocks_per_target")]
    pub num_blocks_per_target: usize,
    #[serde(default = "default_num_trials_per_block")]
    pub num_trials_per_block: usize,
    #[serde(default = "default_valid_keys")]
    pub valid_keys: Vec<String>,
    #[serde(default)]
    pub stim_dir: String,
    #[serde(default)]
    pub mask_dir: String,
    #[serde(default = "default_stim_size")]
    pub stim_size: u32,
    #[serde(default = "default_iti_dur")]
    pub iti_dur: u32,
    #[serde(default = "default_stim_dur")]
    pub stim_dur: u32,
    #[serde(default = "default_mask_dur")]
    pub mask_dur: u32,
    pub stim_fnames: Vec<String>,
    #[serde(default)]
    pub mask_fnames: Vec<String>,
}

/// Per-session parameters handed to the presentation runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentParams {
    pub stim_condition: StimCondition,
    pub mask_condition: MaskCondition,
    pub stim_dir: String,
    pub mask_dir: String,
    pub stim_size: u32,
    pub iti_dur: u32,
    pub stim_dur: u32,
    pub mask_dur: u32,
    pub key_mapping: KeyMapping,
}

impl ExperimentConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TrialError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            condition = config.stim_condition.as_str(),
            stimuli = config.stim_fnames.len(),
            masks = config.mask_fnames.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Reject parameter combinations the generator cannot satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.num_targets == 0 {
            return Err(TrialError::Config("numTargets must be positive".to_string()));
        }
        if self.num_blocks_per_target == 0 || self.num_trials_per_block == 0 {
            return Err(TrialError::Config(
                "numBlocksPerTarget and numTrialsPerBlock must be positive".to_string(),
            ));
        }
        trial_types_per_megablock(self.num_blocks_per_target, self.num_trials_per_block)?;
        if self.valid_keys.len() != 2 {
            return Err(TrialError::InvalidKeyCount {
                got: self.valid_keys.len(),
            });
        }
        if self.stim_fnames.is_empty() {
            return Err(TrialError::EmptyInput { what: "stimFnames" });
        }
        if self.mask_condition != MaskCondition::NoMask && self.mask_fnames.is_empty() {
            return Err(TrialError::EmptyInput { what: "maskFnames" });
        }
        Ok(())
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            condition: self.stim_condition,
            num_targets: self.num_targets,
            num_blocks_per_target: self.num_blocks_per_target,
            num_trials_per_block: self.num_trials_per_block,
        }
    }

    /// Sample this session's key mapping and build its parameters.
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<ExperimentParams> {
        let key_mapping = sample_key_mapping(&self.valid_keys, rng)?;
        Ok(ExperimentParams {
            stim_condition: self.stim_condition,
            mask_condition: self.mask_condition,
            stim_dir: self.stim_dir.clone(),
            mask_dir: self.mask_dir.clone(),
            stim_size: self.stim_size,
            iti_dur: self.iti_dur,
            stim_dur: self.stim_dur,
            mask_dur: self.mask_dur,
            key_mapping,
        })
    }
}

/// Read `SAMEDIFF_SEED`. Unparseable values are ignored with a warning.
pub fn seed_from_env() -> Option<u64> {
    let raw = std::env::var(SEED_ENV_VAR).ok()?;
    match raw.trim().parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            warn!(var = SEED_ENV_VAR, value = %raw, "ignoring unparseable seed");
            None
        }
    }
}

/// Read `SAMEDIFF_CONFIG`.
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::var(CONFIG_ENV_VAR).ok().map(PathBuf::from)
}

/// Session RNG: seeded when a seed is given, OS entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_os_rng(),
    }
}
