//! Default experiment parameters.

/// Targets sampled per session.
pub const DEFAULT_NUM_TARGETS: usize = 25;

/// Presentation blocks each target's megablock is split into.
pub const DEFAULT_NUM_BLOCKS_PER_TARGET: usize = 2;

/// Trials per block, excluding the leading target.
pub const DEFAULT_NUM_TRIALS_PER_BLOCK: usize = 50;

/// Displayed stimulus edge length in pixels.
pub const DEFAULT_STIM_SIZE: u32 = 256;

/// Inter-trial interval (fixation cross), milliseconds.
pub const DEFAULT_ITI_DUR_MS: u32 = 1000;

/// Stimulus display duration, milliseconds.
pub const DEFAULT_STIM_DUR_MS: u32 = 200;

/// Mask / response window duration, milliseconds.
pub const DEFAULT_MASK_DUR_MS: u32 = 1500;

/// Physical keys offered for the yes/no mapping.
pub const DEFAULT_VALID_KEYS: [&str; 2] = ["j", "k"];

/// Environment variable holding an optional RNG seed.
pub const SEED_ENV_VAR: &str = "SAMEDIFF_SEED";

/// Environment variable holding the default config path.
pub const CONFIG_ENV_VAR: &str = "SAMEDIFF_CONFIG";
