use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrialError>;

/// Every failure the generator and scorer can report.
///
/// All of these are configuration or programming errors: they are raised
/// before any trial is shown and are never retried.
#[derive(Debug, Error)]
pub enum TrialError {
    #[error("malformed filename: {fname}")]
    MalformedFilename { fname: String },

    #[error("empty input: {what}")]
    EmptyInput { what: &'static str },

    #[error("too many samples requested: {requested} > {available} available")]
    TooManyRequested { requested: usize, available: usize },

    #[error(
        "infeasible trial parameters: {blocks_per_target} blocks x {trials_per_block} trials is odd"
    )]
    InfeasibleTrialParameters {
        blocks_per_target: usize,
        trials_per_block: usize,
    },

    #[error("infeasible num blocks per target: {trials} trials cannot split into {blocks} blocks")]
    InfeasibleBlockCount { trials: usize, blocks: usize },

    #[error("empty shape lures for target {target}")]
    EmptyShapeLures { target: String },

    #[error("empty texture lures for target {target}")]
    EmptyTextureLures { target: String },

    #[error("empty fillers for target {target}")]
    EmptyFillers { target: String },

    #[error("expects exactly 2 valid keys, got {got}")]
    InvalidKeyCount { got: usize },

    #[error("{which} key is undefined")]
    UndefinedKey { which: &'static str },

    #[error("missing role for {fname}")]
    MissingRole { fname: String },

    #[error("no mask in a pool of {pool} avoids shape '{shape}' and texture '{texture}'")]
    MaskSamplingExhausted {
        shape: String,
        texture: String,
        pool: usize,
    },

    #[error("config: {0}")]
    Config(String),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
