//! # samediff: trial sequencing for a same/different memory task
//!
//! Builds the trial sequence for a visual matching experiment: a participant
//! studies a target image, then sees a stream of images and answers "exactly
//! the same as the target?" for each one. Stimuli are named
//! `<shape>_<texture>.<ext>`, so every non-target image relates to the target
//! in one of three ways:
//!
//! | Role | Relation to target |
//! |------|--------------------|
//! | exact match | same file |
//! | shape lure | same shape, different texture |
//! | texture lure | same texture, different shape |
//! | filler | neither attribute shared |
//!
//! ## Pipeline
//!
//! | Step | Module | Description |
//! |------|--------|-------------|
//! | 1 | [`stimulus`] | Parse filenames into [`types::StimulusItem`]s |
//! | 2 | [`megablock::trial_types_per_megablock`] | Per-target quotas: 50% exact match, remainder split three ways |
//! | 3 | [`roles`] | Partition the pool into lure/filler options for one target |
//! | 4 | [`megablock`] | Sample the target's full trial set and split it into blocks |
//! | 5 | [`generator`] | Shuffle blocks across targets and number them |
//! | 6 | [`timeline`] | Expand specs into presentation descriptors |
//! | 7 | [`response`] | Score a keypress into a signal-detection category |
//!
//! Every sampling function takes `&mut R where R: rand::Rng`; a seeded
//! `SmallRng` makes a whole run reproducible.

pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod mask;
pub mod megablock;
pub mod response;
pub mod roles;
pub mod sampling;
pub mod stimulus;
pub mod timeline;
pub mod types;

pub use error::{Result, TrialError};
