//! Core data model: stimulus items, trial specs, blocks, and key mappings.
//!
//! A [`StimulusItem`] is parsed once from its filename and never mutated.
//! [`TrialSpec`]s own a clone of their item, so later per-trial edits
//! (block and trial numbering) never leak between trials.

use serde::{Deserialize, Serialize};

// ── Stimulus condition ──

/// Which stimulus set is in use.
///
/// `Gst` stimuli carry per-instance numeric suffixes (`bird5`), so lure and
/// filler selection also compares the alphabetic class (`bird`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StimCondition {
    Baker,
    Gst,
}

impl StimCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            StimCondition::Baker => "baker",
            StimCondition::Gst => "gst",
        }
    }
}

/// Condition-specific attributes of a stimulus.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StimKind {
    Gst {
        shape_class: String,
        texture_class: String,
    },
    Baker {},
}

// ── Stimulus item ──

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct StimulusItem {
    pub fname: String,
    pub shape: String,
    pub texture: String,
    #[serde(flatten)]
    pub kind: StimKind,
}

impl StimulusItem {
    pub fn condition(&self) -> StimCondition {
        match self.kind {
            StimKind::Gst { .. } => StimCondition::Gst,
            StimKind::Baker {} => StimCondition::Baker,
        }
    }

    /// `(shape_class, texture_class)` for gst items, `None` for baker items.
    pub fn classes(&self) -> Option<(&str, &str)> {
        match &self.kind {
            StimKind::Gst {
                shape_class,
                texture_class,
            } => Some((shape_class.as_str(), texture_class.as_str())),
            StimKind::Baker {} => None,
        }
    }

    /// Substrings a scramble mask must not contain for this item.
    pub fn mask_exclusions(&self) -> (&str, &str) {
        self.classes()
            .unwrap_or((self.shape.as_str(), self.texture.as_str()))
    }
}

// ── Role ──

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Target,
    ExactMatch,
    ShapeLure,
    TextureLure,
    Filler,
    Option,
    Mask,
    Iti,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Target => "target",
            Role::ExactMatch => "exactMatch",
            Role::ShapeLure => "shapeLure",
            Role::TextureLure => "textureLure",
            Role::Filler => "filler",
            Role::Option => "option",
            Role::Mask => "mask",
            Role::Iti => "iti",
        }
    }

    /// Roles that a generated trial sequence is made of.
    pub const GENERATED: [Role; 5] = [
        Role::Target,
        Role::ExactMatch,
        Role::ShapeLure,
        Role::TextureLure,
        Role::Filler,
    ];
}

// ── Trial spec ──

/// One generated trial: a stimulus, its role, and the target it belongs to.
///
/// `block_num` and `trial_num` stay `None` until the generator numbers the
/// final shuffled sequence.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TrialSpec {
    #[serde(flatten)]
    pub item: StimulusItem,
    /// Filename of the associated target; `None` on the target trial itself.
    pub target: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_num: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trial_num: Option<usize>,
}

impl TrialSpec {
    /// The target trial that opens every block.
    pub fn target(item: &StimulusItem) -> Self {
        Self {
            item: item.clone(),
            target: None,
            role: Role::Target,
            block_num: None,
            trial_num: None,
        }
    }

    /// A trial showing `item` in `role` relative to `target`.
    pub fn for_target(item: &StimulusItem, target: &StimulusItem, role: Role) -> Self {
        Self {
            item: item.clone(),
            target: Some(target.fname.clone()),
            role,
            block_num: None,
            trial_num: None,
        }
    }

    pub fn fname(&self) -> &str {
        &self.item.fname
    }
}

/// A target trial followed by its shuffled comparison trials.
pub type Block = Vec<TrialSpec>;

// ── Key mapping ──

/// Which physical key means "same" and which means "different".
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyMapping {
    pub yes: String,
    pub no: String,
}
