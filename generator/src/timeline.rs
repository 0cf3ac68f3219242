//! Presentation timeline: trial specs expanded into the screens a
//! presentation runtime shows.
//!
//! Per block the sequence is
//! `target → fixation → (stimulus → mask/response → fixation)*`, preceded
//! by one instructions page for the section. Every screen carries its trial
//! data so the runtime can hand it back with the response attached.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ExperimentParams;
use crate::error::Result;
use crate::mask::{select_mask, MaskCondition};
use crate::response::ResponseRecord;
use crate::types::{Role, TrialSpec};

const FIXATION_HTML: &str = "<div style='font-size:50px; color:white'>+</div>";
const RESPONSE_CUE_HTML: &str = "<div style='font-size:50px; color:red'>+</div>";

/// Part of a session. Demo and practice give feedback; the experiment
/// does not.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Demo,
    Practice,
    Experiment,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Demo => "demo",
            Section::Practice => "practice",
            Section::Experiment => "experiment",
        }
    }

    fn welcome_page(&self) -> &'static str {
        match self {
            Section::Demo => {
                "<p>We will begin with a slowed-down PRACTICE section in which we will guide \
                 you through the task. Please pay close attention to the instructions.</p>\
                 <p>Press the <b>'Next'</b> button to proceed.</p>"
            }
            Section::Practice => {
                "Now we will do some more practice, this time a little faster."
            }
            Section::Experiment => {
                "<p>You have completed the practice session. Everything you see after this \
                 is the <b>real experiment</b>. The images will be faster than before.</p>"
            }
        }
    }
}

/// What a screen displays.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Path of an image file.
    Image(String),
    Html(String),
}

/// Payload of the fixation cross between trials.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct FixationData {
    #[serde(rename = "type")]
    pub kind: Role,
    pub trial_num: Option<usize>,
    pub block_num: Option<usize>,
    pub section: Section,
}

/// Payload of a target or comparison stimulus screen.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct DisplayData {
    #[serde(flatten)]
    pub spec: TrialSpec,
    #[serde(rename = "type")]
    pub kind: Role,
    pub section: Section,
}

/// One screen of the session.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrialDescriptor {
    Instructions {
        pages: Vec<String>,
        show_clickable_nav: bool,
    },
    /// Fixation cross; no keys accepted.
    Fixation {
        stimulus: Screen,
        trial_duration: u32,
        data: FixationData,
    },
    /// Study screen; any key continues.
    TargetDisplay {
        stimulus: Screen,
        stimulus_size: u32,
        prompt: String,
        data: DisplayData,
    },
    /// Comparison stimulus; no keys accepted.
    StimulusDisplay {
        stimulus: Screen,
        stimulus_size: u32,
        prompt: String,
        trial_duration: u32,
        data: DisplayData,
    },
    /// Mask or response cue; the same/different answer is collected here.
    MaskResponse {
        stimulus: Screen,
        stimulus_size: u32,
        prompt: String,
        trial_duration: u32,
        data: ResponseRecord,
    },
}

impl TrialDescriptor {
    /// The response record carried by a mask screen.
    pub fn response_record(&self) -> Option<&ResponseRecord> {
        match self {
            TrialDescriptor::MaskResponse { data, .. } => Some(data),
            _ => None,
        }
    }
}

fn target_prompt(yes: &str, no: &str) -> String {
    format!(
        "<p>Please look carefully at the image above.</p><p>You are about to see a series \
         of images. For each image, press the <b>{yes}</b> key if the image is <b>exactly</b> \
         the same as <b>this one</b>, and the <b>{no}</b> key if it is not.</p><p>Respond as \
         quickly and accurately as possible. In between images, look at the white cross. \
         Remember to take a close look at the image above before you start.</p><p>When you \
         are ready, press any key to begin.</p>"
    )
}

/// Expand `specs` into the screens of one section.
pub fn assemble_trials<S: AsRef<str>, R: Rng + ?Sized>(
    section: Section,
    specs: &[TrialSpec],
    params: &ExperimentParams,
    mask_names: &[S],
    rng: &mut R,
) -> Result<Vec<TrialDescriptor>> {
    let yes = params.key_mapping.yes.as_str();
    let no = params.key_mapping.no.as_str();
    let is_demo = section == Section::Demo;

    let mut trials = Vec::with_capacity(1 + specs.len() * 3);
    trials.push(TrialDescriptor::Instructions {
        pages: vec![section.welcome_page().to_string()],
        show_clickable_nav: true,
    });

    let mut comparisons_shown = 0usize;
    for spec in specs {
        let mut fixation_html = FIXATION_HTML.to_string();
        if is_demo {
            fixation_html.push_str("<p>Look at the cross.</p>");
        }
        let fixation = TrialDescriptor::Fixation {
            stimulus: Screen::Html(fixation_html),
            trial_duration: params.iti_dur,
            data: FixationData {
                kind: Role::Iti,
                trial_num: spec.trial_num,
                block_num: spec.block_num,
                section,
            },
        };
        let stim_path = format!("{}{}", params.stim_dir, spec.fname());

        if spec.role == Role::Target {
            trials.push(TrialDescriptor::TargetDisplay {
                stimulus: Screen::Image(stim_path),
                stimulus_size: params.stim_size,
                prompt: target_prompt(yes, no),
                data: DisplayData {
                    spec: spec.clone(),
                    kind: Role::Target,
                    section,
                },
            });
            trials.push(fixation);
            continue;
        }

        let stim_prompt = if is_demo {
            "<p>Exactly the same as the target?</p>".to_string()
        } else {
            String::new()
        };
        trials.push(TrialDescriptor::StimulusDisplay {
            stimulus: Screen::Image(stim_path),
            stimulus_size: params.stim_size,
            prompt: stim_prompt,
            trial_duration: params.stim_dur,
            data: DisplayData {
                spec: spec.clone(),
                kind: Role::Option,
                section,
            },
        });

        let mask_name = select_mask(params.mask_condition, mask_names, &spec.item, rng)?;
        let mut mask_prompt = String::new();
        if is_demo {
            if comparisons_shown < 2 && params.mask_condition != MaskCondition::NoMask {
                mask_prompt.push_str("<p>(Ignore the image above.)</p>");
            }
            mask_prompt.push_str(&format!(
                "<p>Respond now ('{yes}' for same, '{no}' for different)</p>"
            ));
        }
        let stimulus = match mask_name {
            Some(name) => Screen::Image(format!("{}{}", params.mask_dir, name)),
            None => Screen::Html(RESPONSE_CUE_HTML.to_string()),
        };
        trials.push(TrialDescriptor::MaskResponse {
            stimulus,
            stimulus_size: params.stim_size,
            prompt: mask_prompt,
            trial_duration: params.mask_dur,
            data: ResponseRecord::from_spec(spec, section, mask_name.map(str::to_string)),
        });
        trials.push(fixation);
        comparisons_shown += 1;
    }

    debug!(
        section = section.as_str(),
        specs = specs.len(),
        screens = trials.len(),
        "assembled timeline"
    );
    Ok(trials)
}
