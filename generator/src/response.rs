//! Response scoring: keypress + role → signal-detection category.
//!
//! | Role | yes key | no key | other key | none |
//! |------|---------|--------|-----------|------|
//! | exactMatch | truePositive | falseNegative | wrongKey | noResponse |
//! | any other | falsePositive | trueNegative | wrongKey | noResponse |
//!
//! Classification ([`classify_response`]) is pure. Writing the result onto a
//! record ([`ResponseRecord::assess`]) and turning it into participant
//! feedback ([`feedback_text`]) are separate steps.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrialError};
use crate::timeline::Section;
use crate::types::{Role, TrialSpec};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseType {
    TruePositive,
    FalseNegative,
    FalsePositive,
    TrueNegative,
    WrongKey,
    NoResponse,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::TruePositive => "truePositive",
            ResponseType::FalseNegative => "falseNegative",
            ResponseType::FalsePositive => "falsePositive",
            ResponseType::TrueNegative => "trueNegative",
            ResponseType::WrongKey => "wrongKey",
            ResponseType::NoResponse => "noResponse",
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, ResponseType::TruePositive | ResponseType::TrueNegative)
    }
}

/// Outcome of scoring one response.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Assessment {
    pub response_type: ResponseType,
    pub correct: bool,
}

/// Score `response` for a trial with `role`.
///
/// Fails if either key is unset or the role is missing.
pub fn classify_response(
    role: Option<Role>,
    response: Option<&str>,
    yes_key: Option<&str>,
    no_key: Option<&str>,
) -> std::result::Result<Assessment, ClassifyError> {
    let yes_key = yes_key.ok_or(ClassifyError::UndefinedKey("yes"))?;
    let no_key = no_key.ok_or(ClassifyError::UndefinedKey("no"))?;
    let role = role.ok_or(ClassifyError::MissingRole)?;

    let response_type = match response {
        None => ResponseType::NoResponse,
        Some(key) if key != yes_key && key != no_key => ResponseType::WrongKey,
        Some(key) => match (role == Role::ExactMatch, key == yes_key) {
            (true, true) => ResponseType::TruePositive,
            (true, false) => ResponseType::FalseNegative,
            (false, true) => ResponseType::FalsePositive,
            (false, false) => ResponseType::TrueNegative,
        },
    };
    Ok(Assessment {
        response_type,
        correct: response_type.is_correct(),
    })
}

/// Why [`classify_response`] refused to score.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ClassifyError {
    UndefinedKey(&'static str),
    MissingRole,
}

// ── Response record ──

/// Data captured on the mask/response screen of one comparison trial.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(rename = "type")]
    pub kind: Role,
    pub mask_fname: Option<String>,
    pub fname: String,
    pub shape: String,
    pub texture: String,
    pub role: Option<Role>,
    pub target: Option<String>,
    pub trial_num: Option<usize>,
    pub block_num: Option<usize>,
    pub section: Section,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}

impl ResponseRecord {
    pub fn from_spec(spec: &TrialSpec, section: Section, mask_fname: Option<String>) -> Self {
        Self {
            kind: Role::Mask,
            mask_fname,
            fname: spec.item.fname.clone(),
            shape: spec.item.shape.clone(),
            texture: spec.item.texture.clone(),
            role: Some(spec.role),
            target: spec.target.clone(),
            trial_num: spec.trial_num,
            block_num: spec.block_num,
            section,
            response: None,
            response_type: None,
            correct: None,
        }
    }

    /// Score the recorded response and store the result on the record.
    pub fn assess(&mut self, yes_key: Option<&str>, no_key: Option<&str>) -> Result<Assessment> {
        let assessment = classify_response(self.role, self.response.as_deref(), yes_key, no_key)
            .map_err(|e| match e {
                ClassifyError::UndefinedKey(which) => TrialError::UndefinedKey { which },
                ClassifyError::MissingRole => TrialError::MissingRole {
                    fname: self.fname.clone(),
                },
            })?;
        self.response_type = Some(assessment.response_type);
        self.correct = Some(assessment.correct);
        Ok(assessment)
    }
}

// ── Feedback ──

/// Message shown after a demo or practice response; `None` in the real
/// experiment, which never interrupts.
pub fn feedback_text(
    section: Section,
    assessment: &Assessment,
    yes_key: &str,
    no_key: &str,
) -> Option<String> {
    if section == Section::Experiment {
        return None;
    }
    if assessment.correct {
        return Some("Correct.".to_string());
    }
    let reminder = format!(
        "Remember to press the '{yes_key}' key if the image is exactly the same as the \
         target, and the '{no_key}' key if it is not."
    );
    let lead = match assessment.response_type {
        ResponseType::NoResponse => "No key press detected.",
        ResponseType::WrongKey => "Invalid key.",
        _ => "Incorrect!",
    };
    Some(format!("{lead} {reminder}"))
}

// ── Summary ──

/// Tally of assessed responses.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ResponseSummary {
    pub true_positive: usize,
    pub false_negative: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub wrong_key: usize,
    pub no_response: usize,
    /// Records without a `response_type`.
    pub unassessed: usize,
}

impl ResponseSummary {
    pub fn from_records(records: &[ResponseRecord]) -> Self {
        let mut s = Self::default();
        for r in records {
            match r.response_type {
                Some(ResponseType::TruePositive) => s.true_positive += 1,
                Some(ResponseType::FalseNegative) => s.false_negative += 1,
                Some(ResponseType::FalsePositive) => s.false_positive += 1,
                Some(ResponseType::TrueNegative) => s.true_negative += 1,
                Some(ResponseType::WrongKey) => s.wrong_key += 1,
                Some(ResponseType::NoResponse) => s.no_response += 1,
                None => s.unassessed += 1,
            }
        }
        s
    }

    pub fn assessed(&self) -> usize {
        self.true_positive
            + self.false_negative
            + self.false_positive
            + self.true_negative
            + self.wrong_key
            + self.no_response
    }

    /// Fraction of assessed responses that were correct.
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.assessed())
    }

    /// P(yes | exact match), over yes/no answers only.
    pub fn hit_rate(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// P(yes | non-match), over yes/no answers only.
    pub fn false_alarm_rate(&self) -> f64 {
        ratio(self.false_positive, self.false_positive + self.true_negative)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
