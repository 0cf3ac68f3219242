//! Whole-session flow: config → specs → screens → responses → scores.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use samediff::config::ExperimentConfig;
use samediff::generator::generate_trial_specs;
use samediff::response::{feedback_text, ResponseRecord, ResponseSummary, ResponseType};
use samediff::timeline::{assemble_trials, Screen, Section, TrialDescriptor};
use samediff::types::{KeyMapping, Role};

const CONFIG: &str = r#"{
    "stimCondition": "baker",
    "maskCondition": "scramble",
    "numTargets": 3,
    "numBlocksPerTarget": 2,
    "numTrialsPerBlock": 6,
    "stimDir": "stims/",
    "maskDir": "masks/",
    "stimFnames": [
        "apron_bison.png", "apron_gong.png", "apron_clock.png", "apron_knife.png",
        "cannon_bison.png", "cannon_gong.png", "cannon_clock.png", "cannon_knife.png",
        "plane_bison.png", "plane_gong.png", "plane_clock.png", "plane_knife.png",
        "guitar_bison.png", "guitar_gong.png", "guitar_clock.png", "guitar_knife.png"
    ],
    "maskFnames": ["zebra1_lamp1.png", "kettle2_moon3.png", "ladder4_rope2.png"]
}"#;

fn session(section: Section, seed: u64) -> (ExperimentConfig, Vec<TrialDescriptor>, String, String) {
    let config = ExperimentConfig::from_json_str(CONFIG).unwrap();
    let mut rng = SmallRng::seed_from_u64(seed);
    let params = config.resolve(&mut rng).unwrap();
    let specs =
        generate_trial_specs(&config.stim_fnames, &config.generation_params(), &mut rng).unwrap();
    let screens = assemble_trials(section, &specs, &params, &config.mask_fnames, &mut rng).unwrap();
    let KeyMapping { yes, no } = params.key_mapping;
    (config, screens, yes, no)
}

#[test]
fn experiment_session_shape() {
    let (config, screens, _, _) = session(Section::Experiment, 10);
    let blocks = config.num_targets * config.num_blocks_per_target;
    let comparisons = blocks * config.num_trials_per_block;
    // instructions + per block (target, iti) + per comparison (stim, mask, iti)
    assert_eq!(screens.len(), 1 + blocks * 2 + comparisons * 3);

    let targets = screens
        .iter()
        .filter(|s| matches!(s, TrialDescriptor::TargetDisplay { .. }))
        .count();
    assert_eq!(targets, blocks);

    for screen in &screens {
        if let TrialDescriptor::MaskResponse {
            stimulus,
            prompt,
            trial_duration,
            data,
            ..
        } = screen
        {
            assert!(prompt.is_empty());
            assert_eq!(*trial_duration, 1500);
            let mask = data.mask_fname.as_deref().unwrap();
            assert!(!mask.contains(&data.shape) && !mask.contains(&data.texture));
            assert_eq!(stimulus, &Screen::Image(format!("masks/{mask}")));
            assert_eq!(data.kind, Role::Mask);
        }
    }
}

#[test]
fn demo_prompts_only_on_first_two_comparisons() {
    let (_, screens, yes, no) = session(Section::Demo, 4);
    let prompts: Vec<&String> = screens
        .iter()
        .filter_map(|s| match s {
            TrialDescriptor::MaskResponse { prompt, .. } => Some(prompt),
            _ => None,
        })
        .collect();
    assert!(prompts[0].contains("Ignore"));
    assert!(prompts[1].contains("Ignore"));
    assert!(prompts[2..].iter().all(|p| !p.contains("Ignore")));
    let cue = format!("'{yes}' for same, '{no}' for different");
    assert!(prompts.iter().all(|p| p.contains(&cue)));
}

#[test]
fn scoring_a_session() {
    let (_, screens, yes, no) = session(Section::Practice, 21);
    let mut records: Vec<ResponseRecord> = screens
        .iter()
        .filter_map(|s| s.response_record().cloned())
        .collect();

    // "same" to everything, except one missed response.
    for r in records.iter_mut() {
        r.response = Some(yes.clone());
    }
    records[0].response = None;

    for r in records.iter_mut() {
        r.assess(Some(yes.as_str()), Some(no.as_str())).unwrap();
    }

    let summary = ResponseSummary::from_records(&records);
    assert_eq!(summary.unassessed, 0);
    assert_eq!(summary.assessed(), records.len());
    assert_eq!(summary.no_response, 1);
    assert_eq!(summary.true_negative, 0);
    assert_eq!(summary.false_negative, 0);
    assert_eq!(summary.false_alarm_rate(), 1.0);
    assert_eq!(summary.hit_rate(), 1.0);

    let first = &records[0];
    assert_eq!(first.response_type, Some(ResponseType::NoResponse));
    assert_eq!(first.correct, Some(false));

    for r in &records[1..] {
        let exact = r.role == Some(Role::ExactMatch);
        assert_eq!(r.correct, Some(exact));
    }
}

#[test]
fn feedback_per_section() {
    let (_, screens, yes, no) = session(Section::Practice, 8);
    let mut record = screens
        .iter()
        .filter_map(|s| s.response_record().cloned())
        .find(|r| r.role == Some(Role::Filler))
        .unwrap();
    record.response = Some(yes.clone());
    let assessment = record.assess(Some(yes.as_str()), Some(no.as_str())).unwrap();
    assert_eq!(assessment.response_type, ResponseType::FalsePositive);

    let text = feedback_text(Section::Practice, &assessment, &yes, &no).unwrap();
    assert!(text.starts_with("Incorrect!"));
    assert!(feedback_text(Section::Experiment, &assessment, &yes, &no).is_none());
}

#[test]
fn records_survive_json() {
    let (_, screens, yes, no) = session(Section::Experiment, 2);
    let mut records: Vec<ResponseRecord> = screens
        .iter()
        .filter_map(|s| s.response_record().cloned())
        .collect();
    records[0].response = Some(no.clone());
    records[0].assess(Some(yes.as_str()), Some(no.as_str())).unwrap();

    let json = serde_json::to_string(&records).unwrap();
    let back: Vec<ResponseRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, records);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["type"], "mask");
    assert_eq!(value[0]["section"], "experiment");
    assert!(value[1].get("response_type").is_none());
}
