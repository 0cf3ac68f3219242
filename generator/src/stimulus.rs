//! Filename parsing: `<shape>_<texture>.<ext>` → [`StimulusItem`].

use crate::error::{Result, TrialError};
use crate::types::{StimCondition, StimKind, StimulusItem};

/// Keep ASCII letters only, in order (`bird5` → `bird`).
pub fn filter_alpha(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Parse one filename. Exactly one `.` in the name and exactly one `_` in
/// the stem are required.
pub fn parse_stimulus(fname: &str, condition: StimCondition) -> Result<StimulusItem> {
    let malformed = || TrialError::MalformedFilename {
        fname: fname.to_string(),
    };

    let dot_splits: Vec<&str> = fname.split('.').collect();
    if dot_splits.len() != 2 {
        return Err(malformed());
    }
    let underscore_splits: Vec<&str> = dot_splits[0].split('_').collect();
    if underscore_splits.len() != 2 {
        return Err(malformed());
    }
    let (shape, texture) = (underscore_splits[0], underscore_splits[1]);

    let kind = match condition {
        StimCondition::Baker => StimKind::Baker {},
        StimCondition::Gst => StimKind::Gst {
            shape_class: filter_alpha(shape),
            texture_class: filter_alpha(texture),
        },
    };

    Ok(StimulusItem {
        fname: fname.to_string(),
        shape: shape.to_string(),
        texture: texture.to_string(),
        kind,
    })
}

/// Parse every filename, preserving order. Fails on the first malformed name.
pub fn stim_properties<S: AsRef<str>>(
    fnames: &[S],
    condition: StimCondition,
) -> Result<Vec<StimulusItem>> {
    fnames
        .iter()
        .map(|f| parse_stimulus(f.as_ref(), condition))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_names_parse() {
        let items = stim_properties(
            &["binoculars_bison.png", "cannon_otter.png"],
            StimCondition::Baker,
        )
        .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].fname, "binoculars_bison.png");
        assert_eq!(items[0].shape, "binoculars");
        assert_eq!(items[0].texture, "bison");
        assert_eq!(items[1].shape, "cannon");
        assert_eq!(items[1].texture, "otter");
        assert_eq!(items[1].kind, StimKind::Baker {});
    }

    #[test]
    fn test_gst_names_get_classes() {
        let items = stim_properties(
            &["airplane2_bicycle1.png", "bird5_clock1.png"],
            StimCondition::Gst,
        )
        .unwrap();
        assert_eq!(items[0].classes(), Some(("airplane", "bicycle")));
        assert_eq!(items[1].shape, "bird5");
        assert_eq!(items[1].classes(), Some(("bird", "clock")));
    }

    #[test]
    fn test_malformed_names_fail() {
        for name in [
            "binoculars_bison.png.jpg",
            "binoculars_bison",
            "binoculars_bison_otter.png",
            "binocularsotter.png",
        ] {
            match parse_stimulus(name, StimCondition::Baker) {
                Err(TrialError::MalformedFilename { fname }) => assert_eq!(fname, name),
                other => panic!("expected MalformedFilename for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_first_malformed_name_aborts() {
        let err = stim_properties(&["a_b.png", "bad.name.png", "c_d.png"], StimCondition::Baker)
            .unwrap_err();
        assert_eq!(err.to_string(), "malformed filename: bad.name.png");
    }

    #[test]
    fn test_filter_alpha() {
        assert_eq!(filter_alpha("bird5"), "bird");
        assert_eq!(filter_alpha("a1b2c3"), "abc");
        assert_eq!(filter_alpha("123"), "");
    }
}
