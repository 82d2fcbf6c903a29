use earth_viewer::params::{ParamKind, ParamSpec, ParamValue};
use earth_viewer::scenes::earth::EARTH_PARAMS;
use earth_viewer::{ControlPanel, SceneComposer, TextureLoader, Variant, Viewport};

fn composer(variant: Variant) -> SceneComposer {
    let loader = TextureLoader::new("/nonexistent/earth-viewer/textures");
    SceneComposer::initialize(Viewport::new(800, 600), variant, &loader)
}

#[cfg(test)]
mod control_panel_tests {
    use super::*;

    #[test]
    fn test_panel_defaults() {
        let panel = ControlPanel::default();
        assert_eq!(panel.title, "Controls");
        assert!(panel.visible);
        assert!(!ControlPanel::new(false).visible);
    }

    #[test]
    fn test_submit_clamps_above_range() {
        let mut composer = composer(Variant::Full);
        let applied = ControlPanel::default()
            .submit(&mut composer, "sunIntensity", ParamValue::Float(9.0))
            .unwrap();

        assert_eq!(applied, ParamValue::Float(5.0));
        assert_eq!(composer.params().float("sunIntensity"), Some(5.0));
    }

    #[test]
    fn test_submit_clamps_below_range() {
        let mut composer = composer(Variant::Full);
        let applied = ControlPanel::default()
            .submit(&mut composer, "earthRotation", ParamValue::Float(-1.0))
            .unwrap();

        assert_eq!(applied, ParamValue::Float(0.0));
        assert_eq!(composer.params().float("earthRotation"), Some(0.0));
    }

    #[test]
    fn test_submit_snaps_to_step() {
        let mut composer = composer(Variant::Full);
        let applied = ControlPanel::default()
            .submit(&mut composer, "sunIntensity", ParamValue::Float(2.34))
            .unwrap();

        let value = applied.as_float().unwrap();
        assert!((value - 2.3).abs() < 1e-5, "got {}", value);
    }

    #[test]
    fn test_submit_rejects_unknown_and_mistyped() {
        let mut composer = composer(Variant::Full);
        let panel = ControlPanel::default();

        assert!(panel
            .submit(&mut composer, "moonPhase", ParamValue::Float(0.5))
            .is_err());
        assert!(panel
            .submit(&mut composer, "cloudOpacity", ParamValue::Bool(true))
            .is_err());
        assert_eq!(composer.params().float("cloudOpacity"), Some(0.5));
    }

    #[test]
    fn test_minimal_variant_labels() {
        let composer = composer(Variant::Minimal);
        let labels: Vec<_> = composer.params().specs().iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["Rotation Speed", "Sun Intensity"]);
    }
}

#[cfg(test)]
mod param_spec_tests {
    use super::*;

    #[test]
    fn test_full_variant_declares_six_controls() {
        let names: Vec<_> = EARTH_PARAMS.iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "earthRotation",
                "cloudRotation",
                "cloudOpacity",
                "cloudsVisible",
                "sunIntensity",
                "atmosphereOpacity",
            ]
        );
    }

    #[test]
    fn test_defaults_lie_within_ranges() {
        for spec in EARTH_PARAMS.iter() {
            if let (ParamKind::Float { min, max, .. }, ParamValue::Float(v)) = (spec.kind, spec.default) {
                assert!((min..=max).contains(&v), "{} default out of range", spec.name);
            }
            assert!(spec.constrain(spec.default).is_some());
        }
    }

    #[test]
    fn test_toggle_passes_through_unchanged() {
        let spec = ParamSpec::toggle("cloudsVisible", "Show Clouds", true);
        assert_eq!(spec.constrain(ParamValue::Bool(false)), Some(ParamValue::Bool(false)));
        assert_eq!(spec.constrain(ParamValue::Float(0.0)), None);
    }

    #[test]
    fn test_param_values_deserialize_untagged() {
        let float: ParamValue = serde_json::from_str("0.25").unwrap();
        let flag: ParamValue = serde_json::from_str("false").unwrap();
        assert_eq!(float, ParamValue::Float(0.25));
        assert_eq!(flag, ParamValue::Bool(false));
    }
}
