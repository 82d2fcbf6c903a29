use clap::Parser;
use earth_viewer::cli::Cli;
use earth_viewer::{ParamValue, Variant, ViewerConfig};
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.variant, Variant::Full);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.textures_dir, PathBuf::from("textures"));
        assert!(config.show_ui);
        assert!(config.params.is_empty());
    }

    #[test]
    fn test_full_config_file() {
        let json = r#"{
            "window": { "title": "Blue Marble", "width": 1280, "height": 720 },
            "variant": "minimal",
            "textures_dir": "assets/earth",
            "show_ui": false,
            "params": { "sunIntensity": 3.5, "cloudsVisible": false }
        }"#;
        let config = ViewerConfig::from_json(json).unwrap();

        assert_eq!(config.window.title, "Blue Marble");
        assert_eq!(config.variant, Variant::Minimal);
        assert_eq!(config.textures_dir, PathBuf::from("assets/earth"));
        assert!(!config.show_ui);
        assert_eq!(config.params["sunIntensity"], ParamValue::Float(3.5));
        assert_eq!(config.params["cloudsVisible"], ParamValue::Bool(false));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = ViewerConfig::load(&PathBuf::from("/nonexistent/viewer.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("viewer.json"));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("earth_viewer_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "variant": "minimal" }"#).unwrap();

        let config = ViewerConfig::load(&path).unwrap();
        assert_eq!(config.variant, Variant::Minimal);

        std::fs::remove_file(path).ok();
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_file_values() {
        let cli = Cli::parse_from(["earth-viewer"]);
        let base = ViewerConfig::from_json(r#"{ "variant": "minimal", "show_ui": false }"#).unwrap();
        let config = base.clone().with_cli(&cli);
        assert_eq!(config, base);
    }

    #[test]
    fn test_flags_override_file_values() {
        let cli = Cli::parse_from([
            "earth-viewer",
            "--variant",
            "full",
            "--textures",
            "/data/textures",
            "--width",
            "1024",
            "--no-ui",
        ]);
        let base = ViewerConfig::from_json(r#"{ "variant": "minimal", "window": { "width": 640 } }"#).unwrap();
        let config = base.with_cli(&cli);

        assert_eq!(config.variant, Variant::Full);
        assert_eq!(config.textures_dir, PathBuf::from("/data/textures"));
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(!config.show_ui);
    }

    #[test]
    fn test_resolve_without_config_file() {
        let cli = Cli::parse_from(["earth-viewer", "--variant", "minimal"]);
        let config = ViewerConfig::resolve(&cli).unwrap();
        assert_eq!(config.variant, Variant::Minimal);
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        assert!(Cli::try_parse_from(["earth-viewer", "--variant", "moon"]).is_err());
    }
}
