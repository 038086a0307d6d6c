#[cfg(test)]
mod tests {
    use super::super::*;

    #[test]
    fn test_defaults_point_at_gdc_exports() {
        let config = ExplorerConfig::default();
        assert_eq!(config.data.clinical_path, PathBuf::from("clinical.tsv"));
        assert_eq!(config.data.family_history_path, PathBuf::from("family_history.tsv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_cancers_keep_gdc_labels() {
        let cancers = default_cancers();
        assert_eq!(cancers.len(), 8);
        assert!(cancers.contains(&"Breast, NOS".to_string()));
        assert!(cancers.contains(&"Upper lobe, lung".to_string()));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = ExplorerConfig::from_toml_str(
            r#"
            [data]
            clinical_path = "/srv/tcga/clinical.tsv"

            [limits]
            slow_query_ms = 50
            "#,
        )
        .unwrap();
        assert_eq!(config.data.clinical_path, PathBuf::from("/srv/tcga/clinical.tsv"));
        assert_eq!(config.data.family_history_path, PathBuf::from("family_history.tsv"));
        assert_eq!(config.limits.slow_query_ms, 50);
        assert_eq!(config.limits.max_file_bytes, default_max_file_bytes());
        assert_eq!(config.web.bind, default_bind());
    }

    #[test]
    fn test_zero_file_limit_rejected() {
        let result = ExplorerConfig::from_toml_str("[limits]\nmax_file_bytes = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tcga-explorer.toml");
        std::fs::write(&path, "[web]\nbind = \"0.0.0.0:9000\"\n").unwrap();
        let config = ExplorerConfig::from_file(&path).unwrap();
        assert_eq!(config.web.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_example_config_parses() {
        let config = ExplorerConfig::from_toml_str(include_str!("../../../../tcga-explorer.example.toml")).unwrap();
        assert_eq!(config.overview.default_cancers, default_cancers());
        assert_eq!(config.limits.max_file_bytes, default_max_file_bytes());
        assert_eq!(config.web.bind, default_bind());
    }
}
