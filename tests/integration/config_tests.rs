//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use product_optimizer::config::{ProcessingConfig, Validate};
    use product_optimizer::{BatchCoordinator, Config, OptimizerError};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_file_and_build_coordinator() {
        let yaml = ConfigFactory::yaml(
            "https://store.example.com",
            "type: push_notification\n  timeout_secs: 120",
            false,
        );
        let file = write_config(&yaml);

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.upload().timeout(), Some(Duration::from_secs(5)));
        assert!(matches!(
            config.processing(),
            ProcessingConfig::PushNotification(_)
        ));

        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        assert!(coordinator.notifier().is_some());
        assert_eq!(
            coordinator.locator().base_url().as_str(),
            "https://store.example.com/artifacts"
        );
    }

    #[tokio::test]
    async fn test_fixed_delay_has_no_notifier() {
        let config = ConfigFactory::fixed_delay("http://127.0.0.1:9");
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        assert!(coordinator.notifier().is_none());
    }

    #[tokio::test]
    async fn test_invalid_file_is_rejected() {
        let file = write_config(
            r#"
endpoints:
  upload_base_url: "ftp://store.example.com/upload"
"#,
        );

        let err = Config::from_file(file.path()).await.unwrap_err();
        match err {
            OptimizerError::Config(msg) => assert!(msg.contains("Upload base URL")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_load_without_file_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert!(config.optimizer.validate().is_ok());
    }

    #[test]
    fn test_yaml_round_trip_of_polling_config() {
        let config = ConfigFactory::polling("https://store.example.com", 7);
        let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }
}
