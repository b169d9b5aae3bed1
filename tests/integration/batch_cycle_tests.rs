//! End-to-end batch cycle tests
//!
//! Upload, processing wait and retrieval against a mock object store.

#[cfg(test)]
mod tests {
    use crate::common::assertions::{BatchAssertions, expect_batch_upload_error};
    use crate::common::fixtures::png_bytes;
    use crate::common::{BatchFactory, ConfigFactory, MockStore};
    use product_optimizer::{
        ArtifactDownloader, BatchCoordinator, BatchStatus, FileHandle, OptimizerError,
        UploadFailure,
    };
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    // ==================== Happy Path ====================

    #[tokio::test]
    async fn test_full_cycle_uploads_waits_and_downloads() {
        let store = MockStore::start().await;
        Mock::given(method("PUT"))
            .and(path("/upload/abc123-reference-logo.png"))
            .and(header("content-type", "image/png"))
            .and(body_bytes(png_bytes(64)))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&store.server)
            .await;
        store.expect_put("abc123-product-1-a.png", 200).await;
        store.expect_put("abc123-product-2-b.png", 201).await;
        store.serve_bundle("abc123", b"zip bytes").await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        let report = coordinator.run(&mut batch).await.unwrap();
        assert_eq!(report.keys.len(), 3);
        assert_eq!(report.total_bytes, 64 + 128 + 256);
        assert_eq!(batch.status(), BatchStatus::Ready);

        let location = coordinator.retrieve(&mut batch).unwrap();
        assert_eq!(
            location.as_str(),
            format!("{}/artifacts/abc123/scaled/abc123_scaled.zip", store.uri())
        );
        batch.assert_fresh();

        let dir = tempfile::tempdir().unwrap();
        let written = ArtifactDownloader::new(None)
            .unwrap()
            .download(&location, dir.path())
            .await
            .unwrap();
        assert_eq!(written, dir.path().join("abc123_scaled.zip"));
        assert_eq!(tokio::fs::read(&written).await.unwrap(), b"zip bytes");
    }

    #[tokio::test]
    async fn test_filenames_are_percent_encoded() {
        let store = MockStore::start().await;
        store
            .expect_put("abc123-product-1-summer%20sale%20%231.png", 200)
            .await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::empty();
        batch
            .select_products(vec![FileHandle::new("summer sale #1.png", png_bytes(16))])
            .unwrap();

        let report = coordinator.upload_all(&mut batch).await.unwrap();
        assert_eq!(report.keys[0].as_str(), "abc123-product-1-summer sale #1.png");
    }

    #[tokio::test]
    async fn test_polling_waits_for_bundle() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 200).await;
        store.expect_put("abc123-product-1-a.png", 200).await;
        store.expect_put("abc123-product-2-b.png", 200).await;
        store.bundle_appears_after("abc123", 2).await;

        let config = ConfigFactory::polling(&store.uri(), 10);
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        coordinator.run(&mut batch).await.unwrap();
        assert_eq!(batch.status(), BatchStatus::Ready);

        let probes = store
            .requests()
            .await
            .into_iter()
            .filter(|(method, _)| method == "HEAD")
            .count();
        assert_eq!(probes, 3);
    }

    #[tokio::test]
    async fn test_polling_gives_up_after_max_attempts() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 200).await;
        store.expect_put("abc123-product-1-a.png", 200).await;
        store.expect_put("abc123-product-2-b.png", 200).await;
        store.bundle_appears_after("abc123", 100).await;

        let config = ConfigFactory::polling(&store.uri(), 3);
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        let err = coordinator.run(&mut batch).await.unwrap_err();

        assert!(matches!(err, OptimizerError::ProcessingTimeout { .. }));
        assert!(err.is_retryable());
        batch.assert_retryable_with(3);
    }

    // ==================== Failure Paths ====================

    #[tokio::test]
    async fn test_product_500_fails_batch() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 200).await;
        store.expect_put("abc123-product-1-a.png", 500).await;
        store.expect_put("abc123-product-2-b.png", 200).await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        let failure = expect_batch_upload_error(coordinator.upload_all(&mut batch).await.unwrap_err());

        assert_eq!(failure.failed_keys.len(), 1);
        assert_eq!(failure.failed_keys[0].as_str(), "abc123-product-1-a.png");
        assert_eq!(failure.errors[0].cause, UploadFailure::Status(500));
        assert_eq!(failure.succeeded_keys.len(), 2);
        assert_ne!(batch.status(), BatchStatus::Ready);
        batch.assert_retryable_with(3);

        // No compensating deletes without the cleanup policy
        assert!(
            store
                .requests()
                .await
                .iter()
                .all(|(method, _)| method == "PUT")
        );
    }

    #[tokio::test]
    async fn test_reference_failure_prevents_product_uploads() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 403).await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        let failure = expect_batch_upload_error(coordinator.upload_all(&mut batch).await.unwrap_err());

        assert_eq!(failure.skipped_keys.len(), 2);
        assert_eq!(store.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_policy_deletes_uploaded_objects() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 200).await;
        store.expect_put("abc123-product-1-a.png", 200).await;
        store.expect_put("abc123-product-2-b.png", 503).await;
        store.allow_delete("abc123-reference-logo.png").await;
        store.allow_delete("abc123-product-1-a.png").await;

        let config = ConfigFactory::with_cleanup(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();

        let failure = expect_batch_upload_error(coordinator.upload_all(&mut batch).await.unwrap_err());
        assert!(failure.cleanup_failed_keys.is_empty());

        let mut deleted: Vec<String> = store
            .requests()
            .await
            .into_iter()
            .filter(|(method, _)| method == "DELETE")
            .map(|(_, path)| path)
            .collect();
        deleted.sort();
        assert_eq!(
            deleted,
            vec![
                "/upload/abc123-product-1-a.png",
                "/upload/abc123-reference-logo.png"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_files_selected_makes_no_requests() {
        let store = MockStore::start().await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::empty();

        let err = coordinator.upload_all(&mut batch).await.unwrap_err();

        assert!(matches!(err, OptimizerError::NoFilesSelected));
        assert!(store.requests().await.is_empty());
        batch.assert_fresh();
    }

    #[tokio::test]
    async fn test_retrieve_does_not_check_existence() {
        let store = MockStore::start().await;
        store.expect_put("abc123-reference-logo.png", 200).await;
        store.expect_put("abc123-product-1-a.png", 200).await;
        store.expect_put("abc123-product-2-b.png", 200).await;

        let config = ConfigFactory::fixed_delay(&store.uri());
        let coordinator = BatchCoordinator::from_config(&config).unwrap();
        let mut batch = BatchFactory::abc123();
        coordinator.run(&mut batch).await.unwrap();

        let location = coordinator.retrieve(&mut batch).unwrap();
        batch.assert_fresh();

        // The missing bundle only shows up when fetching it
        let dir = tempfile::tempdir().unwrap();
        let err = ArtifactDownloader::new(None)
            .unwrap()
            .download(&location, dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, OptimizerError::Artifact(_)));
    }
}
