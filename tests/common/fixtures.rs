//! Test fixtures and data factories

use product_optimizer::{Batch, BatchId, Config, FileHandle};

/// PNG signature followed by filler, enough for MIME sniffing by extension
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len.max(bytes.len()), 0xAB);
    bytes
}

/// Factory for batches with known identities
pub struct BatchFactory;

impl BatchFactory {
    /// Empty batch with id `abc123`
    pub fn empty() -> Batch {
        Batch::with_id(BatchId::parse("abc123").unwrap())
    }

    /// `abc123` with reference `logo.png` and products `a.png`, `b.png`
    pub fn abc123() -> Batch {
        let mut batch = Self::empty();
        batch
            .select_reference(FileHandle::new("logo.png", png_bytes(64)).with_content_type("image/png"))
            .unwrap();
        batch
            .select_products(vec![
                FileHandle::new("a.png", png_bytes(128)).with_content_type("image/png"),
                FileHandle::new("b.png", png_bytes(256)).with_content_type("image/png"),
            ])
            .unwrap();
        batch
    }
}

/// Factory for configurations pointing at a mock server
pub struct ConfigFactory;

impl ConfigFactory {
    /// Fixed delay of zero seconds, no cleanup
    pub fn fixed_delay(base_uri: &str) -> Config {
        Self::from_processing(base_uri, "type: fixed_delay\n  delay_secs: 0", false)
    }

    /// Fast polling, for servers that eventually answer `HEAD` with 200
    pub fn polling(base_uri: &str, max_attempts: u32) -> Config {
        let processing = format!(
            "type: polling\n  initial_delay_ms: 10\n  max_delay_ms: 40\n  multiplier: 2.0\n  max_attempts: {}\n  probe_timeout_secs: 2",
            max_attempts
        );
        Self::from_processing(base_uri, &processing, false)
    }

    /// Fixed delay of zero seconds with compensating cleanup enabled
    pub fn with_cleanup(base_uri: &str) -> Config {
        Self::from_processing(base_uri, "type: fixed_delay\n  delay_secs: 0", true)
    }

    fn from_processing(base_uri: &str, processing: &str, cleanup: bool) -> Config {
        Config::from_yaml(&Self::yaml(base_uri, processing, cleanup)).unwrap()
    }

    /// Raw YAML document for `base_uri`
    pub fn yaml(base_uri: &str, processing: &str, cleanup: bool) -> String {
        format!(
            r#"
endpoints:
  upload_base_url: "{base}/upload"
  artifact_base_url: "{base}/artifacts"
upload:
  max_concurrent_uploads: 4
  timeout_secs: 5
  cleanup_on_failure: {cleanup}
processing:
  {processing}
logging:
  level: "debug"
"#,
            base = base_uri,
            cleanup = cleanup,
            processing = processing,
        )
    }
}
