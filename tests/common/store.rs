//! Mock object store and artifact host

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `wiremock` server standing in for both remote endpoints
pub struct MockStore {
    pub server: MockServer,
}

impl MockStore {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Accept exactly one `PUT` of `key`
    pub async fn expect_put(&self, key_path: &str, status: u16) {
        Mock::given(method("PUT"))
            .and(path(format!("/upload/{}", key_path)))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Accept any number of `DELETE`s of `key`
    pub async fn allow_delete(&self, key_path: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/upload/{}", key_path)))
            .respond_with(ResponseTemplate::new(204))
            .mount(&self.server)
            .await;
    }

    /// Serve the bundle of `download_id`
    pub async fn serve_bundle(&self, download_id: &str, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path(bundle_path(download_id)))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(&self.server)
            .await;
    }

    /// Answer `HEAD` with 404 `misses` times, then 200
    pub async fn bundle_appears_after(&self, download_id: &str, misses: u64) {
        Mock::given(method("HEAD"))
            .and(path(bundle_path(download_id)))
            .respond_with(ResponseTemplate::new(404))
            .up_to_n_times(misses)
            .with_priority(1)
            .mount(&self.server)
            .await;

        Mock::given(method("HEAD"))
            .and(path(bundle_path(download_id)))
            .respond_with(ResponseTemplate::new(200))
            .with_priority(2)
            .mount(&self.server)
            .await;
    }

    /// Requests received so far as `(method, path)`
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }
}

pub fn bundle_path(download_id: &str) -> String {
    format!("/artifacts/{id}/scaled/{id}_scaled.zip", id = download_id)
}
