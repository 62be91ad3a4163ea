//! Shared utilities for controller integration testing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use bigip_router::config::RouterConfig;
use bigip_router::ConfigWriter;

/// In-memory writer capturing every emitted document.
#[derive(Clone, Default)]
pub struct SharedBufferWriter {
    documents: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl SharedBufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents written so far.
    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    /// Parse document `index` as JSON.
    pub fn document(&self, index: usize) -> serde_json::Value {
        let documents = self.documents.lock().unwrap();
        serde_json::from_slice(&documents[index]).expect("document is not valid JSON")
    }

    /// Parse the most recent document as JSON.
    pub fn last_document(&self) -> serde_json::Value {
        let count = self.document_count();
        assert!(count > 0, "no document written yet");
        self.document(count - 1)
    }
}

impl ConfigWriter for SharedBufferWriter {
    fn write(&mut self, output: &[u8]) -> std::io::Result<usize> {
        self.documents.lock().unwrap().push(output.to_vec());
        Ok(output.len())
    }
}

/// Poll until `count` documents exist, or panic after a few seconds.
pub async fn wait_for_documents(writer: &SharedBufferWriter, count: usize) {
    for _ in 0..300 {
        if writer.document_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "timed out waiting for {} documents (have {})",
        count,
        writer.document_count()
    );
}

/// Controller configuration used across the integration tests.
pub fn test_config() -> RouterConfig {
    let mut config = RouterConfig::default();
    config.bigip.external_addr = "192.168.1.1".to_string();
    config.bigip.ssl_profile = "Common/clientssl".to_string();
    config
}
