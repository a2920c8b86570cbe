
pub use api_client::{MultipartForm, TestClient};
pub use fakes::{FakeLlm, FakeTts};

use farmer_advisory::controllers::predict::PredictController;
use farmer_advisory::domain::advisory::AdvisoryService;
use farmer_advisory::domain::tts::{AudioAssembler, TextChunker, TtsService};
use farmer_advisory::infrastructure::config::{Config, LogFormat};
use farmer_advisory::infrastructure::http::build_router;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Smallest byte sequence recognised as a JPEG upload
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

/// Test context that provides an isolated server with scriptable collaborators
pub struct TestContext {
    pub client: TestClient,
    pub llm: Arc<FakeLlm>,
    pub tts: Arc<FakeTts>,
    _server_handle: tokio::task::JoinHandle<()>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = test_config();
            let llm = Arc::new(FakeLlm::new());
            let tts = Arc::new(FakeTts::new());

            let tts_service = Arc::new(TtsService::new(
                TextChunker::new(config.tts_chunk_size),
                AudioAssembler::new(tts.clone(), config.tts_concurrency, config.tts_timeout()),
            ));
            let advisory_service = Arc::new(AdvisoryService::new(
                llm.clone(),
                tts_service,
                config.request_timeout(),
            ));
            let predict_controller = Arc::new(PredictController::new(advisory_service));

            let app = build_router(&config, predict_controller);

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind test listener");
            let addr = listener.local_addr().expect("Failed to read local addr");

            let server_handle = tokio::spawn(async move {
                axum::serve(listener, app).await.expect("Server failed");
            });

            // Give the server a moment to start
            tokio::time::sleep(Duration::from_millis(100)).await;

            Self {
                client: TestClient::new(&format!("http://{}", addr)),
                llm,
                tts,
                _server_handle: server_handle,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async move {
            self._server_handle.abort();
        }
    }
}

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        log_format: LogFormat::Pretty,
        google_api_key: "test-key".to_string(),
        gemini_model: "gemini-test".to_string(),
        gemini_base_url: "http://unused.invalid".to_string(),
        llm_timeout_secs: 5,
        tts_base_url: "http://unused.invalid".to_string(),
        tts_chunk_size: 180,
        tts_concurrency: 4,
        tts_timeout_secs: 2,
        allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
        request_timeout_secs: 10,
        max_upload_bytes: 64 * 1024,
    }
}
