use crate::traits::{
    FileSystem, HttpClient, Output, RealFileSystem, ReqwestClient, TerminalOutput,
};
#[cfg(test)]
use crate::traits::{MockFileSystem, MockHttpClient, MockOutput};
use std::sync::Arc;
use std::time::Duration;

/// Application context that holds all dependencies for dependency injection
pub struct Context {
    pub fs: Arc<dyn FileSystem>,
    pub output: Arc<dyn Output>,
    pub http: Arc<dyn HttpClient>,
}

impl Context {
    /// Create a new context with real implementations (for production use)
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            output: Arc::new(TerminalOutput),
            http: Arc::new(ReqwestClient::new(fetch_timeout)),
        }
    }

    /// Create a test context with specific mock implementations
    #[cfg(test)]
    pub fn test_with(
        fs: Arc<MockFileSystem>,
        output: Arc<MockOutput>,
        http: Arc<MockHttpClient>,
    ) -> Self {
        Self { fs, output, http }
    }
}
