//! Test configuration loaders for scenarios covering success and failure
//! paths.

use std::ffi::OsString;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use chanscope_config::{Config, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader yielding a loopback TCP endpoint on an ephemeral port, or a Unix
/// socket inside a temporary directory.
#[derive(Clone)]
pub struct TestConfigLoader {
    config: Config,
    _socket_dir: Option<Arc<TempDir>>,
}

impl TestConfigLoader {
    #[must_use]
    pub fn tcp() -> Self {
        Self {
            config: Config {
                listen: SocketEndpoint::tcp("127.0.0.1", 0),
                ..Config::default()
            },
            _socket_dir: None,
        }
    }

    #[must_use]
    pub fn unix() -> Self {
        let dir = TempDir::new().expect("failed to create temporary directory for socket");
        let path = dir.path().join("run").join("chanscoped.sock");
        let path = path
            .to_str()
            .expect("temporary socket path was not valid UTF-8")
            .to_owned();
        Self {
            config: Config {
                listen: SocketEndpoint::unix(path),
                ..Config::default()
            },
            _socket_dir: Some(Arc::new(dir)),
        }
    }

    /// Filesystem path of a Unix socket endpoint.
    #[must_use]
    pub fn socket_path(&self) -> Option<&std::path::Path> {
        match &self.config.listen {
            SocketEndpoint::Unix { path } => Some(path.as_std_path()),
            SocketEndpoint::Tcp { .. } => None,
        }
    }

    /// Applies further overrides to the loaded configuration.
    #[must_use]
    pub fn with(mut self, adjust: impl FnOnce(&mut Config)) -> Self {
        adjust(&mut self.config);
        self
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Loader that intentionally fails by passing an invalid listen endpoint.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("chanscoped"),
            OsString::from("--listen"),
            OsString::from("invalid://socket"),
        ];
        Config::load_from_iter(args)
    }
}
