use std::path::PathBuf;

/// Where the ledger keeps its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    TempDir,
    Directory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub storage: StorageBackend,
    pub port: Option<u16>,
    pub host: String,
}

impl RegistryConfig {
    pub fn new(storage: StorageBackend) -> Self {
        Self {
            storage,
            port: None,
            host: "127.0.0.1".to_string(),
        }
    }

    pub fn memory() -> Self {
        Self::new(StorageBackend::Memory)
    }

    pub fn temp_dir() -> Self {
        Self::new(StorageBackend::TempDir)
    }

    pub fn directory(path: PathBuf) -> Self {
        Self::new(StorageBackend::Directory(path))
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Address string handed to the listener. A missing port binds an ephemeral one.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(0))
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_memory_on_loopback() {
        let config = RegistryConfig::default();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr(), "127.0.0.1:0");
    }

    #[test]
    fn builder_overrides_host_and_port() {
        let config = RegistryConfig::directory(PathBuf::from("/var/lib/elections"))
            .with_host("0.0.0.0")
            .with_port(7054);
        assert_eq!(
            config.storage,
            StorageBackend::Directory(PathBuf::from("/var/lib/elections"))
        );
        assert_eq!(config.bind_addr(), "0.0.0.0:7054");
    }
}
