pub mod config;
pub mod contract;
pub mod dispatch;
pub mod election;
pub mod error;
pub mod server;
pub mod storage;

pub use config::{RegistryConfig, StorageBackend};
pub use dispatch::{contract_info, ContractInfo, Operation, Outcome};
pub use election::Election;
pub use error::{RegistryError, Result};
pub use server::RegistryServer;
pub use storage::{create_storage, DiskLedger, LedgerStore, MemoryLedger};
