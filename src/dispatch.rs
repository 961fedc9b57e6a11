//! Name-based routing onto the contract operations.
//!
//! Callers that only know an operation by its wire name (an RPC layer, a
//! transaction processor) go through [`Operation`]. Each entry carries its
//! arity and whether it only reads the ledger, so a host can route read-only
//! calls differently without calling them.

use crate::contract;
use crate::election::Election;
use crate::error::{RegistryError, Result};
use crate::storage::LedgerStore;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ElectionExists,
    CreateElection,
    ReadElection,
    UpdateElection,
    DeleteElection,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ElectionExists,
        Operation::CreateElection,
        Operation::ReadElection,
        Operation::UpdateElection,
        Operation::DeleteElection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::ElectionExists => "electionExists",
            Operation::CreateElection => "createElection",
            Operation::ReadElection => "readElection",
            Operation::UpdateElection => "updateElection",
            Operation::DeleteElection => "deleteElection",
        }
    }

    pub fn is_read_only(self) -> bool {
        matches!(self, Operation::ElectionExists | Operation::ReadElection)
    }

    /// Number of string arguments, the election id included.
    pub fn arity(self) -> usize {
        match self {
            Operation::CreateElection | Operation::UpdateElection => 3,
            _ => 1,
        }
    }

    /// Runs the operation. An argument list that does not match `arity()`
    /// fails before the ledger is touched.
    pub async fn invoke(self, store: &dyn LedgerStore, args: &[String]) -> Result<Outcome> {
        debug!("Invoking {} with {:?}", self.name(), args);

        let outcome = match (self, args) {
            (Operation::ElectionExists, [id]) => {
                Outcome::Bool(contract::election_exists(store, id).await?)
            }
            (Operation::CreateElection, [id, name, description]) => {
                contract::create_election(store, id, name, description).await?;
                Outcome::Unit
            }
            (Operation::ReadElection, [id]) => {
                Outcome::Election(contract::read_election(store, id).await?)
            }
            (Operation::UpdateElection, [id, name, description]) => {
                contract::update_election(store, id, name, description).await?;
                Outcome::Unit
            }
            (Operation::DeleteElection, [id]) => {
                contract::delete_election(store, id).await?;
                Outcome::Unit
            }
            _ => {
                return Err(RegistryError::InvalidArguments {
                    operation: self.name(),
                    expected: self.arity(),
                    got: args.len(),
                })
            }
        };

        Ok(outcome)
    }
}

impl FromStr for Operation {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| RegistryError::UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an operation hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Bool(bool),
    Election(Election),
    Unit,
}

#[derive(Debug, Clone, Serialize)]
pub struct OperationInfo {
    pub name: &'static str,
    pub read_only: bool,
    pub arity: usize,
}

impl From<Operation> for OperationInfo {
    fn from(op: Operation) -> Self {
        Self {
            name: op.name(),
            read_only: op.is_read_only(),
            arity: op.arity(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub operations: Vec<OperationInfo>,
}

pub fn contract_info() -> ContractInfo {
    ContractInfo {
        title: "ElectionContract",
        description: "My Smart Contract",
        operations: Operation::ALL.into_iter().map(OperationInfo::from).collect(),
    }
}
