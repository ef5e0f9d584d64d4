//! Name-to-handler dispatch for contracts.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;

use super::scope::{LoanScope, ScopeUpdate};
use crate::enforcement::{ContractError, ValidationEnv};

/// A mutation entrypoint over a loan scope.
///
/// The handler receives the prior scope and its typed input, and returns
/// the record the host should persist. Any error aborts the invocation.
pub trait Contract {
    /// Name the contract is registered and invoked under.
    const NAME: &'static str;

    /// Input submitted by the caller.
    type Input: DeserializeOwned;

    /// Runs the contract.
    ///
    /// # Errors
    ///
    /// Returns a [`ContractError`] when the input or the prior state does
    /// not allow the mutation.
    fn execute(
        &self,
        scope: &LoanScope,
        input: Self::Input,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError>;
}

type Handler =
    Box<dyn Fn(&LoanScope, serde_json::Value, ValidationEnv) -> Result<ScopeUpdate, ContractError> + Send + Sync>;

/// Explicit registry of contracts, keyed by [`Contract::NAME`].
#[derive(Default)]
pub struct ContractRegistry {
    handlers: BTreeMap<&'static str, Handler>,
}

impl std::fmt::Debug for ContractRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractRegistry")
            .field("contracts", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ContractRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `contract` under its name, replacing any previous handler
    /// with that name.
    pub fn register<C>(&mut self, contract: C) -> &mut Self
    where
        C: Contract + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(move |scope, input, env| {
            let input: C::Input = serde_json::from_value(input).map_err(|e| {
                ContractError::unexpected(format!("input for {} could not be read: {e}", C::NAME))
            })?;
            contract.execute(scope, input, env)
        });
        if self.handlers.insert(C::NAME, handler).is_some() {
            tracing::debug!(contract = C::NAME, "replaced contract handler");
        }
        self
    }

    /// Registered contract names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Returns true when a contract is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Decodes `input` for the contract registered under `name` and runs it.
    ///
    /// # Errors
    ///
    /// - [`ContractError::UnknownContract`] when `name` is not registered
    /// - [`ContractError::UnexpectedState`] when `input` does not decode as
    ///   the contract's input type
    /// - whatever the contract itself returns
    pub fn execute(
        &self,
        name: &str,
        scope: &LoanScope,
        input: serde_json::Value,
        env: ValidationEnv,
    ) -> Result<ScopeUpdate, ContractError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| ContractError::UnknownContract {
                name: name.to_string(),
            })?;
        tracing::info!(contract = name, "executing contract");
        let result = handler(scope, input, env);
        if let Err(err) = &result {
            tracing::info!(contract = name, error = %err, "contract rejected");
        }
        result
    }
}
