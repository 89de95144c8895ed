//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Compile the route table
//! - Build the transport, token provider and gateway
//!
//! # Design Decisions
//! - Fail fast: a malformed route table refuses to start
//! - Router and gateway are independent; the shell only holds both

use std::sync::Arc;

use thiserror::Error;

use crate::config::{validate_config, ShellConfig, ValidationError};
use crate::document::SharedDocument;
use crate::gateway::{DocumentToken, RequestGateway, ReqwestTransport, TransportBuildError};
use crate::routing::{MemoryHistory, NavigationError, Navigator, RouteError, RouteTable, ViewHost};

/// Gateway type assembled by [`Shell::bootstrap`].
pub type ShellGateway = RequestGateway<ReqwestTransport, DocumentToken>;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {}", join_errors(.0))]
    Config(Vec<ValidationError>),

    #[error(transparent)]
    Routes(#[from] RouteError),

    #[error(transparent)]
    Transport(#[from] TransportBuildError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationError> for StartupError {
    fn from(e: ValidationError) -> Self {
        StartupError::Config(vec![e])
    }
}

/// The assembled application shell.
#[derive(Debug)]
pub struct Shell {
    config: ShellConfig,
    routes: Arc<RouteTable>,
    document: SharedDocument,
    gateway: Arc<ShellGateway>,
}

impl Shell {
    /// Start with no document loaded.
    pub fn bootstrap(config: ShellConfig) -> Result<Self, StartupError> {
        Self::bootstrap_with_document(config, SharedDocument::empty())
    }

    /// Start with `document` as the token source.
    pub fn bootstrap_with_document(
        config: ShellConfig,
        document: SharedDocument,
    ) -> Result<Self, StartupError> {
        validate_config(&config).map_err(StartupError::Config)?;

        let routes = Arc::new(RouteTable::from_config(&config.router)?);

        let gateway_config = &config.gateway;
        let transport = ReqwestTransport::from_config(gateway_config)?;
        let tokens = DocumentToken::new(document.clone(), gateway_config.token_field.as_str());
        let gateway = RequestGateway::new(transport, tokens)
            .with_token_header(gateway_config.token_header_name()?)
            .with_default_headers(gateway_config.default_header_map()?);

        tracing::info!(
            routes = routes.entries().len(),
            fallback = %routes.fallback(),
            base_url = %gateway_config.base_url,
            token_header = %gateway_config.token_header,
            "Shell started"
        );

        Ok(Self {
            config,
            routes,
            document,
            gateway: Arc::new(gateway),
        })
    }

    /// A navigator over this shell's route table, starting at `initial`.
    pub fn navigator<V: ViewHost>(
        &self,
        host: V,
        initial: &str,
    ) -> Result<Navigator<MemoryHistory, V>, NavigationError> {
        Navigator::start(
            self.routes.clone(),
            &self.config.router.base,
            MemoryHistory::new(),
            host,
            initial,
        )
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn gateway(&self) -> &Arc<ShellGateway> {
        &self.gateway
    }
}
