//! Client-side application shell: history-driven route dispatch and an HTTP
//! request gateway that attaches the same-origin anti-forgery token.

pub mod config;
pub mod document;
pub mod gateway;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ShellConfig;
pub use gateway::RequestGateway;
pub use lifecycle::Shell;
pub use routing::{Navigator, RouteTable};
