//! Provisioning policy for the Sensu RabbitMQ transport.
//!
//! Given a node's platform, two feature flags and the `sensu` data bag,
//! decides which erlang packages to install, which `rabbitmq.ssl*`
//! attributes to set and which vhosts/users to create.

pub mod component;
pub mod config;
pub mod data_bag;
pub mod error;
pub mod platform;
pub mod policy;

pub use error::PolicyError;
pub use platform::{PlatformDescriptor, PlatformFamily};
pub use policy::{resolve, resolve_node, FeatureFlags, ResolutionResult};
