//! # Replica Reads
//!
//! Scoped replica-read routing for multi-connection database clients, with a
//! replication-lag safety policy and automatic failover back to the primary.
//!
//! ## Features
//!
//! - **Scoped Routing** - Mark a region of code as eligible for replica reads;
//!   nested scopes compose and always restore the previous directive
//! - **Lag Policy** - Replica lag is measured per logical database and compared
//!   against an inclusive threshold before the scope body runs
//! - **Lag Failover** - A stale replica either fails the scope fast or
//!   transparently promotes it to primary-only, never both
//! - **Async/Await** - Built on Tokio; the routing context lives in task-local
//!   storage, so concurrent tasks never observe each other's directives
//! - **Pluggable Collaborators** - Lag probing and metrics reporting are narrow
//!   traits implemented by the surrounding application
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! replica-reads = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use replica_reads::{
//!     LagReading, LogicalDatabase, ProbeError, ReadRouter, ReplicaLagProbe, ScopeOptions,
//! };
//!
//! // The application supplies the actual lag measurement.
//! struct PgLagProbe;
//!
//! #[async_trait::async_trait]
//! impl ReplicaLagProbe for PgLagProbe {
//!     async fn lag(&self, _database: &LogicalDatabase) -> Result<LagReading, ProbeError> {
//!         Ok(LagReading::Measured(0.4))
//!     }
//! }
//!
//! # async fn fetch_users() -> Vec<String> { Vec::new() }
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = ReadRouter::new(Arc::new(PgLagProbe));
//!
//!     // Reads inside the scope are routed to a replica, unless the replica
//!     // is more than 3 seconds behind the primary.
//!     let options = ScopeOptions::builder().with_max_lag(3.0).build();
//!     let users = router
//!         .scope(options, || async {
//!             // The active directive is visible to the connection picker here.
//!             fetch_users().await
//!         })
//!         .await?;
//!
//!     println!("{} users", users.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Lag Failover
//!
//! With `lag_failover` the scope degrades to the primary instead of failing:
//!
//! ```rust,ignore
//! let options = ScopeOptions::builder()
//!     .with_max_lag(3.0)
//!     .with_lag_failover(true)
//!     .build();
//!
//! // Never raises on stale replicas; the directive observed by the body has
//! // primary = true, replica = Some(false) after a violation.
//! let value = router.scope(options, || async { run_report().await }).await?;
//! ```
//!
//! ## Reading the Directive
//!
//! Whatever code later picks a physical connection consults the task-local
//! routing context:
//!
//! ```rust,ignore
//! use replica_reads::{context, ConnectionTarget};
//!
//! let target = context::current()
//!     .map(|d| d.resolve_target(false))
//!     .unwrap_or(ConnectionTarget::Primary);
//! ```
//!
//! ## Configuration
//!
//! Process-wide defaults live in [`RouterConfig`], immutable after the router
//! is constructed:
//!
//! ```rust,ignore
//! let config = RouterConfig::builder()
//!     .with_defaults(scope_options! { failover: true, max_lag: 5.0 })
//!     .with_default_database("users_db")
//!     .with_eager_load(true)
//!     .build();
//! let router = ReadRouter::with_config(probe, config);
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`RoutingResult`] for consistent error handling:
//!
//! ```rust,ignore
//! match router.scope(options, || async { work().await }).await {
//!     Ok(value) => println!("done: {value:?}"),
//!     Err(RoutingError::TooMuchLag(msg)) => eprintln!("replica unsafe: {msg}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`routing`] - Scope coordinator, routing directive, and context stack
//! - [`lag`] - Lag probe interface and the lag policy evaluator
//! - [`metrics`] - Metrics sink interface and lag event reporting
//! - [`query`] - Deferred-query capability used by scope post-processing
//!

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lag;
pub mod metrics;
pub mod query;
pub mod routing;

// Re-exports for convenience
pub use lag::{LagReading, LagVerdict, LogicalDatabase, ProbeError, ReplicaLagProbe};
pub use metrics::{
    MemorySink, MetricEvent, MetricsSink, NoopSink, TracingSink, LAG_ERROR_EVENT,
    LAG_FAILOVER_EVENT, UNKNOWN_LAG,
};
pub use query::DeferredQuery;
pub use routing::{
    context, ConnectionTarget, ReadRouter, RouterConfig, RouterConfigBuilder, RoutingDirective,
    RoutingError, RoutingResult, ScopeOptions, ScopeOptionsBuilder,
};

/// Config alias for convenience
pub type Config = RouterConfig;
