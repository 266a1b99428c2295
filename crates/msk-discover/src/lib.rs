mod api;
pub use api::KafkaApi;

#[cfg(feature = "aws")]
mod aws;
#[cfg(feature = "aws")]
pub use aws::AwsKafkaApi;

mod config;
pub use config::{DiscoveryConfig, ResolveStrategy};

mod errors;
pub use errors::{CloudError, DiscoverError, FilterError, ResolveError};

mod filter;
pub use filter::{FilterSpec, parse_tag_condition};

mod pipeline;
pub use pipeline::{Discovery, TargetSource, assemble, resolve};

#[cfg(test)]
mod fake;
