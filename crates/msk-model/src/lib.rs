mod domain;
pub use domain::*;

/// Port the JMX exporter listens on when enabled in a broker.
pub const JMX_EXPORTER_PORT: u16 = 11001;

/// Port the node exporter listens on when enabled in a broker.
pub const NODE_EXPORTER_PORT: u16 = 11002;
