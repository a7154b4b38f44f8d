// Domain layer: the configuration record and the ports composition reads from.

pub mod env;
pub mod model;
pub mod ports;
