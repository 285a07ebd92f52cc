// Domain layer: batch models and the catalog port. No external dependencies beyond std/serde.

pub mod model;
pub mod ports;
