// Domain layer: core models and ports (host capabilities, remote API). No I/O here.

pub mod model;
pub mod ports;
