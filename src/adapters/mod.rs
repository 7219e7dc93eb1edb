// Adapters layer: concrete implementations for external systems (remote workflow API over HTTP).

pub mod http;
