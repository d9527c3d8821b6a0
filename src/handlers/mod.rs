// handlers/mod.rs - HTTP handlers grouped by security level
//
// public/     no token required (auth flows, static documents)
// protected/  bearer token required, resolved through the `Identity` extractor

pub mod protected;
pub mod public;
