pub mod java_patterns;
pub mod ts_walker;
