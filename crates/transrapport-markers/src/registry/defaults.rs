//! Built-in pattern sources, embedded at compile time.

/// (source name, TOML text) for every built-in pattern file, in run order.
pub const BUILTIN_SOURCES: [(&str, &str); 4] = [
    ("builtin:attention", include_str!("../../patterns/attention.toml")),
    ("builtin:semantic", include_str!("../../patterns/semantic.toml")),
    ("builtin:cluster", include_str!("../../patterns/cluster.toml")),
    ("builtin:memory", include_str!("../../patterns/memory.toml")),
];
