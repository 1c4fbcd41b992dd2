//! Node.js compatibility policy as seen by the walker.
//!
//! The mode itself is derived elsewhere (from a compatibility date and flag
//! set) and handed to the walker as an opaque [`NodeCompatMode`]. This module
//! decides which specifiers need no resolution at all under that mode.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Prefix of Node.js standard-library specifiers.
pub const NODE_PREFIX: &str = "node:";

/// Namespaces reserved by the host platform. Always provided by the runtime.
pub const HOST_PREFIXES: [&str; 2] = ["cloudflare:", "workerd:"];

/// The only built-in available in async-context-only mode.
pub const ASYNC_CONTEXT_BUILTIN: &str = "node:async_hooks";

/// Node.js built-in module names, without the `node:` prefix.
pub const NODE_BUILTINS: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Which Node.js-style specifiers the runtime provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCompatMode {
    /// No Node.js compatibility.
    #[default]
    None,
    /// Legacy polyfills: every `node:`-prefixed specifier is provided.
    V1,
    /// Native built-ins, with or without the `node:` prefix.
    V2,
    /// Only `node:async_hooks` is provided.
    #[serde(alias = "async-context")]
    Als,
}

impl NodeCompatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeCompatMode::None => "none",
            NodeCompatMode::V1 => "v1",
            NodeCompatMode::V2 => "v2",
            NodeCompatMode::Als => "als",
        }
    }
}

impl std::fmt::Display for NodeCompatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for NodeCompatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(NodeCompatMode::None),
            "v1" => Ok(NodeCompatMode::V1),
            "v2" => Ok(NodeCompatMode::V2),
            "als" | "async-context" => Ok(NodeCompatMode::Als),
            other => Err(format!(
                "unknown Node.js compatibility mode '{other}' (expected none, v1, v2 or als)"
            )),
        }
    }
}

/// Whether `spec` names a Node.js built-in, with or without `node:`.
pub fn is_node_builtin(spec: &str) -> bool {
    let name = spec.strip_prefix(NODE_PREFIX).unwrap_or(spec);
    NODE_BUILTINS.contains(&name)
}

/// Whether `spec` is guaranteed to be available without resolution.
pub fn is_externally_resolved(
    spec: &str,
    mode: NodeCompatMode,
    external: &FxHashSet<String>,
) -> bool {
    if HOST_PREFIXES.iter().any(|prefix| spec.starts_with(prefix)) {
        return true;
    }
    let provided_by_compat = match mode {
        NodeCompatMode::None => false,
        NodeCompatMode::V1 => spec.starts_with(NODE_PREFIX),
        NodeCompatMode::V2 => is_node_builtin(spec),
        NodeCompatMode::Als => spec == ASYNC_CONTEXT_BUILTIN,
    };
    provided_by_compat || external.contains(spec)
}
