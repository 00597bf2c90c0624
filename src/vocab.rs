//! Fixed word pool for falling threats

/// Every word a threat can carry. Lowercase ASCII letters only.
pub const WORDS: &[&str] = &[
    "fire", "blast", "code", "type", "fast", "hack", "bomb", "word", "shot",
    "kill", "nuke", "raid", "blitz", "smash", "crash", "force", "speed",
    "power", "storm", "crush", "flash", "laser", "turbo", "hyper", "ultra",
    "rapid", "vital", "alpha", "delta", "gamma", "sigma", "omega", "zeta",
    "phantom", "vector", "hunter", "target", "strike", "impact", "breach",
    "reboot", "stealth", "cipher", "matrix", "binary", "kernel", "buffer",
    "syntax", "module", "system", "network", "server", "packet", "signal",
    "terminal", "command", "defense", "protocol", "frequency", "override",
    "sequence", "launcher", "warhead", "payload", "scramble", "intercept",
    "detonate", "trajectory", "encryption", "decryption",
];
