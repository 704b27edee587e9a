/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

impl BuildMetadata {
    /// `<version> (<hash>[, dirty])`, omitting the hash when git was unavailable.
    pub fn short(&self) -> String {
        match (self.git_hash, self.git_status) {
            ("unknown", _) => self.version.to_string(),
            (hash, "dirty") => format!("{} ({}, dirty)", self.version, hash),
            (hash, _) => format!("{} ({})", self.version, hash),
        }
    }
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("KBUDGET_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("KBUDGET_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("KBUDGET_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("KBUDGET_BUILD_TARGET").unwrap_or("unknown"),
        profile: option_env!("KBUDGET_BUILD_PROFILE").unwrap_or("unknown"),
        rustc: option_env!("KBUDGET_BUILD_RUSTC").unwrap_or("unknown"),
    }
}
