/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "build.config.toml";

/// Read buffer size for streaming checksums
pub const CHECKSUM_CHUNK_SIZE: usize = 8192;

/// xz preset level (matches the `xz` command-line default)
pub const XZ_PRESET: u32 = 6;

/// Extension appended to compressed artifacts
pub const XZ_EXT: &str = "xz";

/// Extension appended to checksum records
pub const CHECKSUM_EXT: &str = "sha256";

/// Extension appended to armored detached signatures
pub const SIGNATURE_EXT: &str = "asc";
