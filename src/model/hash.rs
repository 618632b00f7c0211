//! Hash values and version-gated hash algorithms.

use crate::schema::{SchemaVersion, VersionGated};
use std::fmt;

/// Cryptographic hash of a component or reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hash {
    /// Hash algorithm
    pub algorithm: HashAlgorithm,
    /// Hash value (hex encoded)
    pub value: String,
}

impl Hash {
    /// Create a new hash
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }
}

/// Hash algorithm types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    /// Algorithm name not known to this crate
    Unknown(String),
}

impl HashAlgorithm {
    /// Parse the `alg` wire value. Matching ignores ASCII case.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "MD5" => Self::Md5,
            "SHA-1" => Self::Sha1,
            "SHA-256" => Self::Sha256,
            "SHA-384" => Self::Sha384,
            "SHA-512" => Self::Sha512,
            "SHA3-256" => Self::Sha3_256,
            "SHA3-384" => Self::Sha3_384,
            "SHA3-512" => Self::Sha3_512,
            "BLAKE2B-256" => Self::Blake2b256,
            "BLAKE2B-384" => Self::Blake2b384,
            "BLAKE2B-512" => Self::Blake2b512,
            "BLAKE3" => Self::Blake3,
            _ => Self::Unknown(value.trim().to_string()),
        }
    }

    /// The `alg` wire value.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Unknown(name) => name,
        }
    }
}

impl VersionGated for HashAlgorithm {
    fn since(&self) -> SchemaVersion {
        match self {
            Self::Md5
            | Self::Sha1
            | Self::Sha256
            | Self::Sha384
            | Self::Sha512
            | Self::Sha3_256
            | Self::Sha3_512 => SchemaVersion::V1_0,
            Self::Sha3_384
            | Self::Blake2b256
            | Self::Blake2b384
            | Self::Blake2b512
            | Self::Blake3 => SchemaVersion::V1_1,
            // unrecognised names are assumed to come from a newer schema
            Self::Unknown(_) => SchemaVersion::latest(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}
