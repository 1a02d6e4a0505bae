//! Supported hash algorithms.
//!
//! Every algorithm owns its own hash list file (`SHA1SUMS`, `SHA256SUMS`, ...), so a
//! directory can carry lists for several algorithms side by side.

use std::fmt;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
  Md5,
  #[default]
  Sha1,
  Sha224,
  Sha256,
  Sha384,
  Sha512,
  Blake3,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hash algorithm: {0} (available: md5, sha1, sha224, sha256, sha384, sha512, blake3)")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
  pub const ALL: [Algorithm; 7] = [
    Algorithm::Md5,
    Algorithm::Sha1,
    Algorithm::Sha224,
    Algorithm::Sha256,
    Algorithm::Sha384,
    Algorithm::Sha512,
    Algorithm::Blake3,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Algorithm::Md5 => "md5",
      Algorithm::Sha1 => "sha1",
      Algorithm::Sha224 => "sha224",
      Algorithm::Sha256 => "sha256",
      Algorithm::Sha384 => "sha384",
      Algorithm::Sha512 => "sha512",
      Algorithm::Blake3 => "blake3",
    }
  }

  /// Length of the lowercase hex digest.
  pub fn hex_len(self) -> usize {
    match self {
      Algorithm::Md5 => 32,
      Algorithm::Sha1 => 40,
      Algorithm::Sha224 => 56,
      Algorithm::Sha256 | Algorithm::Blake3 => 64,
      Algorithm::Sha384 => 96,
      Algorithm::Sha512 => 128,
    }
  }

  /// File name of the hash list for this algorithm.
  pub fn hashlist_name(self) -> &'static str {
    match self {
      Algorithm::Md5 => "MD5SUMS",
      Algorithm::Sha1 => "SHA1SUMS",
      Algorithm::Sha224 => "SHA224SUMS",
      Algorithm::Sha256 => "SHA256SUMS",
      Algorithm::Sha384 => "SHA384SUMS",
      Algorithm::Sha512 => "SHA512SUMS",
      Algorithm::Blake3 => "BLAKE3SUMS",
    }
  }

  /// Whether `name` is the hash list file name of any algorithm.
  pub fn is_hashlist_name(name: &str) -> bool {
    Self::ALL.iter().any(|a| a.hashlist_name() == name)
  }

  pub fn hasher(self) -> Hasher {
    match self {
      Algorithm::Md5 => Hasher::Md5(Md5::new()),
      Algorithm::Sha1 => Hasher::Sha1(Sha1::new()),
      Algorithm::Sha224 => Hasher::Sha224(Sha224::new()),
      Algorithm::Sha256 => Hasher::Sha256(Sha256::new()),
      Algorithm::Sha384 => Hasher::Sha384(Sha384::new()),
      Algorithm::Sha512 => Hasher::Sha512(Sha512::new()),
      Algorithm::Blake3 => Hasher::Blake3(Box::new(blake3::Hasher::new())),
    }
  }
}

impl fmt::Display for Algorithm {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Algorithm {
  type Err = UnknownAlgorithm;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase();
    Self::ALL
      .into_iter()
      .find(|a| a.as_str() == wanted)
      .ok_or_else(|| UnknownAlgorithm(s.to_string()))
  }
}

/// Streaming hasher for one of the supported algorithms.
pub enum Hasher {
  Md5(Md5),
  Sha1(Sha1),
  Sha224(Sha224),
  Sha256(Sha256),
  Sha384(Sha384),
  Sha512(Sha512),
  Blake3(Box<blake3::Hasher>),
}

impl Hasher {
  pub fn update(&mut self, data: &[u8]) {
    match self {
      Hasher::Md5(h) => Digest::update(h, data),
      Hasher::Sha1(h) => Digest::update(h, data),
      Hasher::Sha224(h) => Digest::update(h, data),
      Hasher::Sha256(h) => Digest::update(h, data),
      Hasher::Sha384(h) => Digest::update(h, data),
      Hasher::Sha512(h) => Digest::update(h, data),
      Hasher::Blake3(h) => {
        h.update(data);
      }
    }
  }

  /// Consume the hasher and return the lowercase hex digest.
  pub fn finalize_hex(self) -> String {
    match self {
      Hasher::Md5(h) => hex::encode(h.finalize()),
      Hasher::Sha1(h) => hex::encode(h.finalize()),
      Hasher::Sha224(h) => hex::encode(h.finalize()),
      Hasher::Sha256(h) => hex::encode(h.finalize()),
      Hasher::Sha384(h) => hex::encode(h.finalize()),
      Hasher::Sha512(h) => hex::encode(h.finalize()),
      Hasher::Blake3(h) => h.finalize().to_hex().to_string(),
    }
  }
}
