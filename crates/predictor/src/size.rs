// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Human-readable message sizes.

use crate::PredictorError;
use std::fmt;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// A message size in bytes, always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageSize(u64);

impl MessageSize {
    /// Returns the size in bytes.
    pub fn as_bytes(&self) -> u64 {
        self.0
    }

    /// Parses a size string.
    ///
    /// Accepted formats: `"4096"`, `"64B"`, `"8K"`, `"8KB"`, `"1M"`,
    /// `"1MB"`, `"2G"`, `"2GB"`. Suffixes are binary multiples and
    /// case-insensitive.
    pub fn parse(s: &str) -> Result<Self, PredictorError> {
        let s = s.trim();
        let invalid = |detail: &str| PredictorError::InvalidSize {
            input: s.to_string(),
            detail: detail.to_string(),
        };
        if s.is_empty() {
            return Err(invalid("empty size"));
        }

        let upper = s.to_uppercase();
        let (digits, multiplier) = [("GB", GIB), ("G", GIB), ("MB", MIB), ("M", MIB), ("KB", KIB), ("K", KIB), ("B", 1)]
            .iter()
            .find_map(|&(suffix, m)| upper.strip_suffix(suffix).map(|d| (d, m)))
            .unwrap_or((upper.as_str(), 1));

        let value: u64 = digits
            .trim()
            .parse()
            .map_err(|_| invalid("expected a number followed by an optional suffix (K, M, G)"))?;
        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("size overflows 64 bits"))?;
        if bytes == 0 {
            return Err(invalid("size must be at least 1 byte"));
        }
        Ok(Self(bytes))
    }
}

impl From<MessageSize> for u64 {
    fn from(s: MessageSize) -> Self {
        s.0
    }
}

impl std::str::FromStr for MessageSize {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MessageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        if b >= GIB && b % GIB == 0 {
            write!(f, "{}G", b / GIB)
        } else if b >= MIB && b % MIB == 0 {
            write!(f, "{}M", b / MIB)
        } else if b >= KIB && b % KIB == 0 {
            write!(f, "{}K", b / KIB)
        } else {
            write!(f, "{b}")
        }
    }
}

/// Parses a comma-separated size list, keeping its order.
pub fn parse_size_list(s: &str) -> Result<Vec<u64>, PredictorError> {
    s.split(',')
        .map(|item| MessageSize::parse(item).map(u64::from))
        .collect()
}
