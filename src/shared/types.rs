//! Common types used across the application

use serde::{Deserialize, Serialize};

/// Which asset is given up versus received in a swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Native XFI in, DXFI out
    NativeToToken,
    /// DXFI in, native XFI out
    TokenToNative,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::NativeToToken => Direction::TokenToNative,
            Direction::TokenToNative => Direction::NativeToToken,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::NativeToToken => "native-to-token",
            Direction::TokenToNative => "token-to-native",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native-to-token" => Ok(Direction::NativeToToken),
            "token-to-native" => Ok(Direction::TokenToNative),
            other => Err(format!(
                "unknown direction: {} (expected native-to-token or token-to-native)",
                other
            )),
        }
    }
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
}

/// The two assets served by the exchange contract
#[derive(Debug, Clone)]
pub struct SwapPair {
    pub native: TokenInfo,
    pub token: TokenInfo,
}

impl SwapPair {
    /// Symbol of the asset given up for the given direction
    pub fn from_symbol(&self, direction: Direction) -> &str {
        match direction {
            Direction::NativeToToken => &self.native.symbol,
            Direction::TokenToNative => &self.token.symbol,
        }
    }

    /// Symbol of the asset received for the given direction
    pub fn to_symbol(&self, direction: Direction) -> &str {
        match direction {
            Direction::NativeToToken => &self.token.symbol,
            Direction::TokenToNative => &self.native.symbol,
        }
    }
}

/// Outcome of a mined swap transaction
#[derive(Debug, Clone)]
pub struct SwapReceipt {
    pub tx_hash: String,
    pub block_number: Option<u64>,
}
