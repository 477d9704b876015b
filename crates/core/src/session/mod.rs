//! Recovery phrase generation and wallet address derivation.
//!
//! A wallet is bound to its owner by possession of a 12-word recovery
//! phrase. The address is a one-way derivation of the normalized phrase:
//! whoever holds the phrase holds the account, and a lost phrase loses the
//! account irrecoverably. There is no secondary factor.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use maison_shared::WalletError;
use maison_shared::types::WalletAddress;

/// Number of words in a recovery phrase.
pub const PHRASE_WORDS: usize = 12;

/// Length of the derived address, including the prefix.
const ADDRESS_LEN: usize = 16;

/// Prefix on every derived wallet address.
const ADDRESS_PREFIX: &str = "LX";

/// Wordlist for recovery phrase generation.
///
/// Small by design: the phrase guards a storefront wallet, not a chain key.
/// 64 words over 12 positions is 72 bits of entropy.
const WORDS: [&str; 64] = [
    "amber", "anchor", "atlas", "aurora", "basil", "bloom", "bronze", "canvas",
    "cedar", "charm", "cipher", "clover", "cobalt", "coral", "crystal", "dahlia",
    "dusk", "ebony", "ember", "fable", "fern", "flint", "garnet", "gilt",
    "grove", "harbor", "hazel", "indigo", "ivory", "jade", "juniper", "lilac",
    "linen", "lotus", "lumen", "maple", "marble", "meadow", "mist", "noble",
    "ochre", "onyx", "opal", "orchid", "pearl", "pique", "plume", "quartz",
    "raven", "saffron", "sable", "sienna", "silk", "sterling", "suede", "thistle",
    "topaz", "tulle", "velvet", "vernal", "willow", "wisteria", "zephyr", "zinc",
];

/// A 12-word possession secret, stored normalized (lowercase, single-spaced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveryPhrase(String);

impl RecoveryPhrase {
    /// Generates a fresh random phrase.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let words: Vec<&str> = (0..PHRASE_WORDS)
            .map(|_| WORDS[rng.random_range(0..WORDS.len())])
            .collect();
        Self(words.join(" "))
    }

    /// Parses a phrase from user input, normalizing case and whitespace.
    ///
    /// # Errors
    ///
    /// Returns `WalletError::Validation` unless the input contains exactly
    /// twelve words.
    pub fn parse(input: &str) -> Result<Self, WalletError> {
        let words: Vec<String> = input
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if words.len() != PHRASE_WORDS {
            return Err(WalletError::Validation(format!(
                "recovery phrase must contain exactly {PHRASE_WORDS} words"
            )));
        }
        Ok(Self(words.join(" ")))
    }

    /// Returns the normalized phrase.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the wallet address bound to this phrase.
    ///
    /// SHA-256 over the normalized phrase, hex-encoded, truncated, and
    /// prefixed. Deterministic: the same phrase always yields the same
    /// address.
    #[must_use]
    pub fn derive_address(&self) -> WalletAddress {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        let body: String = digest
            .chars()
            .take(ADDRESS_LEN - ADDRESS_PREFIX.len())
            .collect::<String>()
            .to_uppercase();
        WalletAddress::new(format!("{ADDRESS_PREFIX}{body}"))
    }
}
