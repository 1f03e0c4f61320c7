//! Block-chaining mode selection.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// The four recognized block-chaining modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainMode {
    /// Electronic codebook: every block is transformed independently.
    Ecb,
    /// Cipher-block chaining: the chain register is XORed into the plaintext
    /// before encryption and then tracks the ciphertext.
    Cbc,
    /// Output feedback: a keystream register is re-encrypted per block and
    /// XORed with the data; encryption and decryption coincide.
    Ofb,
    /// Cipher feedback: the previous ciphertext block is encrypted and XORed
    /// with the current block.
    Cfb,
}

impl ChainMode {
    /// Canonical name as used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::Cbc => "CBC",
            Self::Ofb => "OFB",
            Self::Cfb => "CFB",
        }
    }
}

impl FromStr for ChainMode {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name {
            "ECB" => Ok(Self::Ecb),
            "CBC" => Ok(Self::Cbc),
            "OFB" => Ok(Self::Ofb),
            "CFB" => Ok(Self::Cfb),
            other => Err(Error::UnknownChainMode(other.to_string())),
        }
    }
}

impl fmt::Display for ChainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_four_recognized_names() {
        assert_eq!(ChainMode::Ecb, "ECB".parse().unwrap());
        assert_eq!(ChainMode::Cbc, "CBC".parse().unwrap());
        assert_eq!(ChainMode::Ofb, "OFB".parse().unwrap());
        assert_eq!(ChainMode::Cfb, "CFB".parse().unwrap());
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            "CTR".parse::<ChainMode>(),
            Err(Error::UnknownChainMode(name)) if name == "CTR"
        ));
        assert!("ecb".parse::<ChainMode>().is_err());
    }

    #[test]
    fn displays_canonical_names() {
        assert_eq!("OFB", ChainMode::Ofb.to_string());
    }
}
