use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain separation tag of the basic scheme.
pub const DST_BASIC: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Domain separation tag of the message augmentation scheme.
pub const DST_AUGMENTED: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_AUG_";

/// Domain separation tag for signatures of the proof of possession scheme.
pub const DST_POP_SIG: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Domain separation tag for the proofs of possession themselves.
pub const DST_POP_PROOF: &[u8] = b"BLS_POP_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

pub const DST_G1_BASIC: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";
pub const DST_G1_AUGMENTED: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_AUG_";
pub const DST_G1_POP_SIG: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";
pub const DST_G1_POP_PROOF: &[u8] = b"BLS_POP_BLS12381G1_XMD:SHA-256_SSWU_RO_POP_";

/// The BLS signature scheme a share or signature was produced under.
///
/// Each scheme hashes messages with its own domain separation tag, so shares
/// of one scheme never combine into a valid signature of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SignatureScheme {
    Basic,
    MessageAugmentation,
    ProofOfPossession,
}

impl SignatureScheme {
    /// The byte identifying the scheme inside a ciphertext.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Basic => 1,
            Self::MessageAugmentation => 2,
            Self::ProofOfPossession => 3,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Basic),
            2 => Some(Self::MessageAugmentation),
            3 => Some(Self::ProofOfPossession),
            _ => None,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Basic => "Basic",
            Self::MessageAugmentation => "MessageAugmentation",
            Self::ProofOfPossession => "ProofOfPossession",
        };
        f.write_str(s)
    }
}

/// What a set of combined shares is going to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Reconstruct the identity key of a ciphertext. Only proof of
    /// possession shares over the identity qualify.
    Decryption,
    /// Reconstruct a group signature under whichever scheme the shares share.
    Signing,
}

impl Role {
    /// Whether shares of the given scheme may be combined for this role.
    pub fn accepts(&self, scheme: SignatureScheme) -> bool {
        match self {
            Self::Decryption => scheme == SignatureScheme::ProofOfPossession,
            Self::Signing => true,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decryption => f.write_str("decryption"),
            Self::Signing => f.write_str("signing"),
        }
    }
}
