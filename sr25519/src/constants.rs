//! Lengths of the serialized forms.

/// Size of a seed (mini secret key) in bytes.
pub const MINI_SECRET_KEY_LENGTH: usize = 32;

/// Size of an expanded secret key in bytes: a 32-byte scalar followed by
/// the 32-byte nonce seed.
pub const SECRET_KEY_LENGTH: usize = 64;

/// Size of a compressed Ristretto public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Size of a serialized keypair in bytes: secret key then public key.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// Size of a signature in bytes: the commitment R then the scalar s.
pub const SIGNATURE_LENGTH: usize = 64;

/// Size of a key derivation chain code in bytes.
pub const CHAIN_CODE_LENGTH: usize = 32;
