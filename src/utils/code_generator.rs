//! Short code generation.
//!
//! Codes are 12 characters of URL-safe base64 built from 72 bits of OS
//! randomness. Uniqueness is enforced by the caller
//! ([`crate::application::services::LinkService`]) and the database.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Length of a generated code in characters.
pub const CODE_LENGTH: usize = CODE_LENGTH_BYTES * 4 / 3;

/// Generates a random short code from `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns an error if the system random number generator is unavailable.
pub fn generate_code() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];
    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Returns true if `code` could have been produced by [`generate_code`].
///
/// Used to reject obviously foreign paths before touching the database.
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
