//! Short code generation.
//!
//! Codes are drawn uniformly, character by character, from a 62-symbol
//! alphanumeric alphabet using the OS entropy source. No uniqueness check
//! happens here; collisions surface as unique-key conflicts from the
//! durable store and the caller retries.

use crate::error::AppError;

/// The 62 alphanumeric symbols short codes are built from.
pub const CODE_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default generated code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

// Largest multiple of 62 that fits in a byte; bytes at or above this are
// rejected so the modulo stays uniform.
const REJECTION_BOUND: u8 = 248;

/// Produces short codes for new links.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Generates one code of the configured fixed length.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RandomSource`] if the OS entropy read fails.
    /// Callers must abort link creation; a weaker source is never
    /// substituted.
    fn generate_short_code(&self) -> Result<String, AppError>;
}

/// Generator backed by the OS cryptographic random source.
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate_short_code(&self) -> Result<String, AppError> {
        let mut code = String::with_capacity(self.length);
        let mut buffer = [0u8; 32];

        while code.len() < self.length {
            getrandom::fill(&mut buffer)
                .map_err(|e| AppError::RandomSource(format!("entropy read failed: {e}")))?;

            for byte in buffer {
                if code.len() == self.length {
                    break;
                }
                if byte < REJECTION_BOUND {
                    code.push(CODE_ALPHABET[(byte % 62) as usize] as char);
                }
            }
        }

        Ok(code)
    }
}
