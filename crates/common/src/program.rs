//! Program images for the LS-8.
//!
//! A program is the byte sequence the loader copies into memory starting
//! at address 0. It must fit into the 256-byte address space.

use crate::error::DecodeError;
use crate::MEMORY_SIZE;

/// An LS-8 program image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    /// Create a program from raw bytes.
    ///
    /// Fails with [`DecodeError::ProgramTooLarge`] if the image does not
    /// fit into memory.
    pub fn new(bytes: Vec<u8>) -> Result<Self, DecodeError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(DecodeError::ProgramTooLarge(bytes.len()));
        }
        Ok(Self { bytes })
    }

    /// The program bytes, in load order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes in the program.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the program has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl TryFrom<Vec<u8>> for Program {
    type Error = DecodeError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}
