//! Canonical binary encoding of identities, actions and transactions.
//!
//! The wire format is borsh: enum variants are a `u8` index in declaration
//! order, options a presence byte, fixed arrays are raw bytes, and vectors or
//! strings carry a `u32` little-endian length prefix. Integers are fixed-width
//! little-endian. Decoding consumes the whole input, so every value has exactly
//! one accepted encoding.

use std::io;

use anchor_lang::prelude::*;

use crate::error::ErrorCode;

pub fn encode<T: AnchorSerialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    value
        .serialize(&mut bytes)
        .map_err(|_| error!(ErrorCode::EncodingFailed))?;
    Ok(bytes)
}

pub fn decode<T: AnchorDeserialize>(bytes: &[u8]) -> Result<T> {
    let mut remaining = bytes;
    let value = T::deserialize(&mut remaining).map_err(|e| error!(classify(&e)))?;

    require!(remaining.is_empty(), ErrorCode::TrailingBytes);

    Ok(value)
}

/// Length of `value` once encoded.
pub fn encoded_len<T: AnchorSerialize>(value: &T) -> usize {
    let mut counter = ByteCounter(0);
    // The counter never fails, borsh only surfaces writer errors here.
    value.serialize(&mut counter).ok();
    counter.0
}

fn classify(error: &io::Error) -> ErrorCode {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        return ErrorCode::TruncatedInput;
    }

    let message = error.to_string();
    if message.starts_with("Unexpected length of input") {
        ErrorCode::TruncatedInput
    } else if message.contains("variant")
        || message.contains("Option representation")
        || message.contains("bool representation")
    {
        ErrorCode::UnknownDiscriminant
    } else {
        ErrorCode::MalformedEncoding
    }
}

struct ByteCounter(usize);

impl io::Write for ByteCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0 += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
