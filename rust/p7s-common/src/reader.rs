// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::Read;

use p7s_abstractions::ReadSignatureError;

/// Read an entire signature blob, refusing inputs longer than `max_len`.
pub fn read_bounded(reader: impl Read, max_len: usize) -> Result<Vec<u8>, ReadSignatureError> {
    let limit = u64::try_from(max_len).unwrap_or(u64::MAX).saturating_add(1);

    let mut buf = Vec::new();
    reader.take(limit).read_to_end(&mut buf)?;

    if buf.len() > max_len {
        return Err(ReadSignatureError::TooLarge { max_len });
    }
    Ok(buf)
}
