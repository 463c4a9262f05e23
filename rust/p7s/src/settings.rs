// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::Pkcs7Backend;

/// Upper bound on bytes read by reader-based extraction unless configured otherwise.
pub const DEFAULT_MAX_INPUT_LEN: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ExtractSettings {
    pub(crate) backend: Pkcs7Backend,

    /// Reader-based extraction fails once more than this many bytes are available.
    pub(crate) max_input_len: usize,
}

impl ExtractSettings {
    /// Select the structural decode backend.
    pub fn with_backend(mut self, backend: Pkcs7Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Limit how many bytes reader-based extraction will accept.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn backend(&self) -> Pkcs7Backend {
        self.backend
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            backend: Pkcs7Backend::default(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}
