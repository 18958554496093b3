use super::page::DEFAULT_MAX_HEADER_SIZE;

/// What to do when the last 4 bytes of a file are not `PAR1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MagicPolicy {
    /// The file is rejected with [`crate::error::Error::InvalidMagic`].
    #[default]
    Strict,
    /// A warning is logged and the footer is read anyway.
    Lenient,
}

/// What to do with a dictionary index that is out of the bounds of the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InvalidIndexPolicy {
    /// The value is replaced by [`crate::Value::InvalidIndex`].
    #[default]
    Placeholder,
    /// The page fails with [`crate::error::Error::InvalidIndex`].
    Fail,
}

/// What to do with a page whose content can't be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageErrorPolicy {
    /// A warning is logged and the page's values are dropped.
    #[default]
    Skip,
    /// The error is returned to the caller.
    Fail,
}

/// Options to read a parquet file.
///
/// Errors of the file structure (footer, page headers, short reads) are always returned;
/// these options only relax how the contents of the file are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReadOptions {
    pub magic: MagicPolicy,
    /// The maximum number of bytes read ahead of a page to parse its header
    pub max_header_size: usize,
    pub invalid_index: InvalidIndexPolicy,
    pub page_errors: PageErrorPolicy,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            magic: MagicPolicy::default(),
            max_header_size: DEFAULT_MAX_HEADER_SIZE,
            invalid_index: InvalidIndexPolicy::default(),
            page_errors: PageErrorPolicy::default(),
        }
    }
}

impl ReadOptions {
    pub fn with_magic(mut self, magic: MagicPolicy) -> Self {
        self.magic = magic;
        self
    }

    pub fn with_max_header_size(mut self, max_header_size: usize) -> Self {
        self.max_header_size = max_header_size;
        self
    }

    pub fn with_invalid_index(mut self, invalid_index: InvalidIndexPolicy) -> Self {
        self.invalid_index = invalid_index;
        self
    }

    pub fn with_page_errors(mut self, page_errors: PageErrorPolicy) -> Self {
        self.page_errors = page_errors;
        self
    }
}
