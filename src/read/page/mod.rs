mod reader;

pub use reader::{PageMetaData, PageReader, DEFAULT_MAX_HEADER_SIZE};
