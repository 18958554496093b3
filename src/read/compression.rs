use crate::compression::{decompress_to_vec, Compression};
use crate::error::{Error, Result};
use crate::page::{CompressedPage, DataPageHeaderV2, Page, PageType};

fn decompress_v1(page: CompressedPage) -> Result<Page> {
    let offset = page.offset();
    let buffer = if page.compression() == Compression::Uncompressed {
        page.buffer
    } else {
        decompress_to_vec(page.compression(), &page.buffer, page.uncompressed_size()?)?
    };
    Ok(Page::new(page.header, buffer, offset))
}

fn decompress_v2(mut page: CompressedPage, header: &DataPageHeaderV2) -> Result<Page> {
    // The repetition and definition levels of data pages v2 are never compressed:
    // only the bytes after them are.
    let offset = header.definition_levels_byte_length as i64
        + header.repetition_levels_byte_length as i64;
    let uncompressed_page_size = page.uncompressed_size()?;
    if header.definition_levels_byte_length < 0
        || header.repetition_levels_byte_length < 0
        || offset as usize > page.buffer.len()
        || offset as usize > uncompressed_page_size
    {
        return Err(Error::oos(format!(
            "The levels of the page at offset {} ({} bytes) do not fit in the page",
            page.offset(),
            offset
        )));
    }
    let offset = offset as usize;

    // When is_compressed flag is missing the page is considered compressed
    if header.is_compressed() && page.compression() != Compression::Uncompressed {
        let values = decompress_to_vec(
            page.compression(),
            &page.buffer[offset..],
            uncompressed_page_size - offset,
        )?;
        page.buffer.truncate(offset);
        page.buffer.extend_from_slice(&values);
    }
    let page_offset = page.offset();
    Ok(Page::new(page.header, page.buffer, page_offset))
}

/// Decompresses a page. Index pages are returned as they are, since they are never decoded.
pub fn decompress(page: CompressedPage) -> Result<Page> {
    match page.header().type_ {
        PageType::DataPageV2 => {
            let header = page.header().data_page_header_v2.clone().ok_or_else(|| {
                Error::oos(format!(
                    "The data page v2 at offset {} has no data page v2 header",
                    page.offset()
                ))
            })?;
            decompress_v2(page, &header)
        }
        PageType::IndexPage => {
            let offset = page.offset();
            Ok(Page::new(page.header, page.buffer, offset))
        }
        PageType::DataPage | PageType::DictionaryPage => decompress_v1(page),
    }
}
