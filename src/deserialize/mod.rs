//! Decoding of the values of pages into [`Value`]s.
mod dictionary;
mod plain;

pub use dictionary::{decode_indices, read_dict_page};
pub use plain::decode_plain;

use crate::encoding::{hybrid_rle::HybridRleDecoder, Encoding};
use crate::error::{Error, Result};
use crate::metadata::ColumnDescriptor;
use crate::page::{Page, PageType};
use crate::read::levels::{decode_validity, split_buffer_v1};
use crate::read::ReadOptions;
use crate::schema::types::PhysicalType;
use crate::value::Value;

/// The sections of the buffer of a data page.
struct PageSections<'a> {
    num_values: usize,
    encoding: Encoding,
    def_levels: Option<&'a [u8]>,
    values: &'a [u8],
}

fn split_buffer<'a>(page: &'a Page, descriptor: &ColumnDescriptor) -> Result<PageSections<'a>> {
    if descriptor.max_rep_level() > 0 {
        return Err(Error::FeatureNotSupported(
            "Reading columns with repetition levels".to_string(),
        ));
    }
    let has_def_levels = descriptor.max_def_level() > 0;
    let buffer = page.buffer();

    match (page.page_type(), &page.header().data_page_header, &page.header().data_page_header_v2) {
        (PageType::DataPage, Some(header), _) => {
            let (def_levels, values) = if has_def_levels {
                match header.definition_level_encoding {
                    Encoding::Rle => {
                        let (levels, values) = split_buffer_v1(buffer)?;
                        (Some(levels), values)
                    }
                    Encoding::BitPacked => {
                        return Err(Error::FeatureNotSupported(
                            "Reading definition levels encoded with BIT_PACKED".to_string(),
                        ))
                    }
                    other => {
                        return Err(Error::oos(format!(
                            "Definition levels cannot be encoded with {:?}",
                            other
                        )))
                    }
                }
            } else {
                (None, buffer)
            };
            Ok(PageSections {
                num_values: header.num_values.try_into()?,
                encoding: header.encoding,
                def_levels,
                values,
            })
        }
        (PageType::DataPageV2, _, Some(header)) => {
            let rep_length: usize = header.repetition_levels_byte_length.try_into()?;
            let def_length: usize = header.definition_levels_byte_length.try_into()?;
            let levels_end = rep_length + def_length;
            if levels_end > buffer.len() {
                return Err(Error::oos(format!(
                    "The levels of the page at offset {} ({} bytes) do not fit in its {} bytes",
                    page.offset(),
                    levels_end,
                    buffer.len()
                )));
            }
            let def_levels = &buffer[rep_length..levels_end];
            Ok(PageSections {
                num_values: header.num_values.try_into()?,
                encoding: header.encoding,
                def_levels: has_def_levels.then(|| def_levels),
                values: &buffer[levels_end..],
            })
        }
        _ => Err(Error::oos(format!(
            "The page at offset {} is not a data page with its header",
            page.offset()
        ))),
    }
}

/// Decodes boolean values encoded with RLE: a 4-byte length followed by the hybrid runs.
fn decode_boolean_rle(values: &[u8], length: usize) -> Result<Vec<Value>> {
    let (runs, _) = split_buffer_v1(values)?;
    HybridRleDecoder::try_new(runs, 1, length)?
        .map(|x| x.map(|bit| Value::Boolean(bit == 1)))
        .collect()
}

fn decode_values(
    sections: &PageSections,
    physical_type: &PhysicalType,
    dictionary: Option<&[Value]>,
    length: usize,
    options: &ReadOptions,
) -> Result<Vec<Value>> {
    match (sections.encoding, physical_type) {
        (Encoding::Plain, _) => decode_plain(sections.values, physical_type, length),
        (encoding, _) if encoding.is_dictionary() => {
            let dictionary = dictionary.ok_or_else(|| {
                Error::oos("A dictionary-encoded page must be preceded by a dictionary page")
            })?;
            decode_indices(sections.values, dictionary, length, options.invalid_index)
        }
        (Encoding::Rle, PhysicalType::Boolean) => decode_boolean_rle(sections.values, length),
        (encoding, physical_type) => Err(Error::FeatureNotSupported(format!(
            "Decoding {:?} values encoded with {:?}",
            physical_type, encoding
        ))),
    }
}

/// Decodes the values of a data page (v1 or v2) of the column described by `descriptor`.
///
/// Slots whose definition level is below the column's maximum are returned as
/// [`Value::Null`]. When the values end before the page's declared number of values,
/// the values decoded so far are returned.
pub fn decode_page(
    page: &Page,
    descriptor: &ColumnDescriptor,
    dictionary: Option<&[Value]>,
    options: &ReadOptions,
) -> Result<Vec<Value>> {
    let sections = split_buffer(page, descriptor)?;
    let physical_type = descriptor.physical_type();

    let validity = sections
        .def_levels
        .map(|levels| decode_validity(levels, descriptor.max_def_level(), sections.num_values))
        .transpose()?;

    let Some(validity) = validity else {
        return decode_values(&sections, physical_type, dictionary, sections.num_values, options);
    };

    let num_valid = validity.iter().filter(|is_valid| **is_valid).count();
    let mut values = decode_values(&sections, physical_type, dictionary, num_valid, options)?
        .into_iter();

    let mut result = Vec::with_capacity(validity.len());
    for is_valid in validity {
        if is_valid {
            match values.next() {
                Some(value) => result.push(value),
                None => break,
            }
        } else {
            result.push(Value::Null);
        }
    }
    Ok(result)
}
