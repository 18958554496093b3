use crate::encoding::{hybrid_rle::HybridRleDecoder, Encoding};
use crate::error::{Error, Result};
use crate::page::{Page, PageType};
use crate::read::InvalidIndexPolicy;
use crate::schema::types::PhysicalType;
use crate::value::Value;

use super::plain::decode_plain;

/// Decodes the values of a dictionary page.
pub fn read_dict_page(page: &Page, physical_type: &PhysicalType) -> Result<Vec<Value>> {
    let header = match (page.page_type(), page.header().dictionary_page_header.as_ref()) {
        (PageType::DictionaryPage, Some(header)) => header,
        _ => {
            return Err(Error::oos(format!(
                "The page at offset {} is not a dictionary page",
                page.offset()
            )))
        }
    };
    if *physical_type == PhysicalType::Boolean {
        return Err(Error::oos("Boolean columns cannot be dictionary-encoded"));
    }
    match header.encoding {
        Encoding::Plain | Encoding::PlainDictionary => {}
        other => {
            return Err(Error::oos(format!(
                "Dictionary pages must be PLAIN-encoded, found {:?}",
                other
            )))
        }
    }
    let num_values: usize = header.num_values.try_into()?;
    decode_plain(page.buffer(), physical_type, num_values)
}

/// Decodes up to `length` dictionary indices, a bit width byte followed by the
/// RLE/bit-packed hybrid runs, into the entries of `dictionary` they point to.
pub fn decode_indices(
    values: &[u8],
    dictionary: &[Value],
    length: usize,
    policy: InvalidIndexPolicy,
) -> Result<Vec<Value>> {
    let (bit_width, indices) = match values.split_first() {
        Some((bit_width, indices)) => (*bit_width, indices),
        None if length == 0 => return Ok(vec![]),
        None => return Err(Error::oos("A dictionary-encoded page must start with its bit width")),
    };
    if bit_width > 32 {
        return Err(Error::oos(format!(
            "Bit width of dictionary indices cannot be larger than 32 (found {})",
            bit_width
        )));
    }

    let mut invalid = 0usize;
    let values = HybridRleDecoder::try_new(indices, bit_width as usize, length)?
        .map(|index| {
            let index = index?;
            match dictionary.get(index as usize) {
                Some(value) => Ok(value.clone()),
                None => match policy {
                    InvalidIndexPolicy::Placeholder => {
                        invalid += 1;
                        Ok(Value::InvalidIndex(index))
                    }
                    InvalidIndexPolicy::Fail => Err(Error::InvalidIndex {
                        index,
                        dictionary_len: dictionary.len(),
                    }),
                },
            }
        })
        .collect::<Result<Vec<_>>>()?;

    if invalid > 0 {
        log::warn!(
            "{} dictionary indices out of a dictionary of {} values were replaced by placeholders",
            invalid,
            dictionary.len()
        );
    }
    Ok(values)
}
