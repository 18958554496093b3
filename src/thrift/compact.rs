use std::convert::TryFrom;

use super::{FieldHeader, FieldType, ListHeader, MapHeader, ReadThrift};
use crate::encoding::{uleb128, zigzag_leb128};
use crate::error::{Error, Result};

/// The maximum nesting of structs and collections this reader accepts.
const MAX_DEPTH: usize = 64;

/// A cursor over a buffer encoded with the
/// [thrift compact protocol](https://github.com/apache/thrift/blob/master/doc/specs/thrift-compact-protocol.md).
///
/// The reader keeps one "last field id" per struct nesting level: [`CompactReader::struct_begin`]
/// pushes it and [`CompactReader::struct_end`] pops it, so that the delta-encoded field ids of a
/// struct are not affected by the fields of the structs nested in it.
#[derive(Debug)]
pub struct CompactReader<'a> {
    buffer: &'a [u8],
    position: usize,
    last_field_id: i16,
    field_ids: Vec<i16>,
}

impl<'a> CompactReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            last_field_id: 0,
            field_ids: Vec::new(),
        }
    }

    /// The number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// The current struct nesting depth.
    pub fn depth(&self) -> usize {
        self.field_ids.len()
    }

    fn end_of_input(&self, needed: usize) -> Error {
        Error::EndOfInput {
            position: self.position,
            needed,
        }
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = *self
            .buffer
            .get(self.position)
            .ok_or_else(|| self.end_of_input(1))?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        if length > self.remaining() {
            return Err(self.end_of_input(length));
        }
        let bytes = &self.buffer[self.position..self.position + length];
        self.position += length;
        Ok(bytes)
    }

    fn varint_error(&self, e: Error) -> Error {
        match e {
            Error::EndOfInput { needed, .. } => Error::EndOfInput {
                position: self.buffer.len(),
                needed,
            },
            other => other,
        }
    }

    pub fn read_var_u32(&mut self) -> Result<u32> {
        let (value, consumed) =
            uleb128::decode_u32(&self.buffer[self.position..]).map_err(|e| self.varint_error(e))?;
        self.position += consumed;
        Ok(value)
    }

    pub fn read_var_u64(&mut self) -> Result<u64> {
        let (value, consumed) =
            uleb128::decode(&self.buffer[self.position..]).map_err(|e| self.varint_error(e))?;
        self.position += consumed;
        Ok(value)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_byte().map(|x| x as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let value = self.read_i32()?;
        i16::try_from(value)
            .map_err(|_| Error::protocol(format!("{} does not fit in an i16", value)))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_var_u32().map(zigzag_leb128::zigzag_decode_i32)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_var_u64().map(zigzag_leb128::zigzag_decode_i64)
    }

    pub fn read_double(&mut self) -> Result<f64> {
        let bytes = self.read_bytes(8)?;
        let mut array = [0u8; 8];
        array.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(array))
    }

    /// Reads a standalone boolean: a single byte, 1 being `true`.
    /// Booleans that are struct fields are carried by their [`FieldHeader`] instead.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_byte().map(|x| x == 1)
    }

    pub fn read_binary(&mut self) -> Result<&'a [u8]> {
        let length = self.read_var_u32()? as usize;
        if length == 0 {
            return Ok(&[]);
        }
        self.read_bytes(length)
    }

    pub fn read_string(&mut self) -> Result<String> {
        let position = self.position;
        let bytes = self.read_binary()?;
        std::str::from_utf8(bytes)
            .map(|x| x.to_string())
            .map_err(|_| Error::InvalidUtf8 { position })
    }

    pub fn struct_begin(&mut self) -> Result<()> {
        if self.field_ids.len() >= MAX_DEPTH {
            return Err(Error::protocol(format!(
                "structs are nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        self.field_ids.push(self.last_field_id);
        self.last_field_id = 0;
        Ok(())
    }

    pub fn struct_end(&mut self) {
        self.last_field_id = self.field_ids.pop().unwrap_or_default();
    }

    /// Reads the header of the next field of the current struct.
    pub fn field_begin(&mut self) -> Result<FieldHeader> {
        let byte = self.read_byte()?;
        let field_type = FieldType::try_from_nibble(byte & 0x0f)?;
        if field_type == FieldType::Stop {
            return Ok(FieldHeader {
                field_type,
                id: 0,
                bool_value: None,
            });
        }

        let delta = (byte >> 4) as i16;
        let id = if delta == 0 {
            self.read_i16()?
        } else {
            self.last_field_id
                .checked_add(delta)
                .ok_or_else(|| Error::protocol("field id overflows an i16"))?
        };
        self.last_field_id = id;

        let bool_value = match field_type {
            FieldType::BooleanTrue => Some(true),
            FieldType::BooleanFalse => Some(false),
            _ => None,
        };
        Ok(FieldHeader {
            field_type,
            id,
            bool_value,
        })
    }

    pub fn list_begin(&mut self) -> Result<ListHeader> {
        let byte = self.read_byte()?;
        let element_type = FieldType::try_from_nibble(byte & 0x0f)?;
        let size = match byte >> 4 {
            15 => self.read_var_u32()? as usize,
            size => size as usize,
        };
        if size > 0 && element_type == FieldType::Stop {
            return Err(Error::protocol(format!(
                "a list of {} elements has no element type",
                size
            )));
        }
        Ok(ListHeader { element_type, size })
    }

    /// Sets share the framing of lists.
    pub fn set_begin(&mut self) -> Result<ListHeader> {
        self.list_begin()
    }

    pub fn map_begin(&mut self) -> Result<MapHeader> {
        let size = self.read_var_u32()? as usize;
        if size == 0 {
            return Ok(MapHeader {
                key_type: FieldType::Stop,
                value_type: FieldType::Stop,
                size,
            });
        }
        let types = self.read_byte()?;
        let key_type = FieldType::try_from_nibble(types >> 4)?;
        let value_type = FieldType::try_from_nibble(types & 0x0f)?;
        if key_type == FieldType::Stop || value_type == FieldType::Stop {
            return Err(Error::protocol(format!(
                "a map of {} entries has no key or value type",
                size
            )));
        }
        Ok(MapHeader {
            key_type,
            value_type,
            size,
        })
    }

    /// Reads a struct: calls `f` once per field until the stop field.
    /// `f` is responsible for consuming (or skipping) the value of the field.
    pub fn read_struct<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, FieldHeader) -> Result<()>,
    {
        self.struct_begin()?;
        loop {
            let field = self.field_begin()?;
            if field.field_type == FieldType::Stop {
                break;
            }
            f(self, field)?;
        }
        self.struct_end();
        Ok(())
    }

    /// Reads the value of a field whose header was just read.
    pub fn read_field<T: ReadThrift>(&mut self, field: &FieldHeader) -> Result<T> {
        if !field.field_type.is_compatible(T::WIRE_TYPE) {
            return Err(Error::protocol(format!(
                "field {} has wire type {:?} but {:?} was expected",
                field.id,
                field.field_type,
                T::WIRE_TYPE
            )));
        }
        T::read_field(self, field)
    }

    /// Reads a list (or set) of `T`.
    pub fn read_list<T: ReadThrift>(&mut self) -> Result<Vec<T>> {
        let header = self.list_begin()?;
        if header.size > 0 && !header.element_type.is_compatible(T::WIRE_TYPE) {
            return Err(Error::protocol(format!(
                "list elements have wire type {:?} but {:?} was expected",
                header.element_type,
                T::WIRE_TYPE
            )));
        }
        // every element takes at least one byte
        let mut values = Vec::with_capacity(header.size.min(self.remaining()));
        for _ in 0..header.size {
            values.push(T::read_from(self)?);
        }
        Ok(values)
    }

    /// Discards the value of a field of type `field_type`.
    ///
    /// This is what allows structs to carry fields this reader does not know about.
    pub fn skip(&mut self, field_type: FieldType) -> Result<()> {
        self.skip_value(field_type, false, 0)
    }

    fn skip_value(&mut self, field_type: FieldType, is_element: bool, depth: usize) -> Result<()> {
        if depth >= MAX_DEPTH {
            return Err(Error::protocol(format!(
                "values are nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        match field_type {
            FieldType::Stop => {}
            // a boolean field carries its value in the header; a boolean element takes one byte
            FieldType::BooleanTrue | FieldType::BooleanFalse => {
                if is_element {
                    self.read_byte()?;
                }
            }
            FieldType::Byte => {
                self.read_byte()?;
            }
            FieldType::I16 | FieldType::I32 => {
                self.read_var_u32()?;
            }
            FieldType::I64 => {
                self.read_var_u64()?;
            }
            FieldType::Double => {
                self.read_bytes(8)?;
            }
            FieldType::Binary => {
                self.read_binary()?;
            }
            FieldType::List | FieldType::Set => {
                let header = self.list_begin()?;
                for _ in 0..header.size {
                    self.skip_value(header.element_type, true, depth + 1)?;
                }
            }
            FieldType::Map => {
                let header = self.map_begin()?;
                for _ in 0..header.size {
                    self.skip_value(header.key_type, true, depth + 1)?;
                    self.skip_value(header.value_type, true, depth + 1)?;
                }
            }
            FieldType::Struct => {
                self.struct_begin()?;
                loop {
                    let field = self.field_begin()?;
                    if field.field_type == FieldType::Stop {
                        break;
                    }
                    self.skip_value(field.field_type, false, depth + 1)?;
                }
                self.struct_end();
            }
        }
        Ok(())
    }
}
