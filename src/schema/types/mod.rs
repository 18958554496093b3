pub use crate::format::LogicalType;
pub use crate::parquet_bridge::{ConvertedType, Repetition, Type};

mod physical_type;
pub use physical_type::*;
