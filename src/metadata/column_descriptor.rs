use crate::schema::types::{ConvertedType, LogicalType, PhysicalType, Repetition};

/// A descriptor for leaf-level primitive columns.
/// This encapsulates information such as definition and repetition levels, which are
/// needed to tell null slots from values.
#[derive(Debug, PartialEq, Clone)]
pub struct ColumnDescriptor {
    // The path of this column. For instance, ["a", "b", "c", "d"] for "a.b.c.d".
    path_in_schema: Vec<String>,

    physical_type: PhysicalType,

    // The repetition of the leaf itself
    repetition: Repetition,

    converted_type: Option<ConvertedType>,

    logical_type: Option<LogicalType>,

    // The maximum definition level for this column
    max_def_level: i16,

    // The maximum repetition level for this column
    max_rep_level: i16,
}

impl ColumnDescriptor {
    /// Creates new descriptor for leaf-level column.
    pub fn new(
        path_in_schema: Vec<String>,
        physical_type: PhysicalType,
        repetition: Repetition,
        converted_type: Option<ConvertedType>,
        logical_type: Option<LogicalType>,
        max_def_level: i16,
        max_rep_level: i16,
    ) -> Self {
        Self {
            path_in_schema,
            physical_type,
            repetition,
            converted_type,
            logical_type,
            max_def_level,
            max_rep_level,
        }
    }

    /// Returns maximum definition level for this column.
    pub fn max_def_level(&self) -> i16 {
        self.max_def_level
    }

    /// Returns maximum repetition level for this column.
    pub fn max_rep_level(&self) -> i16 {
        self.max_rep_level
    }

    pub fn path_in_schema(&self) -> &[String] {
        &self.path_in_schema
    }

    /// Returns the [`PhysicalType`] of this leaf column.
    pub fn physical_type(&self) -> &PhysicalType {
        &self.physical_type
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    pub fn converted_type(&self) -> Option<ConvertedType> {
        self.converted_type
    }

    pub fn logical_type(&self) -> Option<&LogicalType> {
        self.logical_type.as_ref()
    }

    /// Returns column name.
    pub fn name(&self) -> &str {
        self.path_in_schema
            .last()
            .map(|x| x.as_str())
            .unwrap_or_default()
    }
}
