use crate::error::{Error, Result};
use crate::format::SchemaElement;
use crate::schema::types::{type_to_physical_type, Repetition};

use super::column_descriptor::ColumnDescriptor;

/// A schema descriptor. This holds the descriptors of all the leaf columns of a schema,
/// in the order in which they appear in the file (depth-first). This order defines the
/// index of a column in each row group.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDescriptor {
    name: String,

    leaves: Vec<ColumnDescriptor>,
}

impl SchemaDescriptor {
    /// Rebuilds the schema tree from its depth-first flattening, where the first element
    /// is the root and each group is followed by its `num_children` children.
    pub fn try_new(elements: &[SchemaElement]) -> Result<Self> {
        let root = elements
            .first()
            .ok_or_else(|| Error::oos("The schema must contain a root element"))?;

        let mut leaves = vec![];
        let mut path: Vec<&str> = vec![];
        // (children still to visit, definition level, repetition level) of each open group
        let mut groups = vec![(num_children(root)?, 0i16, 0i16)];
        let mut index = 1;

        while let Some(group) = groups.last_mut() {
            if group.0 == 0 {
                groups.pop();
                path.pop();
                continue;
            }
            group.0 -= 1;
            let (mut max_def_level, mut max_rep_level) = (group.1, group.2);

            let element = elements.get(index).ok_or_else(|| {
                Error::oos(format!(
                    "The schema declares more children than its {} elements",
                    elements.len()
                ))
            })?;
            index += 1;

            let repetition = element.repetition_type.unwrap_or(Repetition::Required);
            match repetition {
                Repetition::Optional => {
                    max_def_level += 1;
                }
                Repetition::Repeated => {
                    max_def_level += 1;
                    max_rep_level += 1;
                }
                Repetition::Required => {}
            }

            let children = num_children(element)?;
            if children > 0 {
                path.push(&element.name);
                groups.push((children, max_def_level, max_rep_level));
                continue;
            }

            let type_ = element.type_.ok_or_else(|| {
                Error::oos(format!(
                    "The leaf \"{}\" of the schema has no physical type",
                    element.name
                ))
            })?;
            let physical_type = type_to_physical_type(&type_, element.type_length)?;

            let path_in_schema = path
                .iter()
                .copied()
                .chain(std::iter::once(element.name.as_str()))
                .map(String::from)
                .collect();
            leaves.push(ColumnDescriptor::new(
                path_in_schema,
                physical_type,
                repetition,
                element.converted_type,
                element.logical_type.clone(),
                max_def_level,
                max_rep_level,
            ));
        }

        if index != elements.len() {
            return Err(Error::oos(format!(
                "Only {} of the {} schema elements belong to the schema tree",
                index,
                elements.len()
            )));
        }

        Ok(Self {
            name: root.name.clone(),
            leaves,
        })
    }

    /// Returns [`ColumnDescriptor`] for a field position.
    pub fn column(&self, i: usize) -> &ColumnDescriptor {
        &self.leaves[i]
    }

    /// Returns slice of [`ColumnDescriptor`].
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.leaves
    }

    /// Returns number of leaf-level columns.
    pub fn num_columns(&self) -> usize {
        self.leaves.len()
    }

    /// Returns schema name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn num_children(element: &SchemaElement) -> Result<usize> {
    let children = element.num_children.unwrap_or(0);
    children.try_into().map_err(|_| {
        Error::oos(format!(
            "The schema element \"{}\" has {} children",
            element.name, children
        ))
    })
}
