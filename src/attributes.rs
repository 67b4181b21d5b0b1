//! Node attribute columns: binary, categorical and continuous, with
//! missing values represented as `None`.

use crate::types::*;

/// A single named attribute column of length `N`.
#[derive(Clone, Debug)]
pub struct AttributeColumn<T> {
    /// Name of the column, as given in the attribute file header.
    pub name: String,
    /// One value per node, `None` when the value is NA.
    pub values: Vec<Option<T>>,
}

impl<T> AttributeColumn<T> {
    pub fn new(name: String, values: Vec<Option<T>>) -> AttributeColumn<T> {
        AttributeColumn { name, values }
    }
}

/// The attribute tables of a graph.
///
/// Columns are looked up by name at model-parse time and by index on the
/// hot path.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    pub binary: Vec<AttributeColumn<bool>>,
    pub categorical: Vec<AttributeColumn<CategoryT>>,
    pub continuous: Vec<AttributeColumn<f64>>,
}

impl Attributes {
    pub fn new() -> Attributes {
        Attributes {
            binary: Vec::new(),
            categorical: Vec::new(),
            continuous: Vec::new(),
        }
    }

    /// Return the index of the binary column with the given name, if any.
    pub fn binary_index(&self, name: &str) -> Option<usize> {
        self.binary.iter().position(|column| column.name == name)
    }

    /// Return the index of the categorical column with the given name, if any.
    pub fn categorical_index(&self, name: &str) -> Option<usize> {
        self.categorical
            .iter()
            .position(|column| column.name == name)
    }

    /// Return the index of the continuous column with the given name, if any.
    pub fn continuous_index(&self, name: &str) -> Option<usize> {
        self.continuous
            .iter()
            .position(|column| column.name == name)
    }

    /// Check that every column has exactly `nodes_number` values.
    pub fn validate(&self, nodes_number: NodeT) -> Result<()> {
        let expected = nodes_number as usize;
        for column in self.binary.iter().map(|c| (&c.name, c.values.len())) {
            if column.1 != expected {
                return Err(format!(
                    "The binary attribute {} has {} values but the graph has {} nodes.",
                    column.0, column.1, expected
                ));
            }
        }
        for column in self.categorical.iter().map(|c| (&c.name, c.values.len())) {
            if column.1 != expected {
                return Err(format!(
                    "The categorical attribute {} has {} values but the graph has {} nodes.",
                    column.0, column.1, expected
                ));
            }
        }
        for column in self.continuous.iter().map(|c| (&c.name, c.values.len())) {
            if column.1 != expected {
                return Err(format!(
                    "The continuous attribute {} has {} values but the graph has {} nodes.",
                    column.0, column.1, expected
                ));
            }
        }
        Ok(())
    }
}
