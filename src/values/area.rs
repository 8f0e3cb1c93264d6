//! Grid template area matrices.

use std::collections::BTreeMap;

use crate::error::{LayoutError, Result};
use crate::props::PropValue;

/// A named grid layout expressed as row strings.
///
/// Every row must have the same number of cells, each cell is either an
/// area name or a run of `.` (an unnamed cell), and every named area must
/// cover a rectangle.
///
/// ```rust
/// use flexgrid::AreaMatrix;
///
/// let areas = AreaMatrix::new(["a a", "b c"]).unwrap();
/// assert_eq!(areas.as_css(), r#""a a" "b c""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaMatrix {
    rows: Vec<Vec<String>>,
}

impl AreaMatrix {
    pub fn new<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.as_ref().split_whitespace().map(str::to_string).collect())
            .collect();

        if rows.is_empty() {
            return Err(LayoutError::area_matrix("no rows"));
        }

        let width = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(LayoutError::area_matrix(format!("row {} is empty", i + 1)));
            }
            if row.len() != width {
                return Err(LayoutError::area_matrix(format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            for cell in row {
                if !is_null_cell(cell) && !is_area_name(cell) {
                    return Err(LayoutError::area_matrix(format!(
                        "'{}' in row {} is not a valid area name",
                        cell,
                        i + 1
                    )));
                }
            }
        }

        let matrix = Self { rows };
        matrix.check_rectangles()?;
        Ok(matrix)
    }

    /// Reads a matrix from a list-of-strings prop value.
    pub fn from_prop(prop: &str, value: &PropValue) -> Result<Self> {
        let items = value.as_list().ok_or_else(|| {
            LayoutError::invalid_prop(prop, "list of row strings", value.describe())
        })?;
        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let row = item.as_str().ok_or_else(|| {
                LayoutError::invalid_prop(
                    prop,
                    "list of row strings",
                    format!("list containing {}", item.describe()),
                )
            })?;
            rows.push(row);
        }
        Self::new(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Distinct area names in order of first appearance.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for cell in self.rows.iter().flatten() {
            if !is_null_cell(cell) && !names.contains(&cell.as_str()) {
                names.push(cell.as_str());
            }
        }
        names
    }

    /// Each row quoted, rows separated by a space.
    pub fn as_css(&self) -> String {
        self.rows
            .iter()
            .map(|row| format!("\"{}\"", row.join(" ")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn check_rectangles(&self) -> Result<()> {
        // name -> (min_row, max_row, min_col, max_col, cell_count)
        let mut bounds: BTreeMap<&str, (usize, usize, usize, usize, usize)> = BTreeMap::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if is_null_cell(cell) {
                    continue;
                }
                let entry = bounds.entry(cell.as_str()).or_insert((r, r, c, c, 0));
                entry.0 = entry.0.min(r);
                entry.1 = entry.1.max(r);
                entry.2 = entry.2.min(c);
                entry.3 = entry.3.max(c);
                entry.4 += 1;
            }
        }
        for (name, (r0, r1, c0, c1, count)) in bounds {
            if (r1 - r0 + 1) * (c1 - c0 + 1) != count {
                return Err(LayoutError::area_matrix(format!(
                    "area '{}' does not form a rectangle",
                    name
                )));
            }
        }
        Ok(())
    }
}

fn is_null_cell(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c == '.')
}

fn is_area_name(cell: &str) -> bool {
    let mut chars = cell.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '-' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_every_row() {
        let areas = AreaMatrix::new(["a a", "b c"]).unwrap();
        assert_eq!(areas.as_css(), "\"a a\" \"b c\"");
        assert_eq!(areas.row_count(), 2);
        assert_eq!(areas.column_count(), 2);
    }

    #[test]
    fn test_single_row_is_quoted() {
        let areas = AreaMatrix::new(["header header header"]).unwrap();
        assert_eq!(areas.as_css(), "\"header header header\"");
    }

    #[test]
    fn test_whitespace_normalized() {
        let areas = AreaMatrix::new(["  a   b ", "a b"]).unwrap();
        assert_eq!(areas.as_css(), "\"a b\" \"a b\"");
    }

    #[test]
    fn test_null_cells() {
        let areas = AreaMatrix::new(["head head", "... side"]).unwrap();
        assert_eq!(areas.names(), vec!["head", "side"]);
    }

    #[test]
    fn test_inconsistent_row_lengths() {
        let err = AreaMatrix::new(["a a", "b"]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::area_matrix("row 2 has 1 cells, expected 2")
        );
    }

    #[test]
    fn test_non_rectangular_area() {
        let err = AreaMatrix::new(["a a", "a b"]).unwrap_err();
        assert!(err.to_string().contains("area 'a'"));
    }

    #[test]
    fn test_disjoint_area() {
        assert!(AreaMatrix::new(["a b a"]).is_err());
    }

    #[test]
    fn test_invalid_names() {
        assert!(AreaMatrix::new(["1a b"]).is_err());
        assert!(AreaMatrix::new(["a \"b"]).is_err());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(AreaMatrix::new(Vec::<&str>::new()).is_err());
        assert!(AreaMatrix::new([""]).is_err());
    }

    #[test]
    fn test_from_prop_requires_strings() {
        let value = PropValue::List(vec![PropValue::from("a"), PropValue::from(3)]);
        let err = AreaMatrix::from_prop("areas", &value).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidProp { .. }));
        assert!(AreaMatrix::from_prop("areas", &PropValue::from("a b")).is_err());
    }
}
