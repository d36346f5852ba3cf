//! Record access trait.
//!
//! The engine reads catalog rows positionally. Anything that can hand out
//! the text of a cell by column index can be searched: rows fetched as
//! `Vec<String>`, borrowed `&[&str]` slices, fixed arrays, or a data layer's
//! own row type.

/// A catalog row whose cells are addressed by column index.
///
/// Implemented for slices, vectors and arrays of anything that is
/// `AsRef<str>`. A manual implementation looks like this:
///
/// ```
/// use partsieve::Record;
///
/// struct Part {
///     id: String,
///     cells: Vec<String>,
/// }
///
/// impl Record for Part {
///     fn cell(&self, column: usize) -> Option<&str> {
///         match column {
///             0 => Some(&self.id),
///             n => self.cells.get(n - 1).map(String::as_str),
///         }
///     }
///
///     fn cell_count(&self) -> usize {
///         self.cells.len() + 1
///     }
/// }
///
/// let part = Part { id: "R-0001".into(), cells: vec!["10.2k".into()] };
/// assert_eq!(part.part_id(), "R-0001");
/// assert_eq!(part.cell(1), Some("10.2k"));
/// ```
pub trait Record {
    /// Returns the text of the cell at `column`, or `None` past the end.
    fn cell(&self, column: usize) -> Option<&str>;

    /// Number of cells in the row.
    fn cell_count(&self) -> usize;

    /// Identifier of the part, used to name the record in diagnostics.
    ///
    /// Defaults to the first cell.
    fn part_id(&self) -> &str {
        self.cell(0).unwrap_or("")
    }
}

impl<S: AsRef<str>> Record for [S] {
    fn cell(&self, column: usize) -> Option<&str> {
        self.get(column).map(AsRef::as_ref)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>> Record for Vec<S> {
    fn cell(&self, column: usize) -> Option<&str> {
        self.as_slice().cell(column)
    }

    fn cell_count(&self) -> usize {
        self.len()
    }
}

impl<S: AsRef<str>, const N: usize> Record for [S; N] {
    fn cell(&self, column: usize) -> Option<&str> {
        self.as_slice().cell(column)
    }

    fn cell_count(&self) -> usize {
        N
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn cell(&self, column: usize) -> Option<&str> {
        (**self).cell(column)
    }

    fn cell_count(&self) -> usize {
        (**self).cell_count()
    }

    fn part_id(&self) -> &str {
        (**self).part_id()
    }
}
