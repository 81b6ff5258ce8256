use std::fmt;

use crate::error::{ListError, Result};
use crate::list::List;
use crate::repr::Repr;

/// Rectangular nested list, indexed `[row][col]`.
pub struct Matrix<T> {
    rows: List<List<T>>,
    cols: usize,
}

impl<T> Matrix<T> {
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<List<T>>())
            .collect::<Vec<_>>();
        let cols = rows.first().map_or(0, List::len);
        if let Some((row, found)) = rows
            .iter()
            .map(List::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(ListError::RaggedRows {
                row,
                expected: cols,
                found,
            });
        }

        Ok(Self {
            rows: List::from(rows),
            cols,
        })
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.rows.len(), self.cols)
    }

    pub fn set(&self, row: isize, col: isize, value: T) -> Result<()> {
        self.row(row)?.set(col, value)
    }

    /// Alias of the row storage; writes through it show up in the matrix.
    pub fn row(&self, row: isize) -> Result<List<T>> {
        self.rows.get(row)
    }

    pub fn rows(&self) -> impl Iterator<Item = List<T>> + use<T> {
        self.rows.iter()
    }
}

impl<T: Clone> Matrix<T> {
    /// Every row is its own list, unlike repeating one row object.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| List::from(vec![value.clone(); cols]))
                .collect(),
            cols,
        }
    }

    pub fn get(&self, row: isize, col: isize) -> Result<T> {
        self.row(row)?.get(col)
    }
}

impl<T: Repr> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix<i64> {
        Matrix::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 9]]).unwrap()
    }

    #[test]
    fn row_major_access() {
        let m = sample();
        assert_eq!(m.dims(), (3, 3));
        assert_eq!(m.get(1, 2), Ok(6));
        assert_eq!(m.get(-1, -1), Ok(9));
        assert_eq!(
            m.get(3, 0),
            Err(ListError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(m.to_string(), "[1, 2, 3]\n[4, 5, 6]\n[7, 8, 9]");
    }

    #[test]
    fn row_handles_alias_storage() {
        let m = sample();
        m.row(0).unwrap().set(0, 100).unwrap();
        m.set(2, 1, 80).unwrap();
        assert_eq!(m.get(0, 0), Ok(100));
        assert_eq!(
            m.rows().map(|r| r.to_vec()).collect::<Vec<_>>(),
            vec![vec![100, 2, 3], vec![4, 5, 6], vec![7, 80, 9]]
        );
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).err();
        assert_eq!(
            err,
            Some(ListError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn filled_rows_are_independent() {
        let m = Matrix::filled(2, 3, 0_i64);
        m.set(0, 0, 7).unwrap();
        assert_eq!(m.to_string(), "[7, 0, 0]\n[0, 0, 0]");

        let empty = Matrix::<i64>::from_rows(Vec::<Vec<i64>>::new()).unwrap();
        assert_eq!(empty.dims(), (0, 0));
    }
}
