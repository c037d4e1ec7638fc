//! Variable-width byte matrices holding one or more blocks.

use crate::error::{Error, Result};
use crate::gf;
use crate::state::{State, STATE_DIM};

/// A `rows × cols` byte matrix stored column by column.
///
/// Multi-block data uses four rows; block `k` occupies columns
/// `[4k, 4k + 4)`, matching the layout of [`State`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Matrix {
    /// Allocates a zero matrix.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0u8; rows * cols],
        }
    }

    /// Builds a matrix from column-major bytes.
    pub fn from_column_major(rows: usize, bytes: &[u8]) -> Result<Self> {
        if rows == 0 || bytes.len() % rows != 0 {
            return Err(Error::DimensionMismatch {
                left: (rows, bytes.len() / rows.max(1)),
                right: (1, bytes.len()),
            });
        }
        Ok(Self {
            rows,
            cols: bytes.len() / rows,
            data: bytes.to_vec(),
        })
    }

    /// Lays a byte string out as a 4-row block matrix.
    ///
    /// The length must be a multiple of four; block alignment is checked by
    /// the mode layer, not here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() % STATE_DIM != 0 {
            return Err(Error::InvalidBlockShape(format!(
                "{} bytes do not fill whole columns",
                bytes.len()
            )));
        }
        Self::from_column_major(STATE_DIM, bytes)
    }

    /// Concatenates states into a 4-row matrix.
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a State>) -> Self {
        let data: Vec<u8> = states.into_iter().flat_map(|s| s.to_bytes()).collect();
        Self {
            rows: STATE_DIM,
            cols: data.len() / STATE_DIM,
            data,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)` of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of whole 4-column blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.cols / STATE_DIM
    }

    /// Returns the byte at `(row, col)`, if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.rows && col < self.cols).then(|| self.data[col * self.rows + row])
    }

    /// Returns column `col`, if in range.
    pub fn column(&self, col: usize) -> Option<&[u8]> {
        (col < self.cols).then(|| &self.data[col * self.rows..(col + 1) * self.rows])
    }

    /// Column-major bytes; for a block matrix this is the block sequence.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the matrix and returns its column-major bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Element-wise field addition.
    pub fn add(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.shape() != rhs.shape() {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: rhs.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| gf::add(*a, *b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Copies columns `[start, end)` into a new matrix.
    pub fn columns(&self, start: usize, end: usize) -> Result<Matrix> {
        if start >= end || end > self.cols {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: (self.rows, end),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: end - start,
            data: self.data[start * self.rows..end * self.rows].to_vec(),
        })
    }

    /// Overwrites column `col` with `column`.
    pub fn insert_column(&mut self, col: usize, column: &[u8]) -> Result<()> {
        if col >= self.cols || column.len() != self.rows {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: (column.len(), col + 1),
            });
        }
        self.data[col * self.rows..(col + 1) * self.rows].copy_from_slice(column);
        Ok(())
    }

    /// Overwrites the columns starting at `start` with the columns of `block`.
    pub fn insert_columns(&mut self, block: &Matrix, start: usize) -> Result<()> {
        if block.rows != self.rows || start + block.cols > self.cols {
            return Err(Error::DimensionMismatch {
                left: self.shape(),
                right: (block.rows, start + block.cols),
            });
        }
        let offset = start * self.rows;
        self.data[offset..offset + block.data.len()].copy_from_slice(&block.data);
        Ok(())
    }

    /// Extracts block `index` as a state.
    pub fn block(&self, index: usize) -> Result<State> {
        let start = index * STATE_DIM;
        State::try_from(&self.columns(start, start + STATE_DIM)?)
    }

    /// Overwrites block `index` with `state`.
    pub fn set_block(&mut self, index: usize, state: &State) -> Result<()> {
        self.insert_columns(&Matrix::from(*state), index * STATE_DIM)
    }

    /// Iterates over the whole blocks of a 4-row matrix.
    pub fn blocks(&self) -> impl Iterator<Item = State> + '_ {
        let block_len = STATE_DIM * STATE_DIM;
        let usable = if self.rows == STATE_DIM {
            self.data.len() - self.data.len() % block_len
        } else {
            0
        };
        self.data[..usable].chunks_exact(block_len).map(|chunk| {
            let mut bytes = [0u8; 16];
            bytes.copy_from_slice(chunk);
            State::from_bytes(&bytes)
        })
    }
}

impl From<State> for Matrix {
    fn from(value: State) -> Self {
        Matrix {
            rows: STATE_DIM,
            cols: STATE_DIM,
            data: value.to_bytes().to_vec(),
        }
    }
}

impl TryFrom<&Matrix> for State {
    type Error = Error;

    fn try_from(value: &Matrix) -> Result<Self> {
        if value.shape() != (STATE_DIM, STATE_DIM) {
            return Err(Error::DimensionMismatch {
                left: (STATE_DIM, STATE_DIM),
                right: value.shape(),
            });
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&value.data);
        Ok(State::from_bytes(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn blocks_round_trip_through_bytes() {
        let bytes = sequential(48);
        let matrix = Matrix::from_bytes(&bytes).unwrap();
        assert_eq!(matrix.shape(), (4, 12));
        assert_eq!(matrix.block_count(), 3);
        assert_eq!(matrix.get(1, 4), Some(17));
        assert_eq!(matrix.block(2).unwrap().to_bytes()[0], 32);
        let states: Vec<State> = matrix.blocks().collect();
        assert_eq!(Matrix::from_states(&states), matrix);
    }

    #[test]
    fn add_requires_equal_shapes() {
        let a = Matrix::zeroed(4, 8);
        let b = Matrix::zeroed(4, 4);
        assert!(matches!(
            a.add(&b),
            Err(Error::DimensionMismatch {
                left: (4, 8),
                right: (4, 4)
            })
        ));
        let c = Matrix::from_bytes(&sequential(32)).unwrap();
        assert_eq!(c.add(&c).unwrap(), a);
    }

    #[test]
    fn column_ranges_are_validated() {
        let matrix = Matrix::from_bytes(&sequential(32)).unwrap();
        assert!(matrix.columns(4, 4).is_err());
        assert!(matrix.columns(4, 9).is_err());
        assert_eq!(matrix.columns(4, 8).unwrap().as_bytes(), &sequential(32)[16..]);
    }

    #[test]
    fn insert_columns_overwrites_in_place() {
        let mut matrix = Matrix::zeroed(4, 8);
        let state = State::from_bytes(&[0xab; 16]);
        matrix.set_block(1, &state).unwrap();
        assert_eq!(matrix.block(0).unwrap(), State::default());
        assert_eq!(matrix.block(1).unwrap(), state);
        assert!(matrix.insert_columns(&Matrix::from(state), 5).is_err());
        assert!(matrix.insert_column(8, &[0; 4]).is_err());
        matrix.insert_column(0, &[1, 2, 3, 4]).unwrap();
        assert_eq!(matrix.column(0), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn from_bytes_rejects_partial_columns() {
        assert!(matches!(
            Matrix::from_bytes(&[0u8; 13]),
            Err(Error::InvalidBlockShape(_))
        ));
        assert_eq!(Matrix::from_bytes(&[]).unwrap().shape(), (4, 0));
    }
}
