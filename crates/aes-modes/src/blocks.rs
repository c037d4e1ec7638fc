//! Block-matrix validation and per-block dispatch.

use aes_core::{Error, Matrix, Result, State, STATE_DIM};

/// Checks that `blocks` is a 4-row matrix of one or more whole blocks.
pub fn validate(blocks: &Matrix) -> Result<()> {
    let (rows, cols) = blocks.shape();
    if rows != STATE_DIM || cols == 0 || cols % STATE_DIM != 0 {
        return Err(Error::InvalidBlockShape(format!(
            "{rows}x{cols} matrix, expected {STATE_DIM} rows and a non-zero multiple of {STATE_DIM} columns"
        )));
    }
    Ok(())
}

/// Validates `blocks`, then rebuilds it block by block through `f`.
///
/// `f` receives the block index and the block; outputs are reassembled in
/// the same order.
pub(crate) fn map_blocks(
    blocks: &Matrix,
    mut f: impl FnMut(usize, State) -> State,
) -> Result<Matrix> {
    validate(blocks)?;
    let mut result = Matrix::zeroed(STATE_DIM, blocks.cols());
    for (index, block) in blocks.blocks().enumerate() {
        result.set_block(index, &f(index, block))?;
    }
    Ok(result)
}
