use std::path::PathBuf;

use anyhow::{bail, Error};

use clap::Parser;

use h5kit_core::tensor::{
    as_diagonal, as_diagonal_inversed, as_diagonal_squared, as_normalized, extract_diagonal,
};
use ndarray::{Array1, Array2, ArrayD, Ix1, Ix2};
use ndarray_npy::{read_npy, write_npy};

/// Build a diagonal matrix from a vector, or extract the diagonal of a square matrix.
///
/// The input and output are in NPY format with 64-bit float values. A vector input produces a
/// square matrix with the vector on its diagonal, and a square matrix input produces its
/// diagonal as a vector.
#[derive(Debug, Parser)]
pub struct Diag {
    /// Input NPY file.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output NPY file.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Use reciprocal values on the diagonal.
    ///
    /// With a matrix input, the output is a diagonal matrix rather than a vector.
    #[arg(long, conflicts_with = "squared")]
    inverse: bool,

    /// Use squared values on the diagonal.
    ///
    /// With a matrix input, the output is a diagonal matrix rather than a vector.
    #[arg(long)]
    squared: bool,

    /// Normalize the diagonal to unit Euclidean norm before applying other options.
    #[arg(long)]
    normalize: bool,
}

impl Diag {
    fn vector_diagonal(&self, vector: Array1<f64>) -> Array2<f64> {
        let vector = if self.normalize {
            as_normalized(&vector)
        } else {
            vector
        };

        if self.inverse {
            as_diagonal_inversed(&vector)
        } else if self.squared {
            as_diagonal_squared(&vector)
        } else {
            as_diagonal(&vector)
        }
    }

    fn matrix_diagonal(&self, matrix: Array2<f64>) -> Result<ArrayD<f64>, Error> {
        if !matrix.is_square() {
            bail!(
                "cannot extract diagonal of non-square matrix with shape {:?}",
                matrix.shape()
            );
        }

        let diagonal = extract_diagonal(&matrix);

        let out = if self.inverse || self.squared {
            self.vector_diagonal(diagonal).into_dyn()
        } else if self.normalize {
            as_normalized(&diagonal).into_dyn()
        } else {
            diagonal.into_dyn()
        };

        Ok(out)
    }

    pub fn run(self) -> Result<(), Error> {
        let array: ArrayD<f64> = read_npy(&self.input)?;
        log::debug!(
            "Read array with shape {:?} from '{}'",
            array.shape(),
            self.input.display()
        );

        let out = match array.ndim() {
            1 => self
                .vector_diagonal(array.into_dimensionality::<Ix1>()?)
                .into_dyn(),
            2 => self.matrix_diagonal(array.into_dimensionality::<Ix2>()?)?,
            n => bail!("expected a vector or a matrix, found array with {n} dimensions"),
        };
        write_npy(&self.output, &out)?;
        let kind = if out.ndim() == 1 { "vector" } else { "matrix" };
        println!(
            "wrote diagonal {kind} with shape {:?} to {}",
            out.shape(),
            self.output.display()
        );

        Ok(())
    }
}
