use std::{fmt, path::PathBuf};

use anyhow::Error;

use clap::{Parser, ValueEnum};

use h5kit_core::tensor::{is_col_major, to_col_major, to_row_major};
use ndarray::ArrayD;
use ndarray_npy::{read_npy, write_npy};

/// Rewrite an array in NPY format with a different memory order.
///
/// The logical shape and values of the array are unchanged.
#[derive(Debug, Parser)]
pub struct Relayout {
    /// Input NPY file with 64-bit float values.
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output NPY file.
    #[arg(short = 'o', long, value_name = "FILE")]
    output: PathBuf,

    /// Memory order of the output.
    #[arg(long, value_enum, default_value_t = Order::ColumnMajor, value_name = "ORDER")]
    order: Order,
}

/// Memory order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Order {
    /// Last index varies fastest.
    RowMajor,
    /// First index varies fastest.
    ColumnMajor,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Order::RowMajor => "row-major",
            Order::ColumnMajor => "column-major",
        })
    }
}

impl Relayout {
    pub fn run(self) -> Result<(), Error> {
        let array: ArrayD<f64> = read_npy(&self.input)?;
        log::debug!(
            "Read array with shape {:?} from '{}'",
            array.shape(),
            self.input.display()
        );

        let relaid = match self.order {
            Order::RowMajor => to_row_major(&array),
            Order::ColumnMajor => to_col_major(&array),
        };
        if relaid.is_view() {
            log::info!("Array is already in {} order", self.order);
        }
        log::debug!("Output is column-major: {}", is_col_major(&relaid));

        write_npy(&self.output, &relaid)?;
        println!(
            "wrote {} array with shape {:?} to {}",
            self.order,
            relaid.shape(),
            self.output.display()
        );

        Ok(())
    }
}
