use std::io::{self, Write};

use serde::Serialize;
use tensorcheck_core::Tensor;

/// Output shape of `check`. Field order is part of the contract.
///
/// JSON has no NaN or infinity; serde_json writes those values as `null`.
#[derive(Serialize)]
struct TensorReport<'a> {
    shape: &'a [i64],
    values: &'a [f64],
}

pub fn health<W: Write>(out: &mut W, status: &str) -> io::Result<()> {
    writeln!(out, "{status}")
}

pub fn tensor<W: Write>(out: &mut W, tensor: &Tensor) -> serde_json::Result<()> {
    let report = TensorReport {
        shape: tensor.shape.dims(),
        values: &tensor.values,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out).map_err(serde_json::Error::io)
}
