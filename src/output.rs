// src/output.rs
use crate::fd::{PdeSolution, SweepSurface};
use std::fs::File;
use std::io::{self, Write};

pub fn write_layer_to_csv(filename: &str, solution: &PdeSolution) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(file, "node,spot,value")?;
    for (j, (spot, value)) in solution.spots().iter().zip(&solution.values).enumerate() {
        writeln!(file, "{},{},{}", j, spot, value)?;
    }
    Ok(())
}

/// Long format: one row per `(n_s, n_t)` cell
pub fn write_sweep_to_csv(filename: &str, surface: &SweepSurface) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let column = if surface.difference { "difference" } else { "price" };
    writeln!(file, "scheme,boundary,n_s,n_t,{}", column)?;
    for ((i, j), value) in surface.values.indexed_iter() {
        writeln!(
            file,
            "{},{},{},{},{}",
            surface.scheme.name(),
            surface.boundary.name(),
            surface.node_counts[i],
            surface.time_steps[j],
            value
        )?;
    }
    Ok(())
}

pub fn write_summary_to_csv(filename: &str, summary_data: &[(&str, &str)]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    for (key, value) in summary_data {
        writeln!(file, "{},{}", key, value)?;
    }
    Ok(())
}
