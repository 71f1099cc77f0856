// scripts/convergence.rs
use fast_pde::analytics::bs_analytic;
use fast_pde::fd::{
    convergence_sweep, fd_price_option, BoundaryCondition, FdConfig, GridSize, SchemeSet,
    SweepConfig,
};
use fast_pde::math_utils::Timer;
use fast_pde::models::{OptionKind, OptionParams};
use fast_pde::output::{write_summary_to_csv, write_sweep_to_csv};
use fast_pde::schemes::Scheme;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::process::Command;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        SystemInfo {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct RunResult {
    name: String,
    n_s: usize,
    n_t: usize,
    time_ms: f64,
    value: f64,
    analytic_value: f64,
    relative_error: f64,
}

/// Explicit stepping needs σ²·n_s²·dt ≤ 1, so it gets its own finer time grid
fn grid_for(scheme: Scheme) -> (usize, usize) {
    match scheme {
        Scheme::Explicit => (100, 1000),
        Scheme::Implicit | Scheme::CrankNicolson => (200, 200),
    }
}

fn run_price_table(params: &OptionParams) -> Vec<RunResult> {
    let analytic = bs_analytic::bs_price(params);
    let mut results = Vec::new();

    for scheme in Scheme::ALL {
        for boundary in BoundaryCondition::ALL {
            let (n_s, n_t) = grid_for(scheme);
            let config = FdConfig {
                grid: GridSize::Fixed(n_s),
                time_steps: n_t,
                scheme,
                boundary,
                quiet: true,
            };

            let mut timer = Timer::new();
            timer.start();
            let outcome = fd_price_option(params, &config);
            let time_ms = timer.elapsed_ms();

            match outcome {
                Ok(solution) => results.push(RunResult {
                    name: format!("{} / {}", scheme.name(), boundary.name()),
                    n_s: solution.grid.n_s,
                    n_t: solution.grid.n_t,
                    time_ms,
                    value: solution.price,
                    analytic_value: analytic,
                    relative_error: (solution.price - analytic).abs() / analytic,
                }),
                Err(e) => println!("  {} / {} failed: {}", scheme.name(), boundary.name(), e),
            }
        }
    }

    results
}

fn write_results_to_csv(
    results: &[RunResult],
    system_info: &SystemInfo,
    filename: &str,
) -> std::io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Run Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Method,N_s,N_t,Time_ms,Value,Analytic_Value,Relative_Error"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.3},{:.6},{:.6},{:.6}",
            result.name,
            result.n_s,
            result.n_t,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.relative_error
        )?;
    }

    println!("Results written to {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("fast-pde Convergence Report");
    println!("===========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let kind = match env::args().nth(1) {
        Some(arg) => arg.parse::<OptionKind>()?,
        None => OptionKind::Call,
    };
    let params = OptionParams {
        kind,
        ..Default::default()
    };
    println!("Option:\n{}\n", params);

    println!("Pricing every scheme / boundary combination...");
    let results = run_price_table(&params);

    println!("\n{:=<86}", "");
    println!(
        "{:<32} {:>6} {:>6} {:>10} {:>10} {:>10} {:>8}",
        "Method", "N_s", "N_t", "Time (ms)", "Value", "Analytic", "Rel Err"
    );
    println!("{:-<86}", "");
    for result in &results {
        println!(
            "{:<32} {:>6} {:>6} {:>10.2} {:>10.4} {:>10.4} {:>7.3}%",
            result.name,
            result.n_s,
            result.n_t,
            result.time_ms,
            result.value,
            result.analytic_value,
            result.relative_error * 100.0
        );
    }
    println!("{:=<86}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("convergence_results_{}.csv", timestamp);
    write_results_to_csv(&results, &system_info, &filename)?;

    println!("\nRunning (n_s, n_t) difference sweep...");
    let sweep = SweepConfig {
        node_counts: (1..=8).map(|i| 25 * i).collect(),
        time_steps: (1..=8).map(|i| 25 * i).collect(),
        schemes: SchemeSet::IMPLICIT | SchemeSet::CRANK_NICOLSON,
        boundary: BoundaryCondition::Dirichlet,
        difference: true,
        threads: None,
    };
    let mut timer = Timer::new();
    timer.start();
    let surfaces = convergence_sweep(&params, &sweep)?;
    println!(
        "  {} surfaces x {} cells in {:.1} ms",
        surfaces.len(),
        sweep.node_counts.len() * sweep.time_steps.len(),
        timer.elapsed_ms()
    );

    for surface in &surfaces {
        let sweep_file = format!(
            "sweep_{}_{}.csv",
            surface.scheme.name().to_lowercase(),
            timestamp
        );
        write_sweep_to_csv(&sweep_file, surface)?;
        if let Some((n_s, n_t, diff)) = surface.best() {
            println!(
                "  {:<16} best cell n_s={:>4} n_t={:>4} diff={:+.6} -> {}",
                surface.scheme.name(),
                n_s,
                n_t,
                diff,
                sweep_file
            );
        }
    }

    let summary_file = format!("convergence_summary_{}.csv", timestamp);
    let analytic = format!("{:.6}", bs_analytic::bs_price(&params));
    let cores = system_info.cpu_cores.to_string();
    write_summary_to_csv(
        &summary_file,
        &[
            ("kind", params.kind.as_str()),
            ("analytic_price", analytic.as_str()),
            ("cpu_cores", cores.as_str()),
        ],
    )?;

    println!("\nConvergence report complete!");
    println!("To reproduce: cargo run --bin convergence --release [call|put]");
    Ok(())
}
