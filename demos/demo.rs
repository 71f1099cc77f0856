// demos/demo.rs
use fast_pde::analytics::bs_analytic;
use fast_pde::fd::{fd_price_option, BoundaryCondition, FdConfig, GridSize, TimeStepper};
use fast_pde::math_utils::Timer;
use fast_pde::models::{OptionKind, OptionParams};
use fast_pde::output;
use fast_pde::schemes::Scheme;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--layer" {
        let filename = args.get(2).map(String::as_str).unwrap_or("fd_layer.csv");
        run_layer_export(filename);
    } else {
        run_demo_mode();
    }
}

fn run_layer_export(filename: &str) {
    let params = OptionParams::default();
    let solution = fd_price_option(&params, &FdConfig::default()).expect("Valid configuration");
    output::write_layer_to_csv(filename, &solution).expect("Could not write layer");
    println!(
        "t = 0 layer ({} nodes, S_max = {:.2}) written to {}",
        solution.grid.nodes(),
        solution.grid.s_max,
        filename
    );
}

fn run_demo_mode() {
    println!("Running fast-pde Finite-Difference Demo\n");

    let call = OptionParams::default();
    let put = call.with_kind(OptionKind::Put);

    for params in [call, put] {
        let analytic = bs_analytic::bs_price(&params);
        println!("--- European {} (S={}, K={}, T={}, r={}, σ={}) ---",
            params.kind, params.s, params.k, params.t, params.r, params.sigma);
        println!("Black-Scholes: {:.6}", analytic);
        println!(
            "{:<16} {:<10} {:>6} {:>6} {:>10} {:>10} {:>9}",
            "Scheme", "Boundary", "N_s", "N_t", "Price", "Error", "Time (ms)"
        );

        for scheme in Scheme::ALL {
            // Explicit stepping is only stable for σ²·n_s²·dt ≤ 1
            let (n_s, n_t) = match scheme {
                Scheme::Explicit => (100, 1000),
                _ => (200, 200),
            };
            for boundary in BoundaryCondition::ALL {
                let config = FdConfig {
                    grid: GridSize::Fixed(n_s),
                    time_steps: n_t,
                    scheme,
                    boundary,
                    quiet: true,
                };
                let mut timer = Timer::new();
                timer.start();
                match fd_price_option(&params, &config) {
                    Ok(solution) => println!(
                        "{:<16} {:<10} {:>6} {:>6} {:>10.6} {:>+10.6} {:>9.2}",
                        scheme.name(),
                        boundary.name(),
                        n_s,
                        n_t,
                        solution.price,
                        solution.price - analytic,
                        timer.elapsed_ms()
                    ),
                    Err(e) => println!("{:<16} {:<10} failed: {}", scheme.name(), boundary.name(), e),
                }
            }
        }
        println!();
    }

    println!("--- Grid Greeks (Crank-Nicolson, Dirichlet, 400 x 400) ---");
    let config = FdConfig {
        grid: GridSize::Fixed(400),
        time_steps: 400,
        ..Default::default()
    };
    let solution = fd_price_option(&call, &config).expect("Valid configuration");
    let delta = bs_analytic::bs_delta(call.s, call.k, call.r, call.q, call.sigma, call.t, call.kind);
    let gamma = bs_analytic::bs_gamma(call.s, call.k, call.r, call.q, call.sigma, call.t);
    println!("Delta: FD {:.6}  BS {:.6}", solution.delta, delta);
    println!("Gamma: FD {:.6}  BS {:.6}", solution.gamma, gamma);
    println!();

    println!("--- Auto-sized grid ---");
    let config = FdConfig {
        grid: GridSize::Auto,
        time_steps: 100,
        ..Default::default()
    };
    let solution = fd_price_option(&call, &config).expect("Valid configuration");
    println!(
        "n_t = 100 gives n_s = {} (ds = {:.4}), price {:.6}",
        solution.grid.n_s, solution.grid.ds, solution.price
    );
    println!();

    println!("--- Stepping by hand (implicit, Neumann) ---");
    let config = FdConfig {
        grid: GridSize::Fixed(100),
        time_steps: 4,
        scheme: Scheme::Implicit,
        boundary: BoundaryCondition::Neumann,
        quiet: true,
    };
    let mut stepper = TimeStepper::new(&call, &config).expect("Valid configuration");
    let mid = stepper.grid().mid_index();
    while !stepper.is_finished() {
        stepper.step().expect("Non-singular system");
        println!(
            "  after step {}: f(S) = {:.6}",
            stepper.steps_taken(),
            stepper.values()[mid]
        );
    }

    println!("\nRun with --layer [file.csv] to export the t = 0 layer.");
}
