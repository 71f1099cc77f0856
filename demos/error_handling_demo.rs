// demos/error_handling_demo.rs
use fast_pde::error::PdeError;
use fast_pde::fd::{fd_price_option, solve_by_codes, BoundaryCondition, FdConfig, GridSize};
use fast_pde::linalg::Tridiagonal;
use fast_pde::models::{OptionKind, OptionParams};
use fast_pde::schemes::Scheme;

fn main() {
    println!("Error Handling Demo for fast-pde");
    println!("=================================\n");

    // Test 1: Unknown option kind
    println!("1. Testing an unknown option kind...");
    match "straddle".parse::<OptionKind>() {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Negative spot
    println!("\n2. Testing invalid option parameters...");
    let invalid_params = OptionParams {
        s: -42.0, // Negative spot price
        ..Default::default()
    };
    match fd_price_option(&invalid_params, &FdConfig::default()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Auto grid sizing needs a positive volatility
    println!("\n3. Testing auto-sized grid with zero volatility...");
    let flat_params = OptionParams {
        sigma: 0.0,
        ..Default::default()
    };
    let auto_config = FdConfig {
        grid: GridSize::Auto,
        ..Default::default()
    };
    match fd_price_option(&flat_params, &auto_config) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Zero time steps
    println!("\n4. Testing zero time steps...");
    let no_steps = FdConfig {
        time_steps: 0,
        ..Default::default()
    };
    match fd_price_option(&OptionParams::default(), &no_steps) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Unknown boundary and scheme codes
    println!("\n5. Testing unknown boundary and scheme codes...");
    let params = OptionParams::default();
    match solve_by_codes(&params, GridSize::Fixed(200), 200, "cn", "x") {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
    match solve_by_codes(&params, GridSize::Fixed(200), 200, "leapfrog", "d") {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 6: Explicit scheme outside its stability region warns but still runs
    println!("\n6. Testing unstable explicit configuration...");
    let unstable = FdConfig {
        grid: GridSize::Fixed(200),
        time_steps: 200,
        scheme: Scheme::Explicit,
        boundary: BoundaryCondition::Dirichlet,
        quiet: false,
    };
    match fd_price_option(&params, &unstable) {
        Ok(solution) => println!("   ✓ Ran with warning, price = {:e}", solution.price),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Singular tridiagonal system
    println!("\n7. Testing singular tridiagonal system...");
    let singular = Tridiagonal::from_bands(
        vec![0.0, 1.0, 1.0],
        vec![0.0, 2.0, 2.0],
        vec![1.0, 1.0, 0.0],
    )
    .expect("Matching band lengths");
    match singular.solve(&[1.0, 1.0, 1.0]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(PdeError::SingularSystem { row, .. }) => {
            println!("   ✓ Caught SingularSystem at row {}", row);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    // Test 8: Valid configuration should work
    println!("\n8. Testing valid configuration...");
    match fd_price_option(&params, &FdConfig::default()) {
        Ok(solution) => println!(
            "   ✓ Success: Price = {:.4}, Delta = {:.4}",
            solution.price, solution.delta
        ),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 9: Error type matching
    println!("\n9. Testing error type matching...");
    let bad_params = OptionParams {
        t: 0.0, // Expired option
        ..Default::default()
    };
    match fd_price_option(&bad_params, &FdConfig::default()) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(PdeError::InvalidParameters {
            parameter,
            value,
            constraint,
        }) => {
            println!(
                "   ✓ Caught InvalidParameters: {} = {} ({})",
                parameter, value, constraint
            );
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
