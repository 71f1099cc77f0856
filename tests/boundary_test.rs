// tests/boundary_test.rs
use fast_pde::analytics::bs_analytic;
use fast_pde::error::PdeError;
use fast_pde::fd::{
    fd_price_option, solve, solve_by_codes, BoundaryCondition, FdConfig, Grid, GridSize,
    TimeStepper,
};
use fast_pde::models::{OptionKind, OptionParams};
use fast_pde::schemes::Scheme;

#[test]
fn test_call_layer_stays_monotone_after_one_step() {
    let params = OptionParams::default();

    for scheme in Scheme::ALL {
        let config = FdConfig {
            grid: GridSize::Fixed(100),
            time_steps: 1000,
            scheme,
            boundary: BoundaryCondition::Dirichlet,
            quiet: true,
        };
        let mut stepper = TimeStepper::new(&params, &config).unwrap();
        assert!(stepper.values().windows(2).all(|w| w[1] >= w[0]));

        stepper.step().unwrap();
        for (j, w) in stepper.values().windows(2).enumerate() {
            assert!(
                w[1] - w[0] >= -1e-10,
                "{}: f[{}] = {} > f[{}] = {}",
                scheme.name(),
                j,
                w[0],
                j + 1,
                w[1]
            );
        }
    }
}

#[test]
fn test_heuristic_policies_give_sane_prices() {
    let params = OptionParams::default();

    for code in ["m", ""] {
        for scheme in ["implicit", "cn"] {
            let price = solve_by_codes(&params, GridSize::Fixed(200), 200, scheme, code)
                .expect("Valid configuration");
            assert!(price.is_finite());
            assert!(price > 0.0 && price < params.s, "{} / {:?}: {}", scheme, code, price);
        }
    }
}

#[test]
fn test_boundary_codes_round_trip() {
    for boundary in BoundaryCondition::ALL {
        assert_eq!(boundary.code().parse::<BoundaryCondition>().unwrap(), boundary);
    }
    assert!(matches!(
        "x".parse::<BoundaryCondition>(),
        Err(PdeError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_spot_sits_on_mid_node() {
    let params = OptionParams::default();

    for size in [GridSize::Fixed(7), GridSize::Fixed(50), GridSize::Fixed(201), GridSize::Auto] {
        let grid = Grid::build(&params, size, 100).unwrap();
        assert_eq!(grid.n_s % 2, 0, "{:?}", size);
        assert!((grid.spot_at(grid.mid_index()) - params.s).abs() < 1e-12);
        assert!((grid.spot_at(grid.n_s) - 2.0 * params.s).abs() < 1e-12);
    }
}

#[test]
fn test_zero_volatility_is_rejected() {
    let params = OptionParams {
        sigma: 0.0,
        ..Default::default()
    };
    let result = solve(&params, GridSize::Auto, 100, Scheme::CrankNicolson, BoundaryCondition::Dirichlet);
    assert!(matches!(
        result,
        Err(PdeError::InvalidParameters { ref parameter, .. }) if parameter == "sigma"
    ));
}

#[test]
fn test_degenerate_auto_grid_is_rejected() {
    // ln(2) / (0.9 · √3) < 2 intervals
    let params = OptionParams {
        s: 1.0,
        sigma: 0.9,
        ..Default::default()
    };
    let result = solve(&params, GridSize::Auto, 1, Scheme::Implicit, BoundaryCondition::Dirichlet);
    assert!(matches!(result, Err(PdeError::InvalidConfiguration { .. })));
}

#[test]
fn test_zero_time_steps_are_rejected() {
    let params = OptionParams::default();
    let result = solve(&params, GridSize::Fixed(200), 0, Scheme::Implicit, BoundaryCondition::Neumann);
    assert!(matches!(result, Err(PdeError::InvalidConfiguration { .. })));
}

#[test]
fn test_unstable_explicit_grid_is_reported() {
    // σ²·n_s²·dt = 8: the layer blows up long before t = 0
    let params = OptionParams::default();
    let config = FdConfig {
        grid: GridSize::Fixed(200),
        time_steps: 200,
        scheme: Scheme::Explicit,
        boundary: BoundaryCondition::Dirichlet,
        quiet: true,
    };
    let analytic = bs_analytic::bs_price(&params);
    match fd_price_option(&params, &config) {
        Ok(solution) => assert!(
            (solution.price - analytic).abs() > 1.0,
            "unstable grid should not price accurately"
        ),
        Err(e) => assert!(matches!(e, PdeError::NumericalInstability { .. })),
    }
}

#[test]
fn test_singular_system_aborts_stepping() {
    // b₀ = 1 + r·dt = 0 on the Neumann-folded implicit operator
    let params = OptionParams {
        r: -10.0,
        ..Default::default()
    };
    let result = solve(&params, GridSize::Fixed(20), 10, Scheme::Implicit, BoundaryCondition::Neumann);
    assert_eq!(result, Err(PdeError::SingularSystem { row: 0, step: Some(1) }));

    let config = FdConfig {
        grid: GridSize::Fixed(20),
        time_steps: 10,
        scheme: Scheme::Implicit,
        boundary: BoundaryCondition::Neumann,
        quiet: true,
    };
    let mut stepper = TimeStepper::new(&params, &config).unwrap();
    assert!(matches!(
        stepper.step(),
        Err(PdeError::SingularSystem { row: 0, step: Some(1) })
    ));
    assert_eq!(stepper.steps_taken(), 0);
}

#[test]
fn test_put_dirichlet_edges() {
    let params = OptionParams::default().with_kind(OptionKind::Put);
    let config = FdConfig {
        grid: GridSize::Fixed(40),
        time_steps: 10,
        scheme: Scheme::Implicit,
        boundary: BoundaryCondition::Dirichlet,
        quiet: true,
    };
    let mut stepper = TimeStepper::new(&params, &config).unwrap();
    while !stepper.is_finished() {
        stepper.step().unwrap();
    }
    let values = stepper.values();
    let expected_lo = params.k * (-params.r * params.t).exp();
    assert!((values[0] - expected_lo).abs() < 1e-12);
    assert_eq!(values[40], 0.0);
}
