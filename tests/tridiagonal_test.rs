// tests/tridiagonal_test.rs
use fast_pde::error::PdeError;
use fast_pde::linalg::{solve_tridiagonal, Tridiagonal};
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

// Strictly diagonally dominant system with a random right-hand side
fn random_system(n: usize, rng: &mut StdRng) -> (Tridiagonal, Vec<f64>) {
    let band = Uniform::new(-1.0, 1.0);
    let slack = Uniform::new(0.1, 2.0);

    let lower: Vec<f64> = (0..n).map(|_| band.sample(rng)).collect();
    let upper: Vec<f64> = (0..n).map(|_| band.sample(rng)).collect();
    let diag: Vec<f64> = (0..n)
        .map(|i| {
            let off = if i > 0 { lower[i].abs() } else { 0.0 }
                + if i + 1 < n { upper[i].abs() } else { 0.0 };
            let sign = if band.sample(rng) < 0.0 { -1.0 } else { 1.0 };
            sign * (off + slack.sample(rng))
        })
        .collect();
    let rhs: Vec<f64> = (0..n).map(|_| 10.0 * band.sample(rng)).collect();

    (Tridiagonal::from_bands(lower, diag, upper).unwrap(), rhs)
}

#[test]
fn test_thomas_residual_on_random_dominant_systems() {
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[1usize, 2, 3, 10, 101, 1000] {
        let (op, rhs) = random_system(n, &mut rng);
        let x = op.solve(&rhs).expect("Dominant systems are non-singular");
        let residual = op.residual(&x, &rhs).unwrap();
        assert!(residual < 1e-10, "n = {}: residual {:e}", n, residual);
    }
}

#[test]
fn test_thomas_matches_dense_lu() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let (op, rhs) = random_system(25, &mut rng);
        let thomas = op.solve(&rhs).unwrap();
        let dense = op
            .to_dense()
            .lu()
            .solve(&DVector::from_column_slice(&rhs))
            .expect("Dense LU should succeed");

        for (i, (t, d)) in thomas.iter().zip(dense.iter()).enumerate() {
            assert!((t - d).abs() < 1e-9, "row {}: thomas {} vs lu {}", i, t, d);
        }
    }
}

#[test]
fn test_free_function_leaves_inputs_untouched() {
    let a = vec![0.0, -1.0, -1.0, -1.0];
    let b = vec![4.0, 4.0, 4.0, 4.0];
    let c = vec![-1.0, -1.0, -1.0, 0.0];
    let d = vec![3.0, 2.0, 2.0, 3.0];
    let (a0, b0, c0, d0) = (a.clone(), b.clone(), c.clone(), d.clone());

    let x = solve_tridiagonal(&a, &b, &c, &d).unwrap();
    for xi in &x {
        assert!((xi - 1.0).abs() < 1e-12);
    }
    assert_eq!((a, b, c, d), (a0, b0, c0, d0));
}

#[test]
fn test_zero_pivot_reports_row() {
    // Second pivot: 1 - 1·(1/1) = 0
    let op = Tridiagonal::from_bands(
        vec![0.0, 1.0, 1.0],
        vec![1.0, 1.0, 3.0],
        vec![1.0, 1.0, 0.0],
    )
    .unwrap();
    match op.solve(&[1.0, 2.0, 3.0]) {
        Err(PdeError::SingularSystem { row, step }) => {
            assert_eq!(row, 1);
            assert_eq!(step, None);
        }
        other => panic!("Expected SingularSystem, got {:?}", other),
    }
}

#[test]
fn test_mismatched_lengths_are_rejected() {
    assert!(Tridiagonal::from_bands(vec![0.0; 3], vec![1.0; 4], vec![0.0; 4]).is_err());

    let op = Tridiagonal::identity(4);
    assert!(op.solve(&[1.0, 2.0]).is_err());
    assert!(op.apply(&[1.0; 5]).is_err());
}
