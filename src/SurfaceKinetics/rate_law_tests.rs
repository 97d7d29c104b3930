/////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
/////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::SurfaceKinetics::parameters::{K_B, N_A, ParameterConfig, ParameterSet};
    use crate::SurfaceKinetics::rate_law::{
        CoverageState, OperatingPoint, RateCoefficients, theta_OH,
    };
    use crate::errors::SurfaceError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn coefficients(T: f64, p: f64) -> RateCoefficients {
        RateCoefficients::new(&ParameterSet::reference(), &OperatingPoint::new(T, p)).unwrap()
    }

    #[test]
    fn test_impingement_flux() {
        let rc = coefficients(1000.0, 1100.0);
        let mass_O = 16.0 / 1000.0 / N_A;
        let expected = 1100.0 * 10.0 / 11.0 / (2.0 * PI * mass_O * K_B * 1000.0).sqrt();
        assert_relative_eq!(rc.n_O, expected, max_relative = 1e-14);
        // ~2e25 molecules per m^2 per s
        assert!(rc.n_O > 1e25 && rc.n_O < 1e26);
        assert_relative_eq!(rc.p, 1100.0);
    }

    #[test]
    fn test_eley_rideal_prefactor() {
        let rc = coefficients(1000.0, 1100.0);
        let expected = 0.1 * (-(2.0e4 / N_A) / (K_B * 1000.0)).exp();
        assert_relative_eq!(rc.gamma_star_OO, expected, max_relative = 1e-14);
        assert_relative_eq!(rc.gamma_star_NN, rc.gamma_star_OO, max_relative = 1e-14);
    }

    #[test]
    fn test_attempt_frequency_ratio() {
        // v ~ 1/sqrt(m): v_N / v_O = sqrt(16/14)
        let rc = coefficients(1500.0, 100.0);
        assert_relative_eq!(rc.v_N / rc.v_O, (16.0_f64 / 14.0).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_theta_OH_bounds_and_limits() {
        let params = ParameterSet::reference();
        for T in [1e-3, 1.0, 300.0, 1000.0, 10000.0] {
            let t = theta_OH(&params, T);
            assert!(t >= 0.0 && t <= params.AA());
        }
        // E_OH / (Na T) grows without bound as T -> 0+, the blocked fraction saturates at AA
        assert_relative_eq!(theta_OH(&params, 1e-25), params.AA(), max_relative = 1e-6);
        // and vanishes at high temperature for the reference E_OH
        assert!(theta_OH(&params, 10000.0) < 1e-20);
    }

    #[test]
    fn test_theta_OH_with_large_blocking_energy() {
        let mut config = ParameterConfig::reference();
        config.E_OH = 2.5e3 * N_A;
        let params = config.build().unwrap();
        // exponent = 2500 / T
        let expected = 0.8 * (1.0 - (-2500.0_f64 / 1000.0).exp());
        assert_relative_eq!(theta_OH(&params, 1000.0), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_fluxes_at_clean_surface() {
        let rc = coefficients(800.0, 500.0);
        let f = rc.fluxes(&CoverageState::new(0.0, 0.0));
        assert!(f.omega_ad_O > 0.0 && f.omega_ad_N > 0.0);
        assert_eq!(f.omega_ER_OO, 0.0);
        assert_eq!(f.omega_ER_NN, 0.0);
        assert_eq!(f.omega_ER_ON, 0.0);
        assert_eq!(f.omega_ER_NO, 0.0);
        assert_eq!(f.omega_LH_OO, 0.0);
        assert_eq!(f.omega_LH_NN, 0.0);
        assert_eq!(f.omega_LH_NO, 0.0);
        assert_eq!(f.omega_des_O, 0.0);
        assert_eq!(f.omega_des_N, 0.0);
    }

    #[test]
    fn test_flux_formulas() {
        let rc = coefficients(2000.0, 1100.0);
        let s = CoverageState::new(0.3, 0.2);
        let free = 1.0 - 0.3 - 0.2 - rc.theta_OH;
        assert_relative_eq!(rc.omega_ad_O(&s), rc.s_O * free * rc.n_O, max_relative = 1e-14);
        assert_relative_eq!(rc.omega_ER_ON(&s), rc.gamma_star_ON * 0.2 * rc.n_O, max_relative = 1e-14);
        assert_relative_eq!(rc.omega_ER_NO(&s), rc.gamma_star_NO * 0.3 * rc.n_N, max_relative = 1e-14);
        assert_relative_eq!(rc.omega_LH_OO(&s), rc.k_LH_OO * 0.09, max_relative = 1e-14);
        assert_relative_eq!(rc.omega_LH_NO(&s), rc.k_LH_NO * 0.06, max_relative = 1e-14);

        let params = ParameterSet::reference();
        let kT = K_B * 2000.0;
        let des_O = params.nsite() * 0.3 * (kT / params.h()) * (-params.Qa_O() / kT).exp();
        assert_relative_eq!(rc.omega_des_O(&s), des_O, max_relative = 1e-12);
    }

    #[test]
    fn test_residual_is_balance_of_fluxes() {
        let rc = coefficients(2500.0, 1100.0);
        let s = CoverageState::new(0.4, 0.1);
        let f = rc.fluxes(&s);
        let r = rc.residual(&s);
        let eq1 = f.omega_ad_O
            - f.omega_ER_OO
            - f.omega_ER_NO
            - f.omega_LH_NO
            - f.omega_LH_OO
            - f.omega_des_O;
        let eq2 = f.omega_ad_N
            - f.omega_ER_NN
            - f.omega_ER_ON
            - f.omega_LH_NO
            - f.omega_LH_NN
            - f.omega_des_N;
        assert_eq!(r[0], eq1);
        assert_eq!(r[1], eq2);
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        for (T, p) in [(300.0, 10.0), (1000.0, 1100.0), (2500.0, 10000.0)] {
            let rc = coefficients(T, p);
            let s = CoverageState::new(0.45, 0.2);
            let J = rc.scaled_jacobian(&s);
            let h = 1e-6;
            for j in 0..2 {
                let mut plus = s;
                let mut minus = s;
                if j == 0 {
                    plus.theta_O += h;
                    minus.theta_O -= h;
                } else {
                    plus.theta_N += h;
                    minus.theta_N -= h;
                }
                let fd = (rc.scaled_residual(&plus) - rc.scaled_residual(&minus)) / (2.0 * h);
                for i in 0..2 {
                    assert_relative_eq!(J[(i, j)], fd[i], epsilon = 1e-7, max_relative = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_balance_scale_without_gas() {
        let rc = coefficients(300.0, 0.0);
        assert_eq!(rc.n_O, 0.0);
        let scale = rc.balance_scale();
        assert!(scale[0] > 0.0 && scale[1] > 0.0);
        // only loss terms remain: the clean surface is the steady state
        let r = rc.residual(&CoverageState::new(0.0, 0.0));
        assert_eq!(r[0], 0.0);
        assert_eq!(r[1], 0.0);
    }

    #[test]
    fn test_mole_fraction_override() {
        let params = ParameterSet::reference();
        let rc =
            RateCoefficients::new(&params, &OperatingPoint::with_mole_fraction(1000.0, 100.0, 0.25))
                .unwrap();
        assert_eq!(rc.C_O, 0.25);
        assert_eq!(rc.C_N, 0.75);
        let base = coefficients(1000.0, 100.0);
        assert_relative_eq!(rc.n_O / base.n_O, 0.25 / (10.0 / 11.0), max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_operating_points() {
        let params = ParameterSet::reference();
        let bad = [
            OperatingPoint::new(0.0, 100.0),
            OperatingPoint::new(-5.0, 100.0),
            OperatingPoint::new(f64::NAN, 100.0),
            OperatingPoint::new(300.0, -1.0),
            OperatingPoint::new(300.0, f64::INFINITY),
            OperatingPoint::with_mole_fraction(300.0, 100.0, 1.5),
        ];
        for point in bad {
            let result = RateCoefficients::new(&params, &point);
            assert!(matches!(
                result,
                Err(SurfaceError::InvalidOperatingPoint { .. })
            ));
        }
    }

    #[test]
    fn test_gammas_formula() {
        let rc = coefficients(1200.0, 1100.0);
        let f = rc.fluxes(&CoverageState::new(0.6, 0.05));
        let g = rc.gammas(&f);
        assert_relative_eq!(
            g.gamma_OO,
            (f.omega_LH_OO + 2.0 * f.omega_ER_OO) / rc.n_O,
            max_relative = 1e-14
        );
        assert_relative_eq!(g.gamma_ON * rc.n_O, g.gamma_NO * rc.n_N, max_relative = 1e-12);
        assert!(!g.any_negative());
    }

    #[test]
    fn test_gammas_without_impingement() {
        let rc = coefficients(1000.0, 0.0);
        // leftover coverage gives nonzero recombination flux over zero impingement
        let f = rc.fluxes(&CoverageState::new(1.2e-6, 5.1e-5));
        assert!(f.omega_LH_NN > 0.0);
        let g = rc.gammas(&f);
        assert!(g.gamma_OO.is_nan() && g.gamma_NN.is_nan());
        assert!(g.gamma_ON.is_nan() && g.gamma_NO.is_nan());
        assert!(g.any_undefined());
        assert!(!g.any_negative());

        let params = ParameterSet::reference();
        let only_O =
            RateCoefficients::new(&params, &OperatingPoint::with_mole_fraction(1000.0, 1100.0, 1.0))
                .unwrap();
        assert_eq!(only_O.n_N, 0.0);
        let g = only_O.gammas(&only_O.fluxes(&CoverageState::new(0.85, -3.6e-14)));
        assert!(g.gamma_OO.is_finite() && g.gamma_ON.is_finite());
        assert!(g.gamma_NN.is_nan() && g.gamma_NO.is_nan());
        assert!(!g.any_negative());
    }

    #[test]
    fn test_coverage_state_helpers() {
        let s = CoverageState::initial_guess();
        assert_eq!(s, CoverageState::new(0.5, 0.5));
        assert!(s.is_physical());
        assert!(!CoverageState::new(1.1, 0.0).is_physical());
        // rounding-level excursions of an absent species
        assert!(CoverageState::new(0.85, -3.6e-14).is_physical());
        assert!(CoverageState::new(1.0 + 1e-13, 0.0).is_physical());
        assert!(!CoverageState::new(0.5, -1e-6).is_physical());
        assert_eq!(CoverageState::from_vector(&s.as_vector()), s);
    }
}
