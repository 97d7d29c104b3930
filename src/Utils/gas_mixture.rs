/// Free-stream gas helpers used to set up the surface problem: composition conversion,
/// mixture gas constant and adiabatic index, speed of sound and Mach number, plus unit and
/// grid helpers for building sweeps.
///
/// Mixing rules:
/// R_mix = Σ x_i R_i,  gamma_mix = Σ x_i (gamma_i - 1) R_i / R_mix + 1
use crate::errors::SurfaceError;
use serde::{Deserialize, Serialize};

/// J per eV
pub const EV_TO_J: f64 = 1.60218e-19;
pub const AVOGADRO: f64 = 6.022e23;

/// One species of a gas mixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasComponent {
    pub name: String,
    /// mass fraction
    pub fraction: f64,
    /// specific gas constant, J/(kg K)
    pub R: f64,
    /// adiabatic index
    pub gamma: f64,
    /// molar mass, kg/mol
    pub M: f64,
}

impl GasComponent {
    pub fn new(name: &str, fraction: f64, R: f64, gamma: f64, M: f64) -> Self {
        Self {
            name: name.to_string(),
            fraction,
            R,
            gamma,
            M,
        }
    }
}

/// Dissociated air behind a shock: O2, N2, O, N, NO by mass.
pub fn dissociated_air() -> Vec<GasComponent> {
    vec![
        GasComponent::new("O2", 9.09e-2, 259.8, 1.4, 0.032),
        GasComponent::new("N2", 0.726, 297.6, 1.4, 0.028),
        GasComponent::new("O", 0.131, 519.6, 1.67, 0.016),
        GasComponent::new("N", 4.67e-2, 593.9, 1.4, 0.014),
        GasComponent::new("NO", 5.41e-3, 277.1, 1.4, 0.030),
    ]
}

/// Mole fractions from the mass fractions of `components`, same order.
pub fn mass_to_mole_fractions(components: &[GasComponent]) -> Result<Vec<f64>, SurfaceError> {
    if let Some(bad) = components.iter().find(|c| !(c.M > 0.0)) {
        return Err(SurfaceError::InvalidParameter(format!(
            "molar mass of {} must be positive, got {}",
            bad.name, bad.M
        )));
    }
    let denominator: f64 = components.iter().map(|c| c.fraction / c.M).sum();
    if !(denominator > 0.0) {
        return Err(SurfaceError::InvalidParameter(
            "mixture has no mass to convert".to_string(),
        ));
    }
    Ok(components
        .iter()
        .map(|c| (c.fraction / c.M) / denominator)
        .collect())
}

/// (R_mix, gamma_mix) of the mixture.
pub fn mixture_properties(components: &[GasComponent]) -> Result<(f64, f64), SurfaceError> {
    let x = mass_to_mole_fractions(components)?;
    let R_mix: f64 = components.iter().zip(&x).map(|(c, xi)| xi * c.R).sum();
    let gamma_mix = components
        .iter()
        .zip(&x)
        .map(|(c, xi)| xi * (c.gamma - 1.0) * c.R)
        .sum::<f64>()
        / R_mix
        + 1.0;
    Ok((R_mix, gamma_mix))
}

#[allow(non_snake_case)]
pub fn speed_of_sound(T: f64, R: f64, gamma: f64) -> f64 {
    (gamma * R * T).sqrt()
}

#[allow(non_snake_case)]
pub fn mach_number(speed: f64, T: f64, R: f64, gamma: f64) -> f64 {
    speed / speed_of_sound(T, R, gamma)
}

pub fn ev_to_j_per_mol(ev: f64) -> f64 {
    ev * EV_TO_J * AVOGADRO
}

/// `n` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_air_speed_of_sound() {
        let a = speed_of_sound(300.0, 287.0, 1.4);
        assert_relative_eq!(a, 347.18870949384285, epsilon = 1e-9);
        assert_relative_eq!(mach_number(a, 300.0, 287.0, 1.4), 1.0);
    }

    #[test]
    fn test_mole_fractions() {
        let mix = vec![
            GasComponent::new("O2", 0.5, 259.8, 1.4, 0.032),
            GasComponent::new("O", 0.5, 519.6, 1.67, 0.016),
        ];
        let x = mass_to_mole_fractions(&mix).unwrap();
        assert_relative_eq!(x[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dissociated_air() {
        let mix = dissociated_air();
        let x = mass_to_mole_fractions(&mix).unwrap();
        assert_relative_eq!(x.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[2], 0.20229663672833323, epsilon = 1e-10);

        let (R_mix, gamma_mix) = mixture_properties(&mix).unwrap();
        assert_relative_eq!(R_mix, 364.18616182171996, epsilon = 1e-8);
        assert_relative_eq!(gamma_mix, 1.4779288252412632, epsilon = 1e-10);
        let M = mach_number(2984.0, 300.0, R_mix, gamma_mix);
        assert_relative_eq!(M, 7.425910520092884, epsilon = 1e-8);
    }

    #[test]
    fn test_single_gas_mixture() {
        let mix = vec![GasComponent::new("air", 1.0, 287.0, 1.4, 0.029)];
        let (R_mix, gamma_mix) = mixture_properties(&mix).unwrap();
        assert_relative_eq!(R_mix, 287.0);
        assert_relative_eq!(gamma_mix, 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_mixture() {
        let mix = vec![GasComponent::new("ghost", 1.0, 287.0, 1.4, 0.0)];
        assert!(mass_to_mole_fractions(&mix).is_err());
        assert!(mixture_properties(&[]).is_err());
    }

    #[test]
    fn test_ev_conversion() {
        assert_relative_eq!(ev_to_j_per_mol(0.2), 19296.65592, epsilon = 1e-6);
        assert_eq!(ev_to_j_per_mol(0.0), 0.0);
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(300.0, 3000.0, 10);
        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0], 300.0);
        assert_eq!(grid[9], 3000.0);
        assert_relative_eq!(grid[1], 600.0, epsilon = 1e-12);
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert!(linspace(1.0, 2.0, 0).is_empty());
    }
}
