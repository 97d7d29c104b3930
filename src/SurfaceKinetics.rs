/// Physical constants and tunable coefficients of the O/N recombination model.
/// `ParameterConfig` is the molar-unit input form (serde, defaults = reference set),
/// `ParameterSet` the validated per-molecule form consumed by the rate law.
#[allow(non_snake_case)]
pub mod parameters;
/// Rate law for one operating point: impingement fluxes, Eley-Rideal and
/// Langmuir-Hinshelwood recombination, thermal desorption and hydroxyl site blocking,
/// collected in `RateCoefficients`; balance residuals and their analytic Jacobian.
#[allow(non_snake_case)]
pub mod rate_law;
#[allow(non_snake_case)]
mod rate_law_tests;
