//! Search-space definition: per-variable kind and box bounds.
//!
//! A [`SearchSpace`] fixes the dimension of the problem and, for each
//! variable, whether it is continuous or integer and which closed interval
//! it may take values in. Every candidate the engine produces is kept
//! inside these bounds.

use crate::error::GaError;
use rand::Rng;

/// Kind of a single decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarKind {
    /// Continuous variable, any value inside the bounds.
    Real,
    /// Integer-valued variable; bounds must be whole numbers.
    Int,
}

/// One decision variable: its kind and closed bounds `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarSpec {
    kind: VarKind,
    lower: f64,
    upper: f64,
}

impl VarSpec {
    /// Builds a variable spec, checking that the bounds are finite, ordered,
    /// and (for integer variables) whole numbers.
    pub fn new(kind: VarKind, lower: f64, upper: f64) -> Result<Self, GaError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(GaError::configuration(
                "variable_boundaries",
                format!("bounds must be finite, got {lower}..{upper}"),
            ));
        }
        if lower > upper {
            return Err(GaError::configuration(
                "variable_boundaries",
                format!("lower bound {lower} exceeds upper bound {upper}"),
            ));
        }
        if kind == VarKind::Int && (lower.fract() != 0.0 || upper.fract() != 0.0) {
            return Err(GaError::configuration(
                "variable_boundaries",
                format!("integer variable bounds must be whole numbers, got {lower}..{upper}"),
            ));
        }
        Ok(Self { kind, lower, upper })
    }

    /// Continuous variable over `[lower, upper]`.
    pub fn real(lower: f64, upper: f64) -> Result<Self, GaError> {
        Self::new(VarKind::Real, lower, upper)
    }

    /// Integer variable over `[lower, upper]`.
    pub fn int(lower: f64, upper: f64) -> Result<Self, GaError> {
        Self::new(VarKind::Int, lower, upper)
    }

    pub fn kind(&self) -> VarKind {
        self.kind
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Width of the interval, `upper - lower`.
    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    /// Draws a uniform value. Integer variables use the inclusive range;
    /// continuous variables use `[lower, upper)`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        match self.kind {
            VarKind::Int => rng.random_range(self.lower as i64..=self.upper as i64) as f64,
            VarKind::Real => {
                if self.upper > self.lower {
                    rng.random_range(self.lower..self.upper)
                } else {
                    self.lower
                }
            }
        }
    }

    /// Pulls a value back into the variable's domain: clamp to the bounds,
    /// then round if the variable is integer.
    pub fn repair(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.lower, self.upper);
        match self.kind {
            VarKind::Int => clamped.round(),
            VarKind::Real => clamped,
        }
    }

    /// Whether `value` lies in the variable's domain.
    pub fn contains(&self, value: f64) -> bool {
        if value < self.lower || value > self.upper {
            return false;
        }
        match self.kind {
            VarKind::Int => value.fract() == 0.0,
            VarKind::Real => true,
        }
    }
}

/// Box-bounded search space: one [`VarSpec`] per dimension.
///
/// # Examples
///
/// ```
/// use gabox::{SearchSpace, VarKind};
///
/// // Three continuous variables in [-5, 5]
/// let space = SearchSpace::real(&[(-5.0, 5.0); 3]).unwrap();
/// assert_eq!(space.dimension(), 3);
///
/// // A mixed space: one integer count, one continuous weight
/// let space = SearchSpace::mixed(
///     &[VarKind::Int, VarKind::Real],
///     &[(0.0, 10.0), (0.0, 1.0)],
/// ).unwrap();
/// assert_eq!(space.dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSpace {
    vars: Vec<VarSpec>,
}

impl SearchSpace {
    /// Builds a space from explicit variable specs. Must be non-empty.
    pub fn new(vars: Vec<VarSpec>) -> Result<Self, GaError> {
        if vars.is_empty() {
            return Err(GaError::configuration(
                "dimension",
                "search space needs at least one variable",
            ));
        }
        Ok(Self { vars })
    }

    /// All-continuous space with the given `(lower, upper)` pairs.
    pub fn real(bounds: &[(f64, f64)]) -> Result<Self, GaError> {
        let vars = bounds
            .iter()
            .map(|&(lo, hi)| VarSpec::real(lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(vars)
    }

    /// All-integer space with the given `(lower, upper)` pairs.
    pub fn int(bounds: &[(f64, f64)]) -> Result<Self, GaError> {
        let vars = bounds
            .iter()
            .map(|&(lo, hi)| VarSpec::int(lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(vars)
    }

    /// Space of `dimension` boolean flags, encoded as integers in `[0, 1]`.
    pub fn boolean(dimension: usize) -> Result<Self, GaError> {
        let vars = (0..dimension)
            .map(|_| VarSpec::int(0.0, 1.0))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(vars)
    }

    /// Mixed space: `kinds[i]` paired with `bounds[i]`.
    pub fn mixed(kinds: &[VarKind], bounds: &[(f64, f64)]) -> Result<Self, GaError> {
        if kinds.len() != bounds.len() {
            return Err(GaError::configuration(
                "variable_types",
                format!(
                    "{} variable kinds given for {} bound pairs",
                    kinds.len(),
                    bounds.len()
                ),
            ));
        }
        let vars = kinds
            .iter()
            .zip(bounds)
            .map(|(&kind, &(lo, hi))| VarSpec::new(kind, lo, hi))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(vars)
    }

    /// Number of decision variables.
    pub fn dimension(&self) -> usize {
        self.vars.len()
    }

    pub fn vars(&self) -> &[VarSpec] {
        &self.vars
    }

    /// Draws one uniform candidate, gene by gene.
    pub fn sample_genes<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.vars.iter().map(|v| v.sample(rng)).collect()
    }

    /// Repairs a candidate in place so that every gene is inside its
    /// variable's domain. Continuous crossover and mutation can push
    /// integer genes off the lattice; this is where they come back.
    pub fn repair(&self, genes: &mut [f64]) {
        for (gene, var) in genes.iter_mut().zip(&self.vars) {
            *gene = var.repair(*gene);
        }
    }

    /// Whether every gene of `genes` lies in its variable's domain.
    pub fn contains(&self, genes: &[f64]) -> bool {
        genes.len() == self.dimension()
            && genes.iter().zip(&self.vars).all(|(&g, v)| v.contains(g))
    }
}
