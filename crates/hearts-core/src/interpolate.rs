//! Piecewise-linear interpolation curves.
//!
//! A [`Curve`] maps an input value through a list of input breakpoints to the
//! matching output breakpoints, interpolating linearly inside each segment.
//! Inputs outside the outermost breakpoints follow the [`Extrapolate`] mode.

/// Behavior for inputs outside the first/last input breakpoint.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Extrapolate {
    /// Continue the slope of the outermost segment.
    #[default]
    Extend,
    /// Hold the outermost output value.
    Clamp,
}

/// Errors that make a set of breakpoints unusable.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CurveError {
    /// Fewer than two breakpoints.
    TooFewPoints,
    /// Input and output ranges differ in length.
    LengthMismatch,
    /// Input breakpoints go backwards.
    NotMonotonic,
    /// A breakpoint is NaN or infinite.
    NonFinite,
}

/// A piecewise-linear mapping from an input domain to an output range.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    input: Vec<f64>,
    output: Vec<f64>,
    extrapolate: Extrapolate,
}

impl Curve {
    /// Builds a curve with [`Extrapolate::Extend`] on both ends.
    ///
    /// Input breakpoints must be finite and non-decreasing.
    pub fn new(input: &[f64], output: &[f64]) -> Result<Self, CurveError> {
        if input.len() != output.len() {
            return Err(CurveError::LengthMismatch);
        }
        if input.len() < 2 {
            return Err(CurveError::TooFewPoints);
        }
        if input.iter().chain(output).any(|v| !v.is_finite()) {
            return Err(CurveError::NonFinite);
        }
        if input.windows(2).any(|w| w[1] < w[0]) {
            return Err(CurveError::NotMonotonic);
        }

        Ok(Self {
            input: input.to_vec(),
            output: output.to_vec(),
            extrapolate: Extrapolate::Extend,
        })
    }

    pub fn with_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn input_range(&self) -> &[f64] {
        &self.input
    }

    pub fn output_range(&self) -> &[f64] {
        &self.output
    }

    /// Evaluates the curve at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let segment = self.find_segment(x);
        self.eval_segment(x, segment)
    }

    /// Index `i` of the segment `[input[i], input[i + 1]]` used for `x`.
    fn find_segment(&self, x: f64) -> usize {
        let last = self.input.len() - 2;
        (1..self.input.len() - 1)
            .find(|&i| x < self.input[i])
            .map(|i| i - 1)
            .unwrap_or(last)
    }

    fn eval_segment(&self, x: f64, i: usize) -> f64 {
        let (in_min, in_max) = (self.input[i], self.input[i + 1]);
        let (out_min, out_max) = (self.output[i], self.output[i + 1]);

        if self.extrapolate == Extrapolate::Clamp {
            if x <= self.input[0] {
                return self.output[0];
            }
            if x >= self.input[self.input.len() - 1] {
                return self.output[self.output.len() - 1];
            }
        }

        // Zero-width segment: step from one output to the other.
        if in_min == in_max {
            return if x <= in_min { out_min } else { out_max };
        }
        if out_min == out_max {
            return out_min;
        }

        let t = (x - in_min) / (in_max - in_min);
        out_min + t * (out_max - out_min)
    }
}
