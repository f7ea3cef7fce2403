//! Function identification problems
//!
//! Four parametric families with randomized coefficients. Quiz rounds pair
//! the target with distractor equations (deduplicated by equation string);
//! construct mode checks slider-adjusted coefficients against the target
//! within an absolute tolerance.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::consts::{COEFF_TOLERANCE, PLOT_SAMPLES, PLOT_X_MAX, PLOT_X_MIN};
use crate::plot::PlotSeries;

/// Parametric function families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionKind {
    Linear,
    Quadratic,
    Sine,
    Exponential,
}

impl FunctionKind {
    pub const ALL: [FunctionKind; 4] = [
        FunctionKind::Linear,
        FunctionKind::Quadratic,
        FunctionKind::Sine,
        FunctionKind::Exponential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Linear => "linear",
            FunctionKind::Quadratic => "quadratic",
            FunctionKind::Sine => "sine",
            FunctionKind::Exponential => "exponential",
        }
    }
}

/// Quiz difficulty, controls the number of answer options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Total options presented (target + distractors)
    pub fn option_count(&self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }
}

/// A generated function: family, named coefficients, and the canonical
/// equation string. Immutable once generated for a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSpec {
    pub kind: FunctionKind,
    pub coeffs: BTreeMap<&'static str, f64>,
    pub equation: String,
}

/// Render a trailing coefficient with its canonical sign: "+ 3" or "- 3"
fn signed_term(v: f64) -> String {
    if v < 0.0 {
        format!("- {}", fmt_num(-v))
    } else {
        format!("+ {}", fmt_num(v))
    }
}

/// Integral values render without a decimal point
fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

impl FunctionSpec {
    /// Generate a random function of a random family
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let kind = FunctionKind::ALL[rng.random_range(0..FunctionKind::ALL.len())];
        Self::random_of_kind(rng, kind)
    }

    /// Generate a random function of the given family
    pub fn random_of_kind<R: Rng>(rng: &mut R, kind: FunctionKind) -> Self {
        let mut coeffs = BTreeMap::new();
        match kind {
            FunctionKind::Linear => {
                // a may be any value in range, including 0
                coeffs.insert("a", rng.random_range(-5..=5) as f64);
                coeffs.insert("b", rng.random_range(-10..=10) as f64);
            }
            FunctionKind::Quadratic => {
                // A zero leading coefficient would degenerate to linear
                let mut a = rng.random_range(-3..=3);
                if a == 0 {
                    a = 1;
                }
                coeffs.insert("a", a as f64);
                coeffs.insert("b", rng.random_range(-5..=5) as f64);
                coeffs.insert("c", rng.random_range(-10..=10) as f64);
            }
            FunctionKind::Sine => {
                coeffs.insert("a", rng.random_range(1..=3) as f64);
                coeffs.insert("b", [0.5, 1.0, 1.5][rng.random_range(0..3)]);
                coeffs.insert("c", rng.random_range(0..=4) as f64);
            }
            FunctionKind::Exponential => {
                coeffs.insert("a", rng.random_range(1..=3) as f64);
                coeffs.insert("b", [0.1, 0.2, 0.3][rng.random_range(0..3)]);
            }
        }
        Self::from_coeffs(kind, coeffs)
    }

    /// Build a spec from explicit coefficients (construct mode, tests)
    pub fn from_coeffs(kind: FunctionKind, coeffs: BTreeMap<&'static str, f64>) -> Self {
        let equation = Self::render_equation(kind, &coeffs);
        Self {
            kind,
            coeffs,
            equation,
        }
    }

    fn render_equation(kind: FunctionKind, coeffs: &BTreeMap<&'static str, f64>) -> String {
        let c = |name: &str| coeffs.get(name).copied().unwrap_or(0.0);
        match kind {
            FunctionKind::Linear => {
                format!("f(x) = {}x {}", fmt_num(c("a")), signed_term(c("b")))
            }
            FunctionKind::Quadratic => format!(
                "f(x) = {}x² {}x {}",
                fmt_num(c("a")),
                signed_term(c("b")),
                signed_term(c("c"))
            ),
            FunctionKind::Sine => format!(
                "f(x) = {}sin({}x {})",
                fmt_num(c("a")),
                fmt_num(c("b")),
                signed_term(c("c"))
            ),
            FunctionKind::Exponential => {
                format!("f(x) = {}e^({}x)", fmt_num(c("a")), fmt_num(c("b")))
            }
        }
    }

    fn coeff(&self, name: &str) -> f64 {
        self.coeffs.get(name).copied().unwrap_or(0.0)
    }

    /// Evaluate the function at x
    pub fn eval(&self, x: f64) -> f64 {
        match self.kind {
            FunctionKind::Linear => self.coeff("a") * x + self.coeff("b"),
            FunctionKind::Quadratic => {
                self.coeff("a") * x * x + self.coeff("b") * x + self.coeff("c")
            }
            FunctionKind::Sine => self.coeff("a") * (self.coeff("b") * x + self.coeff("c")).sin(),
            FunctionKind::Exponential => self.coeff("a") * (self.coeff("b") * x).exp(),
        }
    }

    /// Construct-mode check: every coefficient the target defines must be
    /// within the absolute tolerance; extra user keys are ignored.
    pub fn check_construction(&self, user: &BTreeMap<&'static str, f64>) -> bool {
        self.coeffs
            .iter()
            .all(|(k, v)| user.get(k).is_some_and(|u| (u - v).abs() <= COEFF_TOLERANCE))
    }

    /// Sample evaluation points over the plot domain for the plotting
    /// surface. Non-finite values (overflow) are silently dropped.
    pub fn sample_points(&self, style: &str) -> PlotSeries {
        let mut x = Vec::with_capacity(PLOT_SAMPLES);
        let mut y = Vec::with_capacity(PLOT_SAMPLES);
        for i in 0..PLOT_SAMPLES {
            let t = i as f64 / (PLOT_SAMPLES - 1) as f64;
            let xi = PLOT_X_MIN + (PLOT_X_MAX - PLOT_X_MIN) * t;
            let yi = self.eval(xi);
            if yi.is_finite() {
                x.push(xi);
                y.push(yi);
            }
        }
        PlotSeries::new(x, y, style)
    }
}

/// One quiz round: the target hidden among distractors, in random order
#[derive(Debug, Clone, Serialize)]
pub struct QuizRound {
    pub options: Vec<FunctionSpec>,
    target_index: usize,
}

impl QuizRound {
    /// Generate a target plus distractors, rejecting duplicates by equation
    /// string, then shuffle the presentation order.
    pub fn generate<R: Rng>(rng: &mut R, difficulty: Difficulty) -> Self {
        let target = FunctionSpec::random(rng);
        let target_equation = target.equation.clone();

        let mut options = vec![target];
        while options.len() < difficulty.option_count() {
            let distractor = FunctionSpec::random(rng);
            if !options.iter().any(|o| o.equation == distractor.equation) {
                options.push(distractor);
            }
        }
        options.shuffle(rng);

        let target_index = options
            .iter()
            .position(|o| o.equation == target_equation)
            .unwrap_or(0);
        Self {
            options,
            target_index,
        }
    }

    pub fn target(&self) -> &FunctionSpec {
        &self.options[self.target_index]
    }

    /// Correct iff the selected equation string equals the target's
    pub fn check_answer(&self, selected: &FunctionSpec) -> bool {
        selected.equation == self.target().equation
    }

    /// Index-based variant for option-list presentations
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.target_index
    }
}
