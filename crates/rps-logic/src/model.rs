//! Shallow feed-forward classifier over encoded windows
//!
//! `FEATURES -> hidden (ReLU) -> CLASSES`, trained with full-batch Adam on
//! mean cross-entropy. Weights are row-major:
//! - `w1`: [hidden, FEATURES]
//! - `w2`: [CLASSES, hidden]

use crate::encoder::FEATURES;
use crate::error::LogicError;
use crate::game::Move;
use crate::random::SeededRng;

/// Output classes, one per move.
pub const CLASSES: usize = 3;

/// Default hidden layer width.
pub const DEFAULT_HIDDEN: usize = 32;

const BETA1: f32 = 0.9;
const BETA2: f32 = 0.999;
const EPSILON: f32 = 1e-8;

/// Model output for a single window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prediction {
    /// Arg-max class
    pub predicted: Move,
    /// Softmax distribution in encoding order
    pub probabilities: [f32; CLASSES],
}

impl Prediction {
    pub fn probability_of(&self, m: Move) -> f32 {
        self.probabilities[m.index()]
    }
}

/// One labelled, already-encoded sample
pub type Sample = ([f32; FEATURES], Move);

#[derive(Clone, Debug, PartialEq)]
struct Params {
    w1: Vec<f32>,
    b1: Vec<f32>,
    w2: Vec<f32>,
    b2: Vec<f32>,
}

impl Params {
    fn zeros(hidden: usize) -> Self {
        Self {
            w1: vec![0.0; hidden * FEATURES],
            b1: vec![0.0; hidden],
            w2: vec![0.0; CLASSES * hidden],
            b2: vec![0.0; CLASSES],
        }
    }

    fn iter(&self) -> impl Iterator<Item = &f32> {
        self.w1.iter().chain(&self.b1).chain(&self.w2).chain(&self.b2)
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.w1
            .iter_mut()
            .chain(self.b1.iter_mut())
            .chain(self.w2.iter_mut())
            .chain(self.b2.iter_mut())
    }

    fn len(&self) -> usize {
        self.w1.len() + self.b1.len() + self.w2.len() + self.b2.len()
    }
}

/// Adam first/second moment estimates
#[derive(Clone, Debug, PartialEq)]
struct Adam {
    m: Params,
    v: Params,
    t: i32,
}

/// Single-hidden-layer perceptron with its optimiser state
#[derive(Clone, Debug, PartialEq)]
pub struct Mlp {
    hidden: usize,
    params: Params,
    adam: Adam,
}

struct Activations {
    z1: Vec<f32>,
    h: Vec<f32>,
    logits: [f32; CLASSES],
}

impl Mlp {
    /// Fresh model, each layer initialised uniformly in ±1/sqrt(fan_in)
    pub fn new(hidden: usize, rng: &mut SeededRng) -> Self {
        let hidden = hidden.max(1);
        let mut params = Params::zeros(hidden);

        let bound1 = 1.0 / (FEATURES as f32).sqrt();
        for w in params.w1.iter_mut().chain(params.b1.iter_mut()) {
            *w = rng.uniform(-bound1, bound1);
        }
        let bound2 = 1.0 / (hidden as f32).sqrt();
        for w in params.w2.iter_mut().chain(params.b2.iter_mut()) {
            *w = rng.uniform(-bound2, bound2);
        }

        Self {
            hidden,
            params,
            adam: Adam {
                m: Params::zeros(hidden),
                v: Params::zeros(hidden),
                t: 0,
            },
        }
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Total trainable parameters
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// Optimiser steps taken so far
    pub fn steps(&self) -> u32 {
        self.adam.t as u32
    }

    fn forward(&self, x: &[f32; FEATURES]) -> Activations {
        let p = &self.params;

        // z1 = W1*x + b1, h = relu(z1)
        let mut z1 = vec![0f32; self.hidden];
        let mut h = vec![0f32; self.hidden];
        for i in 0..self.hidden {
            let row = &p.w1[i * FEATURES..(i + 1) * FEATURES];
            let sum = p.b1[i] + row.iter().zip(x).map(|(w, v)| w * v).sum::<f32>();
            z1[i] = sum;
            h[i] = sum.max(0.0);
        }

        // logits = W2*h + b2
        let mut logits = [0f32; CLASSES];
        for (c, logit) in logits.iter_mut().enumerate() {
            let row = &p.w2[c * self.hidden..(c + 1) * self.hidden];
            *logit = p.b2[c] + row.iter().zip(&h).map(|(w, v)| w * v).sum::<f32>();
        }

        Activations { z1, h, logits }
    }

    /// Raw class scores
    pub fn logits(&self, x: &[f32; FEATURES]) -> [f32; CLASSES] {
        self.forward(x).logits
    }

    /// Softmax distribution over the next move
    pub fn probabilities(&self, x: &[f32; FEATURES]) -> [f32; CLASSES] {
        softmax(&self.logits(x))
    }

    /// Distribution plus arg-max move; fails on non-finite output
    pub fn predict(&self, x: &[f32; FEATURES]) -> Result<Prediction, LogicError> {
        let probabilities = self.probabilities(x);
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(LogicError::NonFinite);
        }

        let mut best = 0;
        for c in 1..CLASSES {
            if probabilities[c] > probabilities[best] {
                best = c;
            }
        }
        let predicted = Move::from_index(best).ok_or(LogicError::NonFinite)?;

        Ok(Prediction { predicted, probabilities })
    }

    /// Mean cross-entropy over a batch
    pub fn loss(&self, batch: &[Sample]) -> f32 {
        if batch.is_empty() {
            return 0.0;
        }
        let total: f32 = batch
            .iter()
            .map(|(x, y)| cross_entropy(&self.forward(x).logits, y.index()))
            .sum();
        total / batch.len() as f32
    }

    /// One full-batch Adam step; returns the loss before the update.
    ///
    /// Parameters are untouched if the loss or any gradient is non-finite.
    pub fn train_step(&mut self, batch: &[Sample], learning_rate: f32) -> Result<f32, LogicError> {
        if batch.is_empty() {
            return Ok(0.0);
        }

        let n = batch.len() as f32;
        let mut grads = Params::zeros(self.hidden);
        let mut loss = 0.0;

        for (x, y) in batch {
            let act = self.forward(x);
            let label = y.index();
            loss += cross_entropy(&act.logits, label);

            // dL/dlogits = softmax - onehot
            let mut dlogits = softmax(&act.logits);
            dlogits[label] -= 1.0;
            for d in dlogits.iter_mut() {
                *d /= n;
            }

            let mut dh = vec![0f32; self.hidden];
            for (c, d) in dlogits.iter().enumerate() {
                grads.b2[c] += d;
                let off = c * self.hidden;
                for i in 0..self.hidden {
                    grads.w2[off + i] += d * act.h[i];
                    dh[i] += d * self.params.w2[off + i];
                }
            }

            for i in 0..self.hidden {
                if act.z1[i] <= 0.0 {
                    continue;
                }
                let dz = dh[i];
                grads.b1[i] += dz;
                let off = i * FEATURES;
                for (j, v) in x.iter().enumerate() {
                    // inputs are one-hot, most entries contribute nothing
                    if *v != 0.0 {
                        grads.w1[off + j] += dz * v;
                    }
                }
            }
        }

        loss /= n;
        if !loss.is_finite() || grads.iter().any(|g| !g.is_finite()) {
            return Err(LogicError::NonFinite);
        }

        self.apply_adam(&grads, learning_rate);
        Ok(loss)
    }

    #[cfg(test)]
    pub(crate) fn corrupt_output_bias(&mut self) {
        self.params.b2 = vec![f32::NAN; CLASSES];
    }

    fn apply_adam(&mut self, grads: &Params, learning_rate: f32) {
        self.adam.t += 1;
        let correction1 = 1.0 - BETA1.powi(self.adam.t);
        let correction2 = 1.0 - BETA2.powi(self.adam.t);

        let params = self.params.iter_mut();
        let moments = self.adam.m.iter_mut().zip(self.adam.v.iter_mut());
        for ((p, g), (m, v)) in params.zip(grads.iter()).zip(moments) {
            *m = BETA1 * *m + (1.0 - BETA1) * g;
            *v = BETA2 * *v + (1.0 - BETA2) * g * g;
            let m_hat = *m / correction1;
            let v_hat = *v / correction2;
            *p -= learning_rate * m_hat / (v_hat.sqrt() + EPSILON);
        }
    }
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32; CLASSES]) -> [f32; CLASSES] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut out = [0f32; CLASSES];
    let mut sum = 0.0;
    for (o, l) in out.iter_mut().zip(logits) {
        *o = (l - max).exp();
        sum += *o;
    }
    for o in out.iter_mut() {
        *o /= sum;
    }
    out
}

fn cross_entropy(logits: &[f32; CLASSES], label: usize) -> f32 {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let log_sum_exp = max + logits.iter().map(|l| (l - max).exp()).sum::<f32>().ln();
    log_sum_exp - logits[label]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    fn make_model() -> Mlp {
        Mlp::new(DEFAULT_HIDDEN, &mut SeededRng::new(42))
    }

    fn window(m: Move) -> [f32; FEATURES] {
        encode(&[m; 10]).unwrap()
    }

    #[test]
    fn test_shapes() {
        let model = make_model();
        assert_eq!(model.hidden(), 32);
        assert_eq!(model.parameter_count(), 32 * 30 + 32 + 3 * 32 + 3);
        assert_eq!(model.steps(), 0);
    }

    #[test]
    fn test_init_is_deterministic() {
        assert_eq!(make_model(), make_model());
        assert_ne!(make_model(), Mlp::new(DEFAULT_HIDDEN, &mut SeededRng::new(43)));
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = make_model();
        for m in Move::ALL {
            let probs = model.probabilities(&window(m));
            let sum: f32 = probs.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sum was {}", sum);
            assert!(probs.iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn test_softmax_is_stable_for_large_logits() {
        let probs = softmax(&[1000.0, 1000.0, -1000.0]);
        assert!((probs[0] - 0.5).abs() < 1e-6);
        assert!((probs[1] - 0.5).abs() < 1e-6);
        assert!(probs[2] < 1e-6);
    }

    #[test]
    fn test_cross_entropy_uniform() {
        let ce = cross_entropy(&[0.0, 0.0, 0.0], 1);
        assert!((ce - 3f32.ln()).abs() < 1e-6);
    }

    #[test]
    fn test_train_step_reduces_loss() {
        let mut model = make_model();
        let batch: Vec<Sample> = vec![
            (window(Move::Rock), Move::Paper),
            (window(Move::Paper), Move::Scissors),
            (window(Move::Scissors), Move::Rock),
        ];

        let before = model.loss(&batch);
        for _ in 0..200 {
            model.train_step(&batch, 0.01).unwrap();
        }
        let after = model.loss(&batch);

        assert!(after < before, "loss went from {} to {}", before, after);
        assert_eq!(model.steps(), 200);
        for (x, y) in &batch {
            assert_eq!(model.predict(x).unwrap().predicted, *y);
        }
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut model = make_model();
        let before = model.clone();
        assert_eq!(model.train_step(&[], 0.01), Ok(0.0));
        assert_eq!(model, before);
    }

    #[test]
    fn test_non_finite_leaves_params_untouched() {
        let mut model = make_model();
        model.params.w2[0] = f32::NAN;
        let before = model.params.clone();

        let batch = vec![(window(Move::Rock), Move::Rock)];
        assert_eq!(model.train_step(&batch, 0.01), Err(LogicError::NonFinite));
        assert_eq!(model.steps(), 0);
        // NaN != NaN, so compare the untouched entries only
        assert_eq!(model.params.w1, before.w1);
        assert_eq!(model.params.b2, before.b2);
    }

    #[test]
    fn test_predict_rejects_nan() {
        let mut model = make_model();
        model.corrupt_output_bias();
        assert_eq!(model.predict(&window(Move::Rock)), Err(LogicError::NonFinite));
    }
}
