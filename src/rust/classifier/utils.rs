use ndarray::{Array1, ArrayViewMut1};

pub(crate) fn l2_normalize(mut row: ArrayViewMut1<'_, f64>) {
    let norm: f64 = row.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 1e-12 {
        row /= norm;
    }
}

pub(crate) fn l1_normalize(mut row: ArrayViewMut1<'_, f64>) {
    let norm: f64 = row.iter().map(|x| x.abs()).sum();
    if norm > 1e-12 {
        row /= norm;
    }
}

pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Turns joint log likelihoods into probabilities.
pub(crate) fn softmax_log(jll: &Array1<f64>) -> Array1<f64> {
    let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp = jll.mapv(|x| (x - max).exp());
    let sum = exp.sum();
    exp / sum
}
