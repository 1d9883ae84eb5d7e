use ndarray::ArrayView1;

/// The squared error `Σ (y_pred - y)²` between a prediction and its target.
///
/// The gradient used by `Network::backprop` is `y_pred - y`, the derivative of half this value.
pub fn squared_error(y_pred: ArrayView1<f32>, y: ArrayView1<f32>) -> f32 {
    (&y_pred - &y).mapv(|x| x.powi(2)).sum()
}
