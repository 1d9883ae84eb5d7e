/// The logistic sigmoid, `1 / (1 + e^-z)`.
pub fn sigmoid(z: f32) -> f32 {
    1. / (1. + (-z).exp())
}

/// The derivative of the sigmoid expressed in terms of its own output `a = sigmoid(z)`.
pub fn sigmoid_prime(a: f32) -> f32 {
    a * (1. - a)
}
