use super::*;

pub(crate) fn relu(x: f32) -> f32 {
  x.max(0.0)
}

pub(crate) fn softmax(x: ArrayView1<f32>) -> Array1<f32> {
  let max = x.fold(f32::NEG_INFINITY, |max, &value| max.max(value));

  let exp = x.mapv(|value| (value - max).exp());

  let sum = exp.sum();

  exp / sum
}
