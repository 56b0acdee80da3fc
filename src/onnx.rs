use {
  crate::{
    classifier::{Classifier, ConfidenceVector},
    error::Error,
    normalizer::{NormalizedTensor, INPUT_SHAPE},
  },
  std::path::Path,
  tract_onnx::prelude::*,
};

/// An ONNX graph optimized into a plan. Running the plan only borrows it,
/// so one instance serves concurrent requests.
pub(crate) struct OnnxClassifier {
  plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
  pub(crate) fn load(path: &Path) -> std::result::Result<Self, Error> {
    let unavailable = |error: TractError| {
      Error::ModelUnavailable(format!("{}: {error:#}", path.display()))
    };

    let plan = tract_onnx::onnx()
      .model_for_path(path)
      .and_then(|model| model.with_input_fact(0, f32::fact(INPUT_SHAPE).into()))
      .and_then(|model| model.into_optimized())
      .and_then(|model| model.into_runnable())
      .map_err(unavailable)?;

    Ok(Self { plan })
  }
}

impl Classifier for OnnxClassifier {
  fn classify(
    &self,
    tensor: &NormalizedTensor,
  ) -> std::result::Result<ConfidenceVector, Error> {
    let inference = |error: TractError| Error::Inference(format!("{error:#}"));

    let input =
      Tensor::from_shape(tensor.shape(), tensor.as_slice()?).map_err(inference)?;

    let outputs = self.plan.run(tvec!(input.into())).map_err(inference)?;

    let output = outputs
      .first()
      .ok_or_else(|| Error::Inference("model produced no outputs".into()))?;

    let scores = output
      .to_array_view::<f32>()
      .map_err(inference)?
      .iter()
      .copied()
      .collect();

    ConfidenceVector::new(scores)
  }
}
