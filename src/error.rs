/// Failures of the classification core.
///
/// `Normalization` and `Inference` end the current request. `ModelUnavailable`
/// is sticky for the lifetime of a [`Model`](crate::model::Model). `NotFound`
/// only means the reference table has nothing to show for a label.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum Error {
  #[error("failed to normalize image: {0}")]
  Normalization(String),
  #[error("model unavailable: {0}")]
  ModelUnavailable(String),
  #[error("inference failed: {0}")]
  Inference(String),
  #[error("no reference information for `{0}`")]
  NotFound(String),
}
