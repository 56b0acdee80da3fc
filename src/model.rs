use super::*;

type Loader =
  Box<dyn Fn() -> Result<Arc<dyn Classifier>, Error> + Send + Sync>;

/// Lazily loaded classifier shared by every request.
///
/// The loader runs at most once. A failed load is remembered, so later calls
/// keep returning [`Error::ModelUnavailable`] until [`Model::reset`] is called.
pub(crate) struct Model {
  loader: Loader,
  cell: OnceLock<Result<Arc<dyn Classifier>, Error>>,
}

impl Model {
  pub(crate) fn from_path(path: PathBuf) -> Self {
    Self::with_loader(move || load_classifier(&path))
  }

  pub(crate) fn with_loader(
    loader: impl Fn() -> Result<Arc<dyn Classifier>, Error>
      + Send
      + Sync
      + 'static,
  ) -> Self {
    Self {
      loader: Box::new(loader),
      cell: OnceLock::new(),
    }
  }

  #[cfg(test)]
  pub(crate) fn fixed(classifier: impl Classifier + 'static) -> Self {
    let classifier: Arc<dyn Classifier> = Arc::new(classifier);
    Self::with_loader(move || Ok(classifier.clone()))
  }

  pub(crate) fn get(&self) -> Result<Arc<dyn Classifier>, Error> {
    self
      .cell
      .get_or_init(|| match (self.loader)() {
        Ok(classifier) => {
          info!("Model loaded successfully");
          Ok(classifier)
        }
        Err(error) => {
          error!("Error loading model: {error}");
          Err(match error {
            Error::ModelUnavailable(message) => Error::ModelUnavailable(message),
            other => Error::ModelUnavailable(other.to_string()),
          })
        }
      })
      .clone()
  }

  pub(crate) fn classify(
    &self,
    tensor: &NormalizedTensor,
  ) -> Result<ConfidenceVector, Error> {
    self.get()?.classify(tensor)
  }

  /// Drops the cached handle or failure so the next call loads again.
  #[cfg(test)]
  pub(crate) fn reset(&mut self) {
    self.cell.take();
  }
}
