use super::*;

/// One score per entry of [`LABELS`], in the same order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ConfidenceVector(Vec<f32>);

impl ConfidenceVector {
  pub(crate) fn new(scores: Vec<f32>) -> Result<Self, Error> {
    if scores.len() != LABELS.len() {
      return Err(Error::Inference(format!(
        "model produced {} scores but the label table has {} entries",
        scores.len(),
        LABELS.len()
      )));
    }

    if let Some(index) = scores.iter().position(|score| !score.is_finite()) {
      return Err(Error::Inference(format!(
        "model produced a non-finite score for `{}`",
        LABELS[index]
      )));
    }

    Ok(Self(scores))
  }

  pub(crate) fn scores(&self) -> &[f32] {
    &self.0
  }
}

pub(crate) trait Classifier: Send + Sync {
  fn classify(&self, tensor: &NormalizedTensor)
    -> Result<ConfidenceVector, Error>;
}

/// Picks a backend from the artifact's extension.
pub(crate) fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, Error> {
  let extension = path
    .extension()
    .and_then(|extension| extension.to_str())
    .map(str::to_ascii_lowercase);

  match extension.as_deref() {
    Some("onnx") => Ok(Arc::new(onnx::OnnxClassifier::load(path)?)),
    Some("json") => Ok(Arc::new(DenseClassifier::load(path)?)),
    _ => Err(Error::ModelUnavailable(format!(
      "unsupported model artifact {}, expected a .onnx or .json file",
      path.display()
    ))),
  }
}

/// Fully-connected network read from a JSON weights file.
#[derive(Clone, Debug)]
pub(crate) struct DenseClassifier {
  network: Network,
}

impl DenseClassifier {
  pub(crate) fn new(network: Network) -> Result<Self, Error> {
    let expected = INPUT_SHAPE.iter().product::<usize>();

    if network.input_width() != expected {
      return Err(Error::ModelUnavailable(format!(
        "network expects {} inputs, images provide {expected}",
        network.input_width()
      )));
    }

    Ok(Self { network })
  }

  pub(crate) fn load(path: &Path) -> Result<Self, Error> {
    let network = Network::load_weights(path).map_err(|error| {
      Error::ModelUnavailable(format!("{}: {error:#}", path.display()))
    })?;

    Self::new(network)
  }
}

impl Classifier for DenseClassifier {
  fn classify(
    &self,
    tensor: &NormalizedTensor,
  ) -> Result<ConfidenceVector, Error> {
    let output = self.network.forward(tensor.rows()?);

    ConfidenceVector::new(output.index_axis(Axis(1), 0).to_vec())
  }
}

/// Returns the same scores for every input.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct FixedClassifier(pub(crate) Vec<f32>);

#[cfg(test)]
impl Classifier for FixedClassifier {
  fn classify(&self, _: &NormalizedTensor) -> Result<ConfidenceVector, Error> {
    ConfidenceVector::new(self.0.clone())
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*, approx::assert_relative_eq, image::RgbImage, tempdir::TempDir,
  };

  fn tensor() -> NormalizedTensor {
    normalize(&DynamicImage::ImageRgb8(RgbImage::new(10, 10))).unwrap()
  }

  fn dense(hidden: usize, outputs: usize) -> Network {
    Network::new(NetworkConfig {
      weight_input_hidden: Array2::zeros((hidden, 224 * 224 * 3)),
      weight_hidden_output: Array2::zeros((outputs, hidden)),
    })
  }

  #[test]
  fn confidence_vector_length_must_match_labels() {
    assert!(ConfidenceVector::new(vec![0.0; 15]).is_ok());

    assert!(matches!(
      ConfidenceVector::new(vec![0.5; 10]),
      Err(Error::Inference(_))
    ));
  }

  #[test]
  fn confidence_vector_rejects_non_finite_scores() {
    let mut scores = vec![0.0; 15];
    scores[3] = f32::NAN;

    assert_eq!(
      ConfidenceVector::new(scores),
      Err(Error::Inference(
        "model produced a non-finite score for `Enterobius v`".into()
      ))
    );
  }

  #[test]
  fn unknown_extension_is_unavailable() {
    assert!(matches!(
      load_classifier(Path::new("models/model.keras")),
      Err(Error::ModelUnavailable(_))
    ));
  }

  #[test]
  fn missing_artifacts_are_unavailable() {
    let dir = TempDir::new("classifier").unwrap();

    for name in ["model.onnx", "model.json"] {
      assert!(matches!(
        load_classifier(&dir.path().join(name)),
        Err(Error::ModelUnavailable(_))
      ));
    }
  }

  #[test]
  fn corrupt_onnx_artifact_is_unavailable() {
    let dir = TempDir::new("classifier").unwrap();

    let path = dir.path().join("model.onnx");

    fs::write(&path, b"not a protobuf").unwrap();

    assert!(matches!(
      load_classifier(&path),
      Err(Error::ModelUnavailable(_))
    ));
  }

  #[test]
  fn dense_classifier_outputs_distribution() {
    let classifier = DenseClassifier::new(dense(2, 15)).unwrap();

    let scores = classifier.classify(&tensor()).unwrap();

    assert_eq!(scores.scores().len(), 15);

    assert_relative_eq!(
      scores.scores().iter().sum::<f32>(),
      1.0,
      epsilon = 1e-5
    );
  }

  #[test]
  fn dense_classifier_rejects_wrong_input_width() {
    let network = Network::new(NetworkConfig {
      weight_input_hidden: Array2::zeros((2, 784)),
      weight_hidden_output: Array2::zeros((15, 2)),
    });

    assert!(matches!(
      DenseClassifier::new(network),
      Err(Error::ModelUnavailable(_))
    ));
  }

  #[test]
  fn dense_classifier_output_mismatch_is_inference_error() {
    let classifier = DenseClassifier::new(dense(2, 10)).unwrap();

    assert!(matches!(
      classifier.classify(&tensor()),
      Err(Error::Inference(_))
    ));
  }

  #[test]
  fn dense_classifier_loads_from_json() {
    let dir = TempDir::new("classifier").unwrap();

    let path = dir.path().join("model.json");

    dense(1, 15).save_weights(&path).unwrap();

    let classifier = load_classifier(&path).unwrap();

    assert!(classifier.classify(&tensor()).is_ok());
  }
}
