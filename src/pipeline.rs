use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Analysis {
  pub(crate) predictions: Vec<Prediction>,
  pub(crate) record: Option<ParasiteRecord>,
}

impl Analysis {
  pub(crate) fn primary(&self) -> Option<&Prediction> {
    self.predictions.first()
  }

  pub(crate) fn alternatives(&self) -> &[Prediction] {
    self.predictions.get(1..).unwrap_or_default()
  }
}

impl Display for Analysis {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let Some(primary) = self.primary() else {
      return Ok(());
    };

    writeln!(
      f,
      "Primary detection: {} ({:.1}%)",
      primary.label,
      primary.percent()
    )?;

    if !self.alternatives().is_empty() {
      writeln!(f, "Alternative possibilities:")?;

      for prediction in self.alternatives() {
        writeln!(f, "  - {}: {:.1}%", prediction.label, prediction.percent())?;
      }
    }

    writeln!(f, "Parasite information:")?;

    match &self.record {
      Some(record) => write!(f, "{}", record.render(primary.label)),
      None => writeln!(f, "No information available for this parasite."),
    }
  }
}

/// Normalize, classify, rank, then look up the top label.
pub(crate) struct Pipeline {
  model: Model,
  reference: Arc<ReferenceTable>,
  top_k: usize,
}

impl Pipeline {
  pub(crate) const DEFAULT_TOP_K: usize = 3;

  pub(crate) fn new(
    model: Model,
    reference: Arc<ReferenceTable>,
    top_k: usize,
  ) -> Self {
    Self {
      model,
      reference,
      top_k,
    }
  }

  pub(crate) fn model(&self) -> &Model {
    &self.model
  }

  pub(crate) fn analyze(&self, image: &DynamicImage) -> Result<Analysis, Error> {
    let (width, height) = image.dimensions();

    debug!("Processing {width}x{height} {:?} image", image.color());

    let tensor = normalize(image)?;

    let scores = self.model.classify(&tensor)?;

    let predictions = top_k(&scores, self.top_k);

    let record = match predictions.first() {
      Some(primary) => match self.reference.lookup(primary.label) {
        Ok(record) => Some(record.clone()),
        Err(error) => {
          warn!("{error}");
          None
        }
      },
      None => None,
    };

    Ok(Analysis {
      predictions,
      record,
    })
  }
}
