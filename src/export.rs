use super::*;

const HEADER: [&str; 4] =
  ["timestamp", "primary_prediction", "confidence", "image_name"];

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct ExportRecord {
  pub(crate) timestamp: String,
  pub(crate) primary_prediction: String,
  pub(crate) confidence: f32,
  pub(crate) image_name: String,
}

impl ExportRecord {
  pub(crate) fn new(
    timestamp: &str,
    prediction: &Prediction,
    image_name: &str,
  ) -> Self {
    Self {
      timestamp: timestamp.into(),
      primary_prediction: prediction.label.into(),
      confidence: prediction.confidence,
      image_name: image_name.into(),
    }
  }
}

pub(crate) fn timestamp() -> String {
  chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Writes `prediction_results_<timestamp>.csv` into `dir`.
pub(crate) fn write(
  dir: &Path,
  timestamp: &str,
  records: &[ExportRecord],
) -> Result<PathBuf> {
  fs::create_dir_all(dir)
    .with_context(|| format!("failed to create {}", dir.display()))?;

  let path = dir.join(format!("prediction_results_{timestamp}.csv"));

  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_path(&path)
    .with_context(|| format!("failed to create {}", path.display()))?;

  writer.write_record(HEADER)?;

  for record in records {
    writer
      .serialize(record)
      .context("failed to serialize prediction result")?;
  }

  writer.flush()?;

  info!("Saved {} prediction results to {}", records.len(), path.display());

  Ok(path)
}
