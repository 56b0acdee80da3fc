use super::*;

#[derive(Clone, Debug)]
pub(crate) struct Network {
  config: NetworkConfig,
}

impl Network {
  pub(crate) fn new(config: NetworkConfig) -> Self {
    Self { config }
  }

  pub(crate) fn input_width(&self) -> usize {
    self.config.weight_input_hidden.ncols()
  }

  /// Returns one softmax column per input row.
  pub(crate) fn forward(&self, input: ArrayView2<f32>) -> Array2<f32> {
    let hidden = self.config.weight_input_hidden.dot(&input.t()).mapv(relu);

    let mut output = self.config.weight_hidden_output.dot(&hidden);

    for mut column in output.axis_iter_mut(Axis(1)) {
      let probabilities = softmax(column.view());
      column.assign(&probabilities);
    }

    output
  }

  #[cfg(test)]
  pub(crate) fn save_weights(&self, path: &Path) -> Result {
    let serializable_config: SerializableNetworkConfig =
      self.config.clone().into();

    let file = File::create(path).context("failed to create weights file")?;

    serde_json::to_writer(file, &serializable_config)
      .context("failed to serialize network weights")?;

    Ok(())
  }

  pub(crate) fn load_weights(path: &Path) -> Result<Self> {
    let file = File::open(path).context("failed to open weights file")?;

    let serializable_config: SerializableNetworkConfig =
      serde_json::from_reader(std::io::BufReader::new(file))
        .context("failed to deserialize network weights")?;

    let config = NetworkConfig::try_from(serializable_config)?;

    Ok(Self::new(config))
  }
}
