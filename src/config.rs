use super::*;

/// On-disk form of the dense network: flattened row-major matrices plus their
/// shapes.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableNetworkConfig {
  weight_input_hidden: Vec<f32>,
  weight_hidden_output: Vec<f32>,
  input_hidden_shape: (usize, usize),
  hidden_output_shape: (usize, usize),
}

#[derive(Clone, Debug)]
pub(crate) struct NetworkConfig {
  pub(crate) weight_input_hidden: Array2<f32>,
  pub(crate) weight_hidden_output: Array2<f32>,
}

impl From<NetworkConfig> for SerializableNetworkConfig {
  fn from(config: NetworkConfig) -> Self {
    let input_hidden_shape = config.weight_input_hidden.dim();
    let hidden_output_shape = config.weight_hidden_output.dim();

    Self {
      weight_input_hidden: config
        .weight_input_hidden
        .as_standard_layout()
        .iter()
        .copied()
        .collect(),
      weight_hidden_output: config
        .weight_hidden_output
        .as_standard_layout()
        .iter()
        .copied()
        .collect(),
      input_hidden_shape,
      hidden_output_shape,
    }
  }
}

impl TryFrom<SerializableNetworkConfig> for NetworkConfig {
  type Error = anyhow::Error;

  fn try_from(config: SerializableNetworkConfig) -> Result<Self> {
    if config.input_hidden_shape.0 != config.hidden_output_shape.1 {
      bail!(
        "hidden layer width mismatch: {} vs {}",
        config.input_hidden_shape.0,
        config.hidden_output_shape.1
      );
    }

    Ok(Self {
      weight_input_hidden: Array2::from_shape_vec(
        config.input_hidden_shape,
        config.weight_input_hidden,
      )
      .context("invalid input-hidden weights")?,
      weight_hidden_output: Array2::from_shape_vec(
        config.hidden_output_shape,
        config.weight_hidden_output,
      )
      .context("invalid hidden-output weights")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use {super::*, ndarray::array};

  #[test]
  fn mismatched_hidden_width_is_rejected() {
    let config = SerializableNetworkConfig {
      weight_input_hidden: vec![0.0; 6],
      weight_hidden_output: vec![0.0; 4],
      input_hidden_shape: (3, 2),
      hidden_output_shape: (2, 2),
    };

    assert!(NetworkConfig::try_from(config).is_err());
  }

  #[test]
  fn short_weight_buffer_is_rejected() {
    let config = SerializableNetworkConfig {
      weight_input_hidden: vec![0.0; 5],
      weight_hidden_output: vec![0.0; 6],
      input_hidden_shape: (3, 2),
      hidden_output_shape: (2, 3),
    };

    assert!(NetworkConfig::try_from(config).is_err());
  }

  #[test]
  fn transposed_weights_serialize_row_major() {
    let config = NetworkConfig {
      weight_input_hidden: array![[1.0, 2.0], [3.0, 4.0]].reversed_axes(),
      weight_hidden_output: array![[5.0, 6.0]],
    };

    let serializable = SerializableNetworkConfig::from(config);

    assert_eq!(serializable.weight_input_hidden, vec![1.0, 3.0, 2.0, 4.0]);
    assert_eq!(serializable.hidden_output_shape, (1, 2));
  }
}
