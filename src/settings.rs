use super::*;

#[derive(Clone, Debug, Parser)]
pub(crate) struct Settings {
  #[clap(
    long,
    global = true,
    env = "PARASCOPE_MODEL",
    default_value = "models/model.onnx",
    help = "Model artifact, either an ONNX graph or dense JSON weights"
  )]
  pub(crate) model: PathBuf,
  #[clap(
    long,
    global = true,
    env = "PARASCOPE_REFERENCE",
    help = "Parasite reference table overriding the built-in one"
  )]
  pub(crate) reference: Option<PathBuf>,
  #[clap(short, long, global = true, help = "Enable debug logging")]
  pub(crate) verbose: bool,
}

impl Settings {
  pub(crate) fn init_logging(&self) -> Result {
    let level = if self.verbose { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
          "warn,{}={level}",
          env!("CARGO_CRATE_NAME")
        ))
      });

    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .try_init()
      .map_err(|error| anyhow!("failed to initialize logging: {error}"))
  }

  pub(crate) fn reference(&self) -> Result<ReferenceTable> {
    match &self.reference {
      Some(path) => ReferenceTable::load(path),
      None => ReferenceTable::builtin(),
    }
  }

  pub(crate) fn pipeline(&self, top_k: usize) -> Result<Pipeline> {
    Ok(Pipeline::new(
      Model::from_path(self.model.clone()),
      Arc::new(self.reference()?),
      top_k,
    ))
  }
}
