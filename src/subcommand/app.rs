use super::*;

#[derive(Debug, Parser)]
pub(crate) struct App {
  #[clap(short, long, default_value = "data_samples")]
  samples: PathBuf,
  #[clap(short = 'k', long, default_value_t = Pipeline::DEFAULT_TOP_K)]
  top_k: usize,
  #[clap(short, long, default_value = ".")]
  export: PathBuf,
}

impl App {
  pub(crate) fn run(self, settings: &Settings) -> Result {
    let pipeline = settings.pipeline(self.top_k)?;

    let app = Interface::new(pipeline, self.samples, self.export);

    let native_options = NativeOptions {
      centered: true,
      hardware_acceleration: HardwareAcceleration::Preferred,
      viewport: egui::ViewportBuilder::default()
        .with_title("Parasitology Image Classifier")
        .with_inner_size(Vec2::new(960.0, 720.0)),
      ..Default::default()
    };

    eframe::run_native(
      env!("CARGO_PKG_NAME"),
      native_options,
      Box::new(|_| Ok(Box::new(app))),
    )
    .map_err(|error| anyhow!("failed to run app: {error}"))
  }
}
