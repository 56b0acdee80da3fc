use {super::*, app::App, batch::Batch, info::Info, predict::Predict};

mod app;
mod batch;
mod info;
mod predict;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[clap(name = "app", about = "Run an interactive GUI application")]
  App(App),
  #[clap(name = "batch", about = "Classify every image in a directory")]
  Batch(Batch),
  #[clap(name = "info", about = "Show reference information for a label")]
  Info(Info),
  #[clap(name = "predict", about = "Classify a single image")]
  Predict(Predict),
}

impl Subcommand {
  pub(crate) fn run(self, settings: &Settings) -> Result {
    match self {
      Self::App(app) => app.run(settings),
      Self::Batch(batch) => batch.run(settings),
      Self::Info(info) => info.run(settings),
      Self::Predict(predict) => predict.run(settings),
    }
  }
}
