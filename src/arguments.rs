use super::*;

#[derive(Debug, Parser)]
#[clap(about = "Classify microscopic images of parasites")]
pub(crate) struct Arguments {
  #[clap(flatten)]
  settings: Settings,
  #[clap(subcommand)]
  subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn run(self) -> Result {
    self.settings.init_logging()?;
    self.subcommand.run(&self.settings)
  }
}
