use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Predict {
  #[clap(short, long)]
  image: PathBuf,
  #[clap(short = 'k', long, default_value_t = Pipeline::DEFAULT_TOP_K)]
  top_k: usize,
  #[clap(short, long, help = "Save the result as CSV into this directory")]
  export: Option<PathBuf>,
  #[clap(long, help = "Print image properties")]
  debug: bool,
}

impl Predict {
  pub(crate) fn run(self, settings: &Settings) -> Result {
    let pipeline = settings.pipeline(self.top_k)?;

    let image = load_image(&self.image)?;

    if self.debug {
      let (width, height) = image.dimensions();
      println!("Image properties:");
      println!("  Size: {width}x{height}");
      println!("  Color type: {:?}", image.color());
    }

    let analysis = pipeline.analyze(&image)?;

    print!("{analysis}");

    if let Some(dir) = self.export {
      let Some(primary) = analysis.primary() else {
        bail!("no prediction to export");
      };

      let timestamp = export::timestamp();

      let record =
        ExportRecord::new(&timestamp, primary, &file_name(&self.image));

      let path = export::write(&dir, &timestamp, &[record])?;

      println!("Saved results to {}", path.display());
    }

    Ok(())
  }
}
