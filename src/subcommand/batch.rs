use super::*;

type Outcome = (String, Result<Analysis, Error>);

#[derive(Debug, Parser)]
pub(crate) struct Batch {
  #[clap(short, long)]
  dir: PathBuf,
  #[clap(short = 'k', long, default_value_t = Pipeline::DEFAULT_TOP_K)]
  top_k: usize,
  #[clap(short, long, help = "Save the results as CSV into this directory")]
  export: Option<PathBuf>,
}

impl Batch {
  pub(crate) fn run(self, settings: &Settings) -> Result {
    let paths = image_files(&self.dir)?;

    if paths.is_empty() {
      bail!("no PNG or JPEG images found in {}", self.dir.display());
    }

    let pipeline = settings.pipeline(self.top_k)?;

    pipeline.model().get()?;

    let progress_bar = ProgressBar::new(paths.len() as u64);

    progress_bar.set_style(
      ProgressStyle::default_bar()
        .template(
          "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Images {msg}",
        )?
        .progress_chars("=>-"),
    );

    let outcomes = Self::classify_all(&pipeline, &paths, &progress_bar);

    progress_bar.finish_with_message("Classification complete");

    let timestamp = export::timestamp();

    let records = Self::report(&outcomes, &timestamp);

    println!("Classified {}/{} images", records.len(), outcomes.len());

    if let Some(dir) = self.export {
      let path = export::write(&dir, &timestamp, &records)?;
      println!("Saved results to {}", path.display());
    }

    Ok(())
  }

  /// Classifies every path independently; a failing image yields an `Err`
  /// entry without affecting the rest. Output order follows `paths`.
  fn classify_all(
    pipeline: &Pipeline,
    paths: &[PathBuf],
    progress_bar: &ProgressBar,
  ) -> Vec<Outcome> {
    paths
      .par_iter()
      .map(|path| {
        let outcome = load_image(path).and_then(|image| pipeline.analyze(&image));
        progress_bar.inc(1);
        (file_name(path), outcome)
      })
      .collect()
  }

  /// Prints one line per image and returns export rows for the successes.
  fn report(outcomes: &[Outcome], timestamp: &str) -> Vec<ExportRecord> {
    let mut records = Vec::new();

    for (name, outcome) in outcomes {
      match outcome.as_ref().map(Analysis::primary) {
        Ok(Some(primary)) => {
          println!("{name}: {} ({:.1}%)", primary.label, primary.percent());
          records.push(ExportRecord::new(timestamp, primary, name));
        }
        Ok(None) => println!("{name}: no prediction"),
        Err(error) => {
          warn!("Failed to classify {name}: {error}");
          println!("{name}: error: {error}");
        }
      }
    }

    records
  }
}
