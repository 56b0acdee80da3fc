use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Info {
  #[clap(help = "Label to describe; lists all labels when omitted")]
  label: Option<String>,
}

impl Info {
  pub(crate) fn run(self, settings: &Settings) -> Result {
    let Some(label) = self.label else {
      for (index, label) in LABELS.iter().enumerate() {
        println!("{index:>2}: {label}");
      }
      return Ok(());
    };

    let reference = settings.reference()?;

    match reference.lookup(&label) {
      Ok(record) => print!("{}", record.render(&label)),
      Err(error) => {
        debug!("{error}");
        println!("No information available for this parasite.");
      }
    }

    if label_index(&label).is_none() {
      warn!("`{label}` is not one of the model's labels");
    }

    Ok(())
  }
}
