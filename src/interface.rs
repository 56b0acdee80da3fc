use super::*;

const PREVIEW_SIZE: f32 = 300.0;

const THUMBNAIL_SIZE: f32 = 90.0;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Source {
  File,
  Samples,
}

struct Selection {
  name: String,
  dimensions: (u32, u32),
  color: ColorType,
  texture: Option<TextureHandle>,
}

pub(crate) struct Interface {
  pipeline: Pipeline,
  samples_dir: PathBuf,
  export_dir: PathBuf,
  samples: Option<Vec<Sample>>,
  thumbnails: Vec<Option<TextureHandle>>,
  source: Source,
  path: String,
  selection: Option<Selection>,
  outcome: Option<Result<Analysis, Error>>,
  status: Option<String>,
  show_debug: bool,
}

impl eframe::App for Interface {
  fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    self.handle_dropped_files(ctx);

    egui::SidePanel::left("settings").show(ctx, |ui| {
      ui.heading("Settings & Information");
      ui.checkbox(&mut self.show_debug, "Show debug info");
      ui.separator();
      ui.label(format!("{} known species", LABELS.len()));
    });

    egui::CentralPanel::default().show(ctx, |ui| {
      egui::ScrollArea::vertical().show(ui, |ui| {
        self.ui(ui);
      });
    });
  }
}

impl Interface {
  pub(crate) fn new(
    pipeline: Pipeline,
    samples_dir: PathBuf,
    export_dir: PathBuf,
  ) -> Self {
    Self {
      pipeline,
      samples_dir,
      export_dir,
      samples: None,
      thumbnails: Vec::new(),
      source: Source::File,
      path: String::new(),
      selection: None,
      outcome: None,
      status: None,
      show_debug: false,
    }
  }

  fn select(&mut self, ctx: &egui::Context, name: String, image: DynamicImage) {
    let dimensions = image.dimensions();

    let texture = texture(ctx, &name, &image);

    let outcome = self.pipeline.analyze(&image);

    if let Err(error) = &outcome {
      error!("Failed to classify {name}: {error}");
    }

    self.outcome = Some(outcome);

    self.selection = Some(Selection {
      name,
      dimensions,
      color: image.color(),
      texture,
    });

    self.status = None;
  }

  fn fail(&mut self, error: Error) {
    self.selection = None;
    self.outcome = Some(Err(error));
    self.status = None;
  }

  fn open_path(&mut self, ctx: &egui::Context) {
    let path = PathBuf::from(self.path.trim());

    match load_image(&path) {
      Ok(image) => self.select(ctx, file_name(&path), image),
      Err(error) => self.fail(error),
    }
  }

  fn handle_dropped_files(&mut self, ctx: &egui::Context) {
    let dropped = ctx.input(|input| input.raw.dropped_files.clone());

    let Some(file) = dropped.into_iter().next() else {
      return;
    };

    let image = match (&file.bytes, &file.path) {
      (Some(bytes), _) => decode(bytes),
      (None, Some(path)) => load_image(path),
      (None, None) => return,
    };

    let name = match &file.path {
      Some(path) if file.name.is_empty() => file_name(path),
      _ => file.name.clone(),
    };

    self.source = Source::File;

    match image {
      Ok(image) => self.select(ctx, name, image),
      Err(error) => self.fail(error),
    }
  }

  fn save_results(&mut self) {
    let (Some(selection), Some(Ok(analysis))) = (&self.selection, &self.outcome)
    else {
      return;
    };

    let Some(primary) = analysis.primary() else {
      return;
    };

    let timestamp = export::timestamp();

    let record = ExportRecord::new(&timestamp, primary, &selection.name);

    self.status = Some(
      match export::write(&self.export_dir, &timestamp, &[record]) {
        Ok(path) => format!("Results saved to {}", path.display()),
        Err(error) => format!("Failed to save results: {error:#}"),
      },
    );
  }

  fn file_ui(&mut self, ui: &mut egui::Ui) {
    ui.label(
      "Enter the path of a microscopic image (PNG, JPG, JPEG) or drop one \
       onto the window",
    );

    ui.horizontal(|ui| {
      let response = ui.text_edit_singleline(&mut self.path);

      let submitted =
        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

      if ui.button("Classify").clicked() || submitted {
        self.open_path(ui.ctx());
      }
    });
  }

  fn samples_ui(&mut self, ui: &mut egui::Ui) {
    ui.heading("Sample Images");

    if self.samples.is_none() {
      let samples = load_samples(&self.samples_dir, SAMPLE_COUNT);

      self.thumbnails = samples
        .iter()
        .map(|sample| {
          texture(ui.ctx(), &format!("sample-{}", sample.name), &sample.image)
        })
        .collect();

      self.samples = Some(samples);
    }

    let samples = self.samples.as_deref().unwrap_or_default();

    if samples.is_empty() {
      ui.colored_label(Color32::YELLOW, "No sample images available.");
      return;
    }

    let mut chosen = None;

    ui.horizontal_wrapped(|ui| {
      for (sample, thumbnail) in samples.iter().zip(&self.thumbnails) {
        ui.vertical(|ui| {
          ui.set_width(THUMBNAIL_SIZE);

          let clicked = match thumbnail {
            Some(texture) => ui
              .add(egui::ImageButton::new((
                texture.id(),
                fit(texture.size_vec2(), THUMBNAIL_SIZE),
              )))
              .clicked(),
            None => ui.button("Choose").clicked(),
          };

          ui.small(&sample.name);

          if clicked {
            chosen = Some(sample.clone());
          }
        });
      }
    });

    if ui.button("Shuffle").clicked() {
      self.samples = None;
      self.thumbnails.clear();
    }

    if let Some(sample) = chosen {
      self.select(ui.ctx(), sample.name, sample.image);
    }
  }

  fn selection_ui(&self, ui: &mut egui::Ui) {
    let Some(selection) = &self.selection else {
      return;
    };

    ui.separator();

    ui.label(&selection.name);

    if let Some(texture) = &selection.texture {
      ui.image((texture.id(), fit(texture.size_vec2(), PREVIEW_SIZE)));
    }

    if self.show_debug {
      ui.label(format!(
        "Size: {}x{}, Color type: {:?}",
        selection.dimensions.0, selection.dimensions.1, selection.color
      ));
    }
  }

  fn record_ui(ui: &mut egui::Ui, label: &str, record: &ParasiteRecord) {
    ui.strong(label);

    egui::Grid::new("record")
      .num_columns(2)
      .striped(true)
      .show(ui, |ui| {
        for (field, value) in record.fields() {
          ui.strong(field);
          ui.label(value);
          ui.end_row();
        }
      });
  }

  /// Returns true when the user asked to save the results.
  fn outcome_ui(&self, ui: &mut egui::Ui) -> bool {
    let analysis = match &self.outcome {
      None => return false,
      Some(Err(error)) => {
        ui.colored_label(Color32::RED, error.to_string());
        return false;
      }
      Some(Ok(analysis)) => analysis,
    };

    let Some(primary) = analysis.primary() else {
      return false;
    };

    ui.colored_label(Color32::GREEN, "Analysis Complete!");

    ui.columns(2, |columns| {
      columns[0].heading("Primary Detection");
      columns[0].strong(format!(
        "{} ({:.1}%)",
        primary.label,
        primary.percent()
      ));

      columns[1].heading("Alternative Possibilities");
      for prediction in analysis.alternatives() {
        columns[1].label(format!(
          "{}: {:.1}%",
          prediction.label,
          prediction.percent()
        ));
      }
    });

    ui.heading("Parasite Information");

    match &analysis.record {
      Some(record) => Self::record_ui(ui, primary.label, record),
      None => {
        ui.colored_label(
          Color32::RED,
          "No information available for this parasite.",
        );
      }
    }

    ui.button("Save Results").clicked()
  }

  pub(crate) fn ui(&mut self, ui: &mut egui::Ui) {
    ui.heading("Parasitology Image Classifier");

    ui.horizontal(|ui| {
      ui.radio_value(&mut self.source, Source::File, "Open Image");
      ui.radio_value(&mut self.source, Source::Samples, "Sample Images");
    });

    match self.source {
      Source::File => self.file_ui(ui),
      Source::Samples => self.samples_ui(ui),
    }

    self.selection_ui(ui);

    if self.outcome_ui(ui) {
      self.save_results();
    }

    if let Some(status) = &self.status {
      ui.label(status);
    }
  }
}

fn texture(
  ctx: &egui::Context,
  name: &str,
  image: &DynamicImage,
) -> Option<TextureHandle> {
  let (width, height) = image.dimensions();

  (width > 0 && height > 0).then(|| {
    let rgba = image.to_rgba8();
    ctx.load_texture(
      name,
      ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
      ),
      TextureOptions::LINEAR,
    )
  })
}

/// Scales `size` down so its longer side is at most `max`. Never enlarges.
fn fit(size: Vec2, max: f32) -> Vec2 {
  let longest = size.x.max(size.y);

  if longest <= max {
    return size;
  }

  size * (max / longest)
}
