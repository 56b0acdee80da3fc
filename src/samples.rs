use super::*;

pub(crate) const SAMPLE_COUNT: usize = 7;

const EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Clone, Debug)]
pub(crate) struct Sample {
  pub(crate) name: String,
  pub(crate) image: DynamicImage,
}

pub(crate) fn is_supported(path: &Path) -> bool {
  path
    .extension()
    .and_then(|extension| extension.to_str())
    .is_some_and(|extension| {
      EXTENSIONS.contains(&extension.to_ascii_lowercase().as_str())
    })
}

pub(crate) fn file_name(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}

/// Supported image files directly inside `dir`, sorted by path.
pub(crate) fn image_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let mut paths = Vec::new();

  for entry in fs::read_dir(dir)
    .with_context(|| format!("failed to read directory {}", dir.display()))?
  {
    let path = entry?.path();

    if path.is_file() && is_supported(&path) {
      paths.push(path);
    }
  }

  paths.sort();

  Ok(paths)
}

/// Up to `count` randomly chosen images from `dir`. Unreadable files are
/// skipped.
pub(crate) fn load_samples(dir: &Path, count: usize) -> Vec<Sample> {
  let paths = match image_files(dir) {
    Ok(paths) => paths,
    Err(error) => {
      error!("Error loading sample images: {error:#}");
      return Vec::new();
    }
  };

  let samples = paths
    .choose_multiple(&mut rand::thread_rng(), count)
    .filter_map(|path| match load_image(path) {
      Ok(image) => Some(Sample {
        name: file_name(path),
        image,
      }),
      Err(error) => {
        warn!("Skipping sample {}: {error}", path.display());
        None
      }
    })
    .collect::<Vec<Sample>>();

  info!("Loaded {} sample images", samples.len());

  samples
}

/// Writes `images` small PNGs plus a text file, an undecodable `broken.JPG`
/// and a directory named like an image.
#[cfg(test)]
pub(crate) fn populate(dir: &Path, images: usize) {
  use image::{Rgb, RgbImage};

  for i in 0..images {
    RgbImage::from_pixel(3, 3, Rgb([i as u8, 0, 0]))
      .save(dir.join(format!("sample_{i}.png")))
      .unwrap();
  }

  fs::write(dir.join("notes.txt"), "not an image").unwrap();
  fs::write(dir.join("broken.JPG"), "not a jpeg either").unwrap();
  fs::create_dir(dir.join("nested.png")).unwrap();
}
