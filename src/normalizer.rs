use super::*;

pub(crate) const INPUT_SIZE: u32 = 224;

pub(crate) const INPUT_SHAPE: [usize; 4] =
  [1, INPUT_SIZE as usize, INPUT_SIZE as usize, 3];

/// An RGB image resized to 224x224 with channel values scaled into
/// `[0.0, 1.0]`, laid out as `(batch, height, width, channel)`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NormalizedTensor(Array4<f32>);

impl NormalizedTensor {
  pub(crate) fn shape(&self) -> &[usize] {
    self.0.shape()
  }

  pub(crate) fn len(&self) -> usize {
    self.0.len()
  }

  pub(crate) fn as_slice(&self) -> Result<&[f32], Error> {
    self
      .0
      .as_slice()
      .ok_or_else(|| Error::Inference("input tensor is not contiguous".into()))
  }

  /// Flattens the tensor into one row per batch entry.
  pub(crate) fn rows(&self) -> Result<ArrayView2<'_, f32>, Error> {
    let [batch, ..] = INPUT_SHAPE;

    ArrayView2::from_shape((batch, self.len() / batch), self.as_slice()?)
      .map_err(|error| Error::Inference(error.to_string()))
  }
}

pub(crate) fn decode(bytes: &[u8]) -> Result<DynamicImage, Error> {
  image::load_from_memory(bytes)
    .map_err(|error| Error::Normalization(error.to_string()))
}

pub(crate) fn load_image(path: &Path) -> Result<DynamicImage, Error> {
  let bytes = fs::read(path).map_err(|error| {
    Error::Normalization(format!("failed to read {}: {error}", path.display()))
  })?;

  decode(&bytes)
}

/// Converts to RGB, resizes with a Lanczos filter, then scales by 1/255.
pub(crate) fn normalize(image: &DynamicImage) -> Result<NormalizedTensor, Error> {
  let (width, height) = image.dimensions();

  if width == 0 || height == 0 {
    return Err(Error::Normalization(format!(
      "image has zero area ({width}x{height})"
    )));
  }

  let rgb = image.to_rgb8();

  let resized = image::imageops::resize(
    &rgb,
    INPUT_SIZE,
    INPUT_SIZE,
    FilterType::Lanczos3,
  );

  let values = resized
    .into_raw()
    .into_iter()
    .map(|channel| f32::from(channel) / 255.0)
    .collect();

  Array4::from_shape_vec(INPUT_SHAPE, values)
    .map(NormalizedTensor)
    .map_err(|error| Error::Normalization(error.to_string()))
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    approx::assert_relative_eq,
    image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage},
    std::io::Cursor,
  };

  fn assert_in_range(tensor: &NormalizedTensor) {
    assert!(tensor
      .as_slice()
      .unwrap()
      .iter()
      .all(|value| (0.0..=1.0).contains(value)));
  }

  #[test]
  fn shape_is_fixed_for_any_input() {
    let images = [
      DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        500,
        400,
        Rgba([200, 10, 30, 128]),
      )),
      DynamicImage::ImageLuma8(GrayImage::from_fn(3, 7, |x, y| {
        Luma([(x * 40 + y * 20) as u8])
      })),
      DynamicImage::ImageRgb8(RgbImage::from_pixel(1, 1, Rgb([255, 0, 0]))),
      DynamicImage::ImageRgb16(ImageBuffer::from_pixel(
        640,
        17,
        Rgb([65535u16, 0, 32768]),
      )),
    ];

    for image in images {
      let tensor = normalize(&image).unwrap();

      assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
      assert_in_range(&tensor);
    }
  }

  #[test]
  fn solid_color_scales_to_unit_range() {
    let image =
      DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 80, Rgb([255, 0, 51])));

    let tensor = normalize(&image).unwrap();

    for pixel in tensor.as_slice().unwrap().chunks(3) {
      assert_relative_eq!(pixel[0], 1.0, epsilon = 1.0 / 255.0);
      assert_relative_eq!(pixel[1], 0.0, epsilon = 1.0 / 255.0);
      assert_relative_eq!(pixel[2], 0.2, epsilon = 1.0 / 255.0);
    }
  }

  #[test]
  fn alpha_is_dropped() {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
      4,
      4,
      Rgba([102, 204, 51, 0]),
    ));

    let tensor = normalize(&image).unwrap();

    let pixel = &tensor.as_slice().unwrap()[..3];

    assert_relative_eq!(pixel[0], 0.4, epsilon = 1.0 / 255.0);
    assert_relative_eq!(pixel[1], 0.8, epsilon = 1.0 / 255.0);
    assert_relative_eq!(pixel[2], 0.2, epsilon = 1.0 / 255.0);
  }

  #[test]
  fn grayscale_is_replicated() {
    let image = DynamicImage::ImageLuma8(GrayImage::from_fn(30, 20, |x, _| {
      Luma([(x * 8) as u8])
    }));

    let tensor = normalize(&image).unwrap();

    for pixel in tensor.as_slice().unwrap().chunks(3) {
      assert_eq!(pixel[0], pixel[1]);
      assert_eq!(pixel[1], pixel[2]);
    }
  }

  #[test]
  fn zero_area_is_rejected() {
    let image = DynamicImage::new_rgb8(0, 10);

    assert!(matches!(normalize(&image), Err(Error::Normalization(_))));
  }

  #[test]
  fn undecodable_bytes_are_rejected() {
    assert!(matches!(
      decode(b"definitely not an image"),
      Err(Error::Normalization(_))
    ));
  }

  #[test]
  fn missing_file_is_rejected() {
    assert!(matches!(
      load_image(Path::new("does/not/exist.png")),
      Err(Error::Normalization(_))
    ));
  }

  #[test]
  fn decoded_bytes_are_deterministic() {
    let mut bytes = Vec::new();

    RgbImage::from_fn(37, 59, |x, y| Rgb([x as u8, y as u8, (x * y) as u8]))
      .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
      .unwrap();

    let first = normalize(&decode(&bytes).unwrap()).unwrap();
    let second = normalize(&decode(&bytes).unwrap()).unwrap();

    assert_eq!(first, second);
  }

  #[test]
  fn rows_flatten_the_batch() {
    let image =
      DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));

    let tensor = normalize(&image).unwrap();

    assert_eq!(tensor.rows().unwrap().dim(), (1, 224 * 224 * 3));
  }
}
