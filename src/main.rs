use {
  crate::{
    arguments::Arguments,
    classifier::{load_classifier, Classifier, ConfidenceVector},
    config::*,
    error::Error,
    export::ExportRecord,
    interface::Interface,
    label::*,
    math::*,
    model::Model,
    network::Network,
    normalizer::*,
    pipeline::{Analysis, Pipeline},
    ranker::*,
    reference::*,
    samples::*,
    settings::Settings,
    subcommand::Subcommand,
  },
  anyhow::{anyhow, bail, Context},
  clap::Parser,
  eframe::{
    egui::{self, Color32, ColorImage, TextureHandle, TextureOptions, Vec2},
    HardwareAcceleration, NativeOptions,
  },
  image::{imageops::FilterType, ColorType, DynamicImage, GenericImageView},
  indicatif::{ProgressBar, ProgressStyle},
  ndarray::{Array1, Array2, Array4, ArrayView1, ArrayView2, Axis},
  rand::seq::SliceRandom,
  rayon::prelude::*,
  serde::{Deserialize, Serialize},
  std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
    fs::{self, File},
    path::{Path, PathBuf},
    process,
    sync::{Arc, OnceLock},
  },
  tracing::{debug, error, info, warn},
};

mod arguments;
mod classifier;
mod config;
mod error;
mod export;
mod interface;
mod label;
mod math;
mod model;
mod network;
mod normalizer;
mod onnx;
mod pipeline;
mod ranker;
mod reference;
mod samples;
mod settings;
mod subcommand;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
  if let Err(error) = Arguments::parse().run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}
