use super::*;

const BUILTIN: &str = include_str!("../data/parasites.json");

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum RiskLevel {
  Low,
  Moderate,
  High,
}

impl Display for RiskLevel {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    match self {
      Self::Low => write!(f, "Low"),
      Self::Moderate => write!(f, "Moderate"),
      Self::High => write!(f, "High"),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub(crate) struct ParasiteRecord {
  pub(crate) scientific_name: String,
  pub(crate) description: String,
  #[serde(default)]
  pub(crate) health_effects: Vec<String>,
  #[serde(default)]
  pub(crate) prevalence: Vec<String>,
  pub(crate) risk_level: RiskLevel,
  pub(crate) diagnosis: String,
  #[serde(default)]
  pub(crate) prevention: Vec<String>,
}

impl ParasiteRecord {
  /// Field names paired with display values, in presentation order.
  pub(crate) fn fields(&self) -> Vec<(&'static str, String)> {
    vec![
      ("Scientific name", self.scientific_name.clone()),
      ("Description", self.description.clone()),
      ("Health effects", self.health_effects.join(", ")),
      ("Diagnosis", self.diagnosis.clone()),
      ("Prevalence", self.prevalence.join(", ")),
      ("Risk level", self.risk_level.to_string()),
      ("Prevention", self.prevention.join(", ")),
    ]
  }

  pub(crate) fn render(&self, label: &str) -> String {
    let mut output = format!("{label}\n");

    for (field, value) in self.fields() {
      output.push_str(&format!("  {field}: {value}\n"));
    }

    output
  }
}

/// Descriptive metadata keyed by label name. Read-only once loaded.
#[derive(Debug)]
pub(crate) struct ReferenceTable {
  records: HashMap<String, ParasiteRecord>,
}

impl ReferenceTable {
  pub(crate) fn builtin() -> Result<Self> {
    Self::from_json(BUILTIN).context("invalid built-in reference table")
  }

  pub(crate) fn load(path: &Path) -> Result<Self> {
    let json = fs::read_to_string(path).with_context(|| {
      format!("failed to read reference table {}", path.display())
    })?;

    Self::from_json(&json)
      .with_context(|| format!("invalid reference table {}", path.display()))
  }

  pub(crate) fn from_json(json: &str) -> Result<Self> {
    let records: HashMap<String, ParasiteRecord> = serde_json::from_str(json)?;

    for label in LABELS {
      if !records.contains_key(label) {
        debug!("No reference information for `{label}`");
      }
    }

    Ok(Self { records })
  }

  pub(crate) fn lookup(&self, label: &str) -> Result<&ParasiteRecord, Error> {
    self
      .records
      .get(label)
      .ok_or_else(|| Error::NotFound(label.into()))
  }
}
