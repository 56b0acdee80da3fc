/// Class names in model output order. Index `i` names the `i`th score.
pub(crate) const LABELS: [&str; 15] = [
  "Ascariasis",
  "Babesia",
  "Capillaria p",
  "Enterobius v",
  "Epidermophyton floccosum",
  "Fasciolopsis buski",
  "Hookworm egg",
  "Hymenolepis diminuta",
  "Hymenolepis nana",
  "Leishmania",
  "Opisthorchis viverrine",
  "Paragonimus spp",
  "T. rubrum",
  "Taenia spp",
  "Trichuris trichiura",
];

pub(crate) fn label_name(index: usize) -> Option<&'static str> {
  LABELS.get(index).copied()
}

pub(crate) fn label_index(name: &str) -> Option<usize> {
  LABELS.iter().position(|label| *label == name)
}

#[cfg(test)]
mod tests {
  use {super::*, std::collections::HashSet};

  #[test]
  fn fixed_positions() {
    assert_eq!(label_name(0), Some("Ascariasis"));
    assert_eq!(label_name(12), Some("T. rubrum"));
    assert_eq!(label_name(14), Some("Trichuris trichiura"));
    assert_eq!(label_name(15), None);
  }

  #[test]
  fn names_and_indices_are_a_bijection() {
    let names = LABELS.iter().collect::<HashSet<_>>();

    assert_eq!(names.len(), LABELS.len());

    for (index, name) in LABELS.iter().enumerate() {
      assert!(!name.is_empty());
      assert_eq!(label_index(name), Some(index));
      assert_eq!(label_name(index), Some(*name));
    }
  }

  #[test]
  fn unknown_name() {
    assert_eq!(label_index("Giardia"), None);
    assert_eq!(label_index("ascariasis"), None);
  }
}
