use {super::*, std::cmp::Ordering};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Prediction {
  pub(crate) index: usize,
  pub(crate) label: &'static str,
  pub(crate) confidence: f32,
}

impl Prediction {
  pub(crate) fn percent(&self) -> f32 {
    self.confidence * 100.0
  }
}

/// Orders scores descending, breaking ties by ascending index. NaN sorts last.
fn rank(a: (usize, f32), b: (usize, f32)) -> Ordering {
  let key = |score: f32| if score.is_nan() { f32::NEG_INFINITY } else { score };

  key(b.1)
    .partial_cmp(&key(a.1))
    .unwrap_or(Ordering::Equal)
    .then_with(|| a.0.cmp(&b.0))
}

/// The `k` most confident labels. `k` is clamped into `1..=scores.len()`.
pub(crate) fn top_k(scores: &ConfidenceVector, k: usize) -> Vec<Prediction> {
  let scores = scores.scores();

  let k = k.clamp(1, scores.len().max(1));

  let mut ranked = scores.iter().copied().enumerate().collect::<Vec<_>>();

  ranked.sort_by(|&a, &b| rank(a, b));

  ranked
    .into_iter()
    .filter_map(|(index, confidence)| {
      label_name(index).map(|label| Prediction {
        index,
        label,
        confidence,
      })
    })
    .take(k)
    .collect()
}

#[cfg(test)]
mod tests {
  use {super::*, std::collections::HashSet};

  fn scores(values: &[(usize, f32)]) -> ConfidenceVector {
    let mut scores = vec![0.0; LABELS.len()];

    for &(index, value) in values {
      scores[index] = value;
    }

    ConfidenceVector::new(scores).unwrap()
  }

  #[test]
  fn descending_order() {
    let ranked = top_k(&scores(&[(3, 0.2), (7, 0.5), (11, 0.3)]), 3);

    assert_eq!(
      ranked.iter().map(|p| p.label).collect::<Vec<_>>(),
      vec!["Hymenolepis diminuta", "Paragonimus spp", "Enterobius v"]
    );

    assert_eq!(
      ranked.iter().map(|p| p.confidence).collect::<Vec<_>>(),
      vec![0.5, 0.3, 0.2]
    );
  }

  #[test]
  fn ties_keep_index_order() {
    let ranked = top_k(&scores(&[(0, 0.5), (1, 0.5), (2, 0.1)]), 2);

    assert_eq!(ranked[0].index, 0);
    assert_eq!(ranked[1].index, 1);

    let ranked = top_k(&scores(&[]), 15);

    assert_eq!(
      ranked.iter().map(|p| p.index).collect::<Vec<_>>(),
      (0..15).collect::<Vec<_>>()
    );
  }

  #[test]
  fn k_is_clamped() {
    let vector = scores(&[(5, 0.9)]);

    let ranked = top_k(&vector, 0);

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].label, "Fasciolopsis buski");

    assert_eq!(top_k(&vector, 100).len(), 15);
  }

  #[test]
  fn results_are_distinct_sorted_labels() {
    let vector = ConfidenceVector::new(
      (0..15).map(|i| ((i * 7) % 15) as f32 / 15.0).collect(),
    )
    .unwrap();

    for k in 1..=15 {
      let ranked = top_k(&vector, k);

      assert_eq!(ranked.len(), k);

      assert!(ranked
        .windows(2)
        .all(|pair| pair[0].confidence >= pair[1].confidence));

      let labels = ranked.iter().map(|p| p.label).collect::<HashSet<_>>();

      assert_eq!(labels.len(), k);
      assert!(labels.iter().all(|label| LABELS.contains(label)));
    }
  }

  #[test]
  fn nan_ranks_last() {
    assert_eq!(rank((0, f32::NAN), (1, 0.0)), Ordering::Greater);
    assert_eq!(rank((1, 0.0), (0, f32::NAN)), Ordering::Less);
  }

  #[test]
  fn percent() {
    let ranked = top_k(&scores(&[(14, 0.25)]), 1);

    assert_eq!(ranked[0].percent(), 25.0);
  }
}
