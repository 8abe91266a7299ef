//! Example values for prompts ("'comedy' or 'science fiction'")

use moviebot_core::Item;

use crate::random::RandomSource;

/// Build a short "X or Y" string of distinct values of `slot`
///
/// Values are split on commas and trimmed. Collection stops after the first
/// result that pushes the number of distinct fragments past `limit`. Returns
/// `None` when no result carries the slot.
///
/// A single distinct value is returned verbatim. Otherwise two values are
/// sampled, preferring two-word values when at least two of them exist.
pub fn generate_examples<R: RandomSource>(
    database_result: &[Item],
    slot: &str,
    limit: usize,
    rng: &mut R,
) -> Option<String> {
    let mut examples: Vec<String> = Vec::new();

    for item in database_result {
        let Some(raw) = item.text(slot) else {
            continue;
        };
        for fragment in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !examples.iter().any(|e| e == fragment) {
                examples.push(fragment.to_string());
            }
        }
        if examples.len() > limit {
            break;
        }
    }

    if examples.is_empty() {
        return None;
    }

    rng.shuffle(&mut examples);
    if examples.len() == 1 {
        return examples.pop();
    }

    let two_word: Vec<String> = examples
        .iter()
        .filter(|e| e.split_whitespace().count() == 2)
        .cloned()
        .collect();
    let pool = if two_word.len() >= 2 { &two_word } else { &examples };

    Some(rng.sample(pool, 2).join(" or "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedOrder, StdRandom};

    fn items(slot: &str, values: &[&str]) -> Vec<Item> {
        values
            .iter()
            .map(|v| Item::from_iter([(slot, *v)]))
            .collect()
    }

    #[test]
    fn test_single_fragment_verbatim() {
        let results = items("genres", &["comedy", " comedy ", "comedy,comedy"]);
        let example = generate_examples(&results, "genres", 20, &mut StdRandom::seeded(1));
        assert_eq!(example.as_deref(), Some("comedy"));
    }

    #[test]
    fn test_no_values() {
        let results = items("genres", &["comedy"]);
        assert!(generate_examples(&results, "actors", 20, &mut FixedOrder).is_none());
        assert!(generate_examples(&[], "genres", 20, &mut FixedOrder).is_none());
    }

    #[test]
    fn test_prefers_two_word_values() {
        let results = items(
            "actors",
            &["Tom Hanks, Madonna", "Cher", "Meg Ryan, Tom Hanks"],
        );
        let example = generate_examples(&results, "actors", 20, &mut FixedOrder).unwrap();
        assert_eq!(example, "Tom Hanks or Meg Ryan");
    }

    #[test]
    fn test_falls_back_to_all_values() {
        let results = items("genres", &["drama, science fiction", "comedy"]);
        let example = generate_examples(&results, "genres", 20, &mut FixedOrder).unwrap();
        assert_eq!(example, "drama or science fiction");
    }

    #[test]
    fn test_random_pick_is_from_distinct_values() {
        let results = items("genres", &["drama, thriller", "drama, horror", "western"]);
        let allowed = ["drama", "thriller", "horror", "western"];
        for seed in 0..20 {
            let example =
                generate_examples(&results, "genres", 20, &mut StdRandom::seeded(seed)).unwrap();
            let parts: Vec<&str> = example.split(" or ").collect();
            assert_eq!(parts.len(), 2);
            assert_ne!(parts[0], parts[1]);
            assert!(parts.iter().all(|p| allowed.contains(p)));
        }
    }

    #[test]
    fn test_limit_finishes_current_result() {
        // The limit is passed inside the second result: its fragments are all
        // kept and the third result is never read.
        let results = items("keywords", &["a", "b, c", "d"]);
        for seed in 0..20 {
            let example =
                generate_examples(&results, "keywords", 1, &mut StdRandom::seeded(seed)).unwrap();
            assert!(!example.contains('d'), "unexpected example {}", example);
        }
        assert_eq!(
            generate_examples(&results, "keywords", 1, &mut FixedOrder).as_deref(),
            Some("a or b")
        );
    }

    #[test]
    fn test_numeric_values_rendered() {
        let results = vec![Item::from_iter([("year", 1994)])];
        assert_eq!(
            generate_examples(&results, "year", 20, &mut FixedOrder).as_deref(),
            Some("1994")
        );
    }
}
