//! Random search parameters for simulated learners.

use std::collections::BTreeSet;

use common::search_query::{OfferedByType, PriceType, QueryParams, ResourceType};
use rand::Rng;
use rand::seq::SliceRandom;

/// Texts picked by the learn search scenario. The empty text searches all items.
pub const LEARN_TEXTS: [&str; 5] = ["", "\"Quantum Mechanics\"", "\"Machine Learning\"", "Albedo", "Kinetic"];

/// Picks between `min` and `max` (inclusive) distinct values.
fn sample_set<T: Copy + Ord, R: Rng + ?Sized>(rng: &mut R, values: &[T], min: usize, max: usize) -> BTreeSet<T> {
    let amount = rng.gen_range(min..=max);
    values.choose_multiple(rng, amount).copied().collect()
}

/// Some combinations return no results because the facets don't make sense
/// together; those searches just end after their first page.
pub fn sample_learn_params<R: Rng + ?Sized>(rng: &mut R) -> QueryParams {
    let text = LEARN_TEXTS.choose(rng).copied().unwrap_or_default();
    QueryParams {
        text: text.to_string(),
        types: sample_set(rng, &ResourceType::ALL, 1, ResourceType::ALL.len()),
        offered_by: sample_set(rng, &OfferedByType::ALL, 0, OfferedByType::ALL.len()),
        price: sample_set(rng, &PriceType::ALL, 0, 1),
    }
}

/// Free OCW searches for one to four dictionary words.
pub fn sample_ocw_params<R: Rng + ?Sized>(rng: &mut R, words: &[String]) -> QueryParams {
    let word_count = rng.gen_range(1..=4);
    let text = (0..word_count)
        .filter_map(|_| words.choose(rng).map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    QueryParams {
        text,
        types: sample_set(rng, &ResourceType::ALL, 1, ResourceType::ALL.len()),
        offered_by: BTreeSet::from([OfferedByType::Ocw]),
        price: BTreeSet::from([PriceType::Free]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn learn_params_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let params = sample_learn_params(&mut rng);
            assert!(LEARN_TEXTS.contains(&params.text.as_str()));
            assert!(!params.types.is_empty());
            assert!(params.offered_by.len() <= OfferedByType::ALL.len());
            assert!(params.price.len() <= 1);
        }
    }

    #[test]
    fn learn_params_cover_every_text() {
        let mut rng = StdRng::seed_from_u64(11);
        let texts = (0..500).map(|_| sample_learn_params(&mut rng).text).collect::<BTreeSet<_>>();
        assert_eq!(texts.len(), LEARN_TEXTS.len());
    }

    #[test]
    fn ocw_params_are_free_ocw_word_searches() {
        let words = ["albedo", "kinetic", "quark"].map(String::from);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let params = sample_ocw_params(&mut rng, &words);
            let count = params.text.split(' ').count();
            assert!((1..=4).contains(&count), "{}", params.text);
            assert!(params.text.split(' ').all(|w| words.iter().any(|x| x == w)));
            assert_eq!(params.offered_by, BTreeSet::from([OfferedByType::Ocw]));
            assert_eq!(params.price, BTreeSet::from([PriceType::Free]));
            assert!(!params.types.is_empty());
        }
    }

    #[test]
    fn ocw_params_with_no_words_search_everything() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = sample_ocw_params(&mut rng, &[]);
        assert_eq!(params.text, "");
    }
}
