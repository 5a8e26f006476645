//! Throwaway names, titles and paragraphs for discussion content.

use rand::Rng;
use rand::seq::SliceRandom;

pub const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim",
    "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "commodo",
    "consequat", "duis", "aute", "irure", "reprehenderit", "voluptate", "velit", "esse", "cillum",
    "fugiat", "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "proident", "sunt",
    "culpa", "officia", "deserunt", "mollit", "anim", "laborum", "physics", "quantum", "kinetic",
    "albedo", "machine", "learning", "energy", "matter",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "John", "Katherine",
    "Leslie", "Margaret", "Niklaus", "Radia", "Shafi", "Tim",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Liskov", "Shannon", "Knuth", "Dijkstra", "Allen", "Hopper", "McCarthy",
    "Johnson", "Lamport", "Hamilton", "Wirth", "Perlman", "Goldwasser", "Berners-Lee",
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let word_count = rng.gen_range(4..=10);
    let words = (0..word_count)
        .filter_map(|_| WORDS.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{}.", capitalize(&words))
}

pub fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentence_count = rng.gen_range(3..=6);
    (0..sentence_count).map(|_| sentence(rng)).collect::<Vec<_>>().join(" ")
}

/// First two words of a fresh paragraph.
pub fn title<R: Rng + ?Sized>(rng: &mut R) -> String {
    paragraph(rng).split(' ').take(2).collect::<Vec<_>>().join(" ")
}

/// Lowercase identifier usable as a channel name.
pub fn channel_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words = paragraph(rng)
        .split(' ')
        .take(2)
        .map(|w| w.trim_end_matches('.').to_lowercase())
        .collect::<Vec<_>>()
        .join("_");
    format!("{}_{}", words, rng.gen_range(0..100_000u32))
}

pub fn name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Ada");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Lovelace");
    format!("{first} {last}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sentences_are_capitalized_and_terminated() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let s = sentence(&mut rng);
            assert!(s.ends_with('.'));
            assert!(s.chars().next().unwrap().is_uppercase());
        }
    }

    #[test]
    fn titles_have_two_words() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(title(&mut rng).split(' ').count(), 2);
    }

    #[test]
    fn channel_names_are_lowercase_identifiers() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let name = channel_name(&mut rng);
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'), "{name}");
            assert_eq!(name.split('_').count(), 3);
        }
    }
}
