use super::{Quote, QuoteCorpus};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

/// Hands out quotes from a shuffled queue.
///
/// Every quote in the corpus is shown exactly once per cycle. When the queue
/// runs dry the full corpus is reshuffled into it, so repeats can only happen
/// across cycles.
pub struct QuoteRotator {
    corpus: Arc<QuoteCorpus>,
    /// Not yet shown this cycle; the next quote is popped from the end
    remaining: Vec<Quote>,
    /// Shown this cycle
    exhausted: Vec<Quote>,
    rng: StdRng,
    cycle: u64,
}

impl QuoteRotator {
    pub fn new(corpus: Arc<QuoteCorpus>) -> Self {
        Self::with_rng(corpus, StdRng::from_entropy())
    }

    /// Rotator with a reproducible order
    pub fn with_seed(corpus: Arc<QuoteCorpus>, seed: u64) -> Self {
        Self::with_rng(corpus, StdRng::seed_from_u64(seed))
    }

    fn with_rng(corpus: Arc<QuoteCorpus>, rng: StdRng) -> Self {
        let mut rotator = Self {
            corpus,
            remaining: Vec::new(),
            exhausted: Vec::new(),
            rng,
            cycle: 0,
        };
        rotator.reset_history();
        rotator
    }

    /// Next quote to show. Total: an empty corpus yields the placeholder.
    pub fn next_quote(&mut self) -> Quote {
        if self.corpus.is_empty() {
            return Quote::placeholder();
        }

        if self.remaining.is_empty() {
            debug!("All quotes seen, resetting cycle");
            self.reset_history();
        }

        match self.remaining.pop() {
            Some(quote) => {
                self.exhausted.push(quote.clone());
                debug!(
                    "Quote selected ({} / {} this cycle): {}",
                    self.exhausted.len(),
                    self.corpus.len(),
                    quote.text
                );
                quote
            }
            None => Quote::placeholder(),
        }
    }

    /// Forget what has been shown and start a new shuffled cycle
    pub fn reset_history(&mut self) {
        self.remaining = self.corpus.quotes().to_vec();
        self.remaining.shuffle(&mut self.rng);
        self.exhausted.clear();
        self.cycle += 1;
    }

    pub fn corpus(&self) -> &QuoteCorpus {
        &self.corpus
    }

    pub fn remaining_len(&self) -> usize {
        self.remaining.len()
    }

    pub fn exhausted_len(&self) -> usize {
        self.exhausted.len()
    }

    /// 1-based number of the current cycle
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn texts(rotator: &QuoteRotator) -> HashSet<String> {
        rotator
            .remaining
            .iter()
            .chain(rotator.exhausted.iter())
            .map(|q| q.text.clone())
            .collect()
    }

    #[test]
    fn test_partition_always_covers_corpus() {
        let corpus = Arc::new(QuoteCorpus::fallback());
        let all: HashSet<String> = corpus.quotes().iter().map(|q| q.text.clone()).collect();
        let mut rotator = QuoteRotator::with_seed(corpus, 7);

        for _ in 0..10 {
            assert_eq!(texts(&rotator), all);
            assert_eq!(
                rotator.remaining_len() + rotator.exhausted_len(),
                all.len(),
                "Partition must not hold duplicates"
            );
            rotator.next_quote();
        }
    }

    #[test]
    fn test_reset_history_starts_new_cycle() {
        let corpus = Arc::new(QuoteCorpus::fallback());
        let mut rotator = QuoteRotator::with_seed(corpus, 1);
        assert_eq!(rotator.cycle(), 1);

        rotator.next_quote();
        rotator.next_quote();
        assert_eq!(rotator.exhausted_len(), 2);

        rotator.reset_history();
        assert_eq!(rotator.cycle(), 2);
        assert_eq!(rotator.exhausted_len(), 0);
        assert_eq!(rotator.remaining_len(), 3);
    }
}
