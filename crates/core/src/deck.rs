//! Deck construction.
//!
//! A deck holds the first `pair_count` symbols of the alphabet, each twice,
//! in uniformly random order. Card ids are the dealt positions.

use arrayvec::ArrayVec;

use crate::card::Card;
use crate::rng::DeckRng;
use crate::types::{Difficulty, Symbol, ALPHABET_LEN};

/// Deal a fresh face-down deck for `difficulty`.
pub fn build_deck(difficulty: Difficulty, rng: &mut DeckRng) -> Vec<Card> {
    let mut cards = Vec::with_capacity(difficulty.card_count());
    build_deck_into(difficulty, rng, &mut cards);
    cards
}

/// Deal into an existing buffer, reusing its allocation.
pub fn build_deck_into(difficulty: Difficulty, rng: &mut DeckRng, out: &mut Vec<Card>) {
    let mut symbols: ArrayVec<Symbol, { ALPHABET_LEN * 2 }> = ArrayVec::new();
    for symbol in Symbol::first(difficulty.pair_count()) {
        symbols.push(symbol);
        symbols.push(symbol);
    }
    rng.shuffle(&mut symbols);

    out.clear();
    out.extend(
        symbols
            .iter()
            .enumerate()
            .map(|(id, &symbol)| Card::new(id, symbol)),
    );
}
