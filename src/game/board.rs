//! Board layout — the fixed partition of 1..=90 into six 3×5 cards.
//!
//! Numbers are dealt in increasing order: three block rows of two cards
//! each; within a block row, each of the three card rows gives five
//! consecutive numbers to the left card, then five to the right card.
//!
//! ```text
//! card 0: 1-5   11-15 21-25    card 1: 6-10  16-20 26-30
//! card 2: 31-35 41-45 51-55    card 3: 36-40 46-50 56-60
//! card 4: 61-65 71-75 81-85    card 5: 66-70 76-80 86-90
//! ```

use serde::Serialize;

/// A board number, 1..=90.
pub type Number = u8;

pub const TOTAL_NUMBERS: Number = 90;
pub const COLUMNS_PER_CARD: usize = 5;
pub const ROWS_PER_CARD: usize = 3;
pub const NUMBERS_PER_CARD: usize = COLUMNS_PER_CARD * ROWS_PER_CARD;
pub const TOTAL_CARDS: usize = TOTAL_NUMBERS as usize / NUMBERS_PER_CARD;

const CARDS_PER_BLOCK: usize = 2;
const BLOCK_ROWS: usize = TOTAL_CARDS / CARDS_PER_BLOCK;

/// Whether `n` is a number on the board.
pub fn in_range(n: i64) -> bool {
    (1..=TOTAL_NUMBERS as i64).contains(&n)
}

/// One card: 15 numbers, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    numbers: Vec<Number>,
}

impl Card {
    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    /// The three rows of five numbers.
    pub fn rows(&self) -> impl Iterator<Item = &[Number]> {
        self.numbers.chunks(COLUMNS_PER_CARD)
    }

    pub fn contains(&self, n: Number) -> bool {
        self.numbers.contains(&n)
    }
}

/// The six cards, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Index of the card holding `n`.
    pub fn card_of(&self, n: Number) -> Option<usize> {
        self.cards.iter().position(|c| c.contains(n))
    }
}

/// Build the board. Deterministic; every call yields the same layout.
pub fn generate_board() -> Board {
    let mut cards: Vec<Vec<Number>> = vec![Vec::with_capacity(NUMBERS_PER_CARD); TOTAL_CARDS];
    let mut next: Number = 1;

    for block_row in 0..BLOCK_ROWS {
        for _card_row in 0..ROWS_PER_CARD {
            for card_in_block in 0..CARDS_PER_BLOCK {
                let card = &mut cards[block_row * CARDS_PER_BLOCK + card_in_block];
                for _col in 0..COLUMNS_PER_CARD {
                    card.push(next);
                    next += 1;
                }
            }
        }
    }

    Board {
        cards: cards.into_iter().map(|numbers| Card { numbers }).collect(),
    }
}
