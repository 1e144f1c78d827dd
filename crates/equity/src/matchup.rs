// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand vs hand matchup scoring.
use std::thread;

use headsup_cards::CardSet;
use headsup_eval::HandValue;

use crate::{
    Error, Result,
    boards::{self, Boards},
    hand::{Board, Hand},
    outcome::{HandTotals, Outcome},
};

/// Two hands heads up with the known board and dead cards.
#[derive(Debug, Clone, Copy)]
pub struct Matchup {
    hands: [Hand; 2],
    board: Board,
    dead: CardSet,
}

impl Matchup {
    /// Creates a matchup.
    ///
    /// Fails with [Error::CardConflict] if a card is in more than one of the
    /// hands, board, and extra dead cards.
    pub fn new(first: Hand, second: Hand, board: Board, extra_dead: CardSet) -> Result<Self> {
        let mut dead = CardSet::EMPTY;
        for cards in [first.set(), second.set(), board.cards(), extra_dead] {
            if let Some(card) = (dead & cards).first() {
                return Err(Error::CardConflict(card));
            }

            dead |= cards;
        }

        Ok(Self {
            hands: [first, second],
            board,
            dead,
        })
    }

    /// The matchup hands.
    pub fn hands(&self) -> [Hand; 2] {
        self.hands
    }

    /// The known board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// All the cards that cannot be dealt on the board.
    pub fn dead(&self) -> CardSet {
        self.dead
    }

    /// Returns an iterator over the boards completions.
    pub fn boards(&self) -> Result<Boards> {
        boards::enumerate(self.dead, self.board.missing())
    }

    /// Scores all the boards completions.
    pub fn score(&self) -> Result<Outcome> {
        let boards = self.boards()?;
        let expected = boards.len() as u64;

        let outcome = self.score_boards(boards);
        debug_assert_eq!(outcome.total(), expected);

        Ok(outcome)
    }

    /// Scores all the boards completions using `num_tasks` parallel tasks.
    ///
    /// Panics if num_tasks is 0.
    pub fn par_score(&self, num_tasks: usize) -> Result<Outcome> {
        assert!(num_tasks > 0);

        let shards = self.boards()?.split(num_tasks);

        // Each task writes its own slot to avoid contention.
        let mut outcomes = vec![Outcome::default(); shards.len()];
        thread::scope(|s| {
            for (boards, outcome) in shards.into_iter().zip(outcomes.iter_mut()) {
                s.spawn(move || {
                    *outcome = self.score_boards(boards);
                });
            }
        });

        Ok(outcomes.into_iter().sum())
    }

    /// Scores all the boards completions and counts the hand categories each
    /// player makes.
    pub fn score_with_totals(&self) -> Result<(Outcome, [HandTotals; 2])> {
        Ok(self.totals_boards(self.boards()?))
    }

    /// Same as [Matchup::score_with_totals] using `num_tasks` parallel tasks.
    ///
    /// Panics if num_tasks is 0.
    pub fn par_score_with_totals(&self, num_tasks: usize) -> Result<(Outcome, [HandTotals; 2])> {
        assert!(num_tasks > 0);

        let shards = self.boards()?.split(num_tasks);

        let mut results = vec![(Outcome::default(), [HandTotals::default(); 2]); shards.len()];
        thread::scope(|s| {
            for (boards, result) in shards.into_iter().zip(results.iter_mut()) {
                s.spawn(move || {
                    *result = self.totals_boards(boards);
                });
            }
        });

        let mut outcome = Outcome::default();
        let mut totals = [HandTotals::default(); 2];
        for (o, [first, second]) in results {
            outcome += o;
            totals[0] += first;
            totals[1] += second;
        }

        Ok((outcome, totals))
    }

    fn totals_boards(&self, boards: Boards) -> (Outcome, [HandTotals; 2]) {
        let mut outcome = Outcome::default();
        let mut totals = [HandTotals::default(); 2];

        self.showdown(boards, |first, second| {
            outcome.record(first, second);
            totals[0].record(first);
            totals[1].record(second);
        });

        (outcome, totals)
    }

    fn score_boards(&self, boards: Boards) -> Outcome {
        let mut outcome = Outcome::default();
        self.showdown(boards, |first, second| outcome.record(first, second));
        outcome
    }

    /// Evaluates both hands on each board.
    #[inline]
    fn showdown<F>(&self, boards: Boards, mut f: F)
    where
        F: FnMut(HandValue, HandValue),
    {
        let first = self.hands[0].set() | self.board.cards();
        let second = self.hands[1].set() | self.board.cards();

        for completion in boards {
            let first_value = HandValue::eval_set(first | completion);
            let second_value = HandValue::eval_set(second | completion);
            f(first_value, second_value);
        }
    }
}

/// Scores the first hand against the second on all the board completions.
///
/// The hands, board, and extra dead cards must not share any card.
pub fn score(first: Hand, second: Hand, board: Board, extra_dead: CardSet) -> Result<Outcome> {
    Matchup::new(first, second, board, extra_dead)?.score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use headsup_cards::{Card, Deck, Rank, Suit};
    use headsup_eval::HandRank;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn dead(s: &str) -> CardSet {
        s.parse().unwrap()
    }

    fn outcome(wins: u64, losses: u64, ties: u64) -> Outcome {
        Outcome { wins, losses, ties }
    }

    #[test]
    fn aces_vs_kings() {
        let res = score(hand("AcAd"), hand("KcKd"), Board::default(), CardSet::EMPTY).unwrap();
        assert_eq!(res.total(), 1_712_304);
        assert_eq!(res, outcome(1_410_336, 292_660, 9_308));

        let equity = res.equity().unwrap();
        assert!((equity - 82.4).abs() < 0.5, "{equity}");
        assert!((res.flip().equity().unwrap() - 17.6).abs() < 0.5);
    }

    #[test]
    fn deuces_split() {
        let res = score(hand("2c2d"), hand("2h2s"), Board::default(), CardSet::EMPTY).unwrap();
        assert_eq!(res.total(), 1_712_304);
        assert_eq!(res, outcome(35_668, 35_668, 1_640_968));
        assert_eq!(res.equity(), Ok(50.0));
    }

    #[test]
    fn board_totals() {
        let (a, b) = (hand("AhKh"), hand("QsQd"));

        for (cards, total) in [
            ("Th7h2c", 990),
            ("Th7h2c9s", 44),
            ("Th7h2c9s3h", 1),
        ] {
            let board = board(cards);
            let res = score(a, b, board, CardSet::EMPTY).unwrap();
            assert_eq!(res.total(), total);
            assert_eq!(res.total() as usize, boards::nck(48 - board.len(), board.missing()));
        }
    }

    #[test]
    fn known_flop_outcomes() {
        let cases = [
            ("AhKh", "QsQd", "Th7h2c", "", outcome(539, 451, 0)),
            ("AhKh", "QsQd", "Th7h2c9s", "", outcome(15, 29, 0)),
            ("AhKh", "QsQd", "Th7h2c", "Jh5h", outcome(452, 451, 0)),
            ("5c4c", "5d4d", "3h2s9c", "", outcome(45, 0, 945)),
            ("6c7d", "Ah5s", "2h3s4c", "", outcome(129, 861, 0)),
            ("KcQc", "JsTd", "Ac2d9h", "", outcome(758, 224, 8)),
        ];

        for (a, b, cards, extra, expected) in cases {
            let res = score(hand(a), hand(b), board(cards), dead(extra)).unwrap();
            assert_eq!(res, expected, "{a} vs {b} on {cards}");
        }
    }

    #[test]
    fn river_single_board() {
        let res = score(hand("AhKh"), hand("QsQd"), board("Th7h2c9s3h"), CardSet::EMPTY).unwrap();
        assert_eq!(res, outcome(1, 0, 0));
        assert_eq!(res.equity(), Ok(100.0));
    }

    #[test]
    fn equities_add_to_100() {
        let mut rng = rand::rng();

        for _ in 0..20 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let mut deal = || deck.deal().unwrap();
            let a = Hand::new(deal(), deal()).unwrap();
            let b = Hand::new(deal(), deal()).unwrap();
            let flop = Board::from_cards(&[deal(), deal(), deal()]).unwrap();

            let ab = score(a, b, flop, CardSet::EMPTY).unwrap();
            let ba = score(b, a, flop, CardSet::EMPTY).unwrap();
            assert_eq!(ab.total(), 990);
            assert_eq!(ab, ba.flip());

            let sum = ab.equity().unwrap() + ba.equity().unwrap();
            assert!((sum - 100.0).abs() < 1e-9, "{a} vs {b} on {flop}: {sum}");
        }
    }

    #[test]
    fn suit_isomorphism() {
        // Swap hearts and spades on every card.
        let swap = |s: &str| {
            Card::parse_many(s)
                .unwrap()
                .into_iter()
                .map(|c| {
                    let suit = match c.suit() {
                        Suit::Hearts => Suit::Spades,
                        Suit::Spades => Suit::Hearts,
                        suit => suit,
                    };
                    Card::new(c.rank(), suit).to_string()
                })
                .collect::<String>()
        };

        for (a, b, cards) in [
            ("AhKh", "QsQd", "Th7h2c"),
            ("AhKh", "7c2d", "9h8s3h"),
            ("Js9s", "AhQc", "Ts8h2s"),
        ] {
            let res = score(hand(a), hand(b), board(cards), CardSet::EMPTY).unwrap();
            let iso = score(
                hand(&swap(a)),
                hand(&swap(b)),
                board(&swap(cards)),
                CardSet::EMPTY,
            )
            .unwrap();

            assert_eq!(res, iso, "{a} vs {b} on {cards}");
        }
    }

    #[test]
    fn card_conflicts() {
        let ah = Card::new(Rank::Ace, Suit::Hearts);

        let res = score(hand("AhKh"), hand("AhQs"), Board::default(), CardSet::EMPTY);
        assert_eq!(res, Err(Error::CardConflict(ah)));

        let res = score(hand("AhKh"), hand("QsQd"), board("Ah7h2c"), CardSet::EMPTY);
        assert_eq!(res, Err(Error::CardConflict(ah)));

        let res = score(hand("AhKh"), hand("QsQd"), board("Th7h2c"), dead("2c"));
        assert_eq!(res, Err(Error::CardConflict("2c".parse().unwrap())));
    }

    #[test]
    fn exhausted_deck() {
        // Leave a single live card for a turn.
        let a = hand("AhKh");
        let b = hand("QsQd");
        let flop = board("Th7h2c");
        let extra = CardSet::FULL - (a.set() | b.set() | flop.cards() | dead("3c"));

        let res = score(a, b, flop, extra);
        assert_eq!(res, Err(Error::ExhaustedDeck { need: 2, live: 1 }));
    }

    #[test]
    fn parallel_score() {
        let matchup = Matchup::new(
            hand("AhKh"),
            hand("QsQd"),
            board("Th7h2c"),
            CardSet::EMPTY,
        )
        .unwrap();

        let expected = matchup.score().unwrap();
        for num_tasks in [1, 2, 3, 8, 64] {
            assert_eq!(matchup.par_score(num_tasks).unwrap(), expected);
        }
    }

    #[test]
    fn totals_per_player() {
        let matchup = Matchup::new(
            hand("AhKh"),
            hand("QsQd"),
            board("Th7h2c"),
            CardSet::EMPTY,
        )
        .unwrap();

        let (outcome, [first, second]) = matchup.score_with_totals().unwrap();
        assert_eq!(outcome, matchup.score().unwrap());
        assert_eq!(first.total(), 990);
        assert_eq!(second.total(), 990);

        // Queens always have at least a pair, AK has no pair on some boards.
        assert_eq!(second.count(HandRank::HighCard), 0);
        assert!(first.count(HandRank::HighCard) > 0);
        assert!(first.count(HandRank::Flush) > 0);

        for num_tasks in [1, 3, 16] {
            let res = matchup.par_score_with_totals(num_tasks).unwrap();
            assert_eq!(res, (outcome, [first, second]));
        }
    }
}
