//! Property tests for turn rotation, steal ordering and game progress.

use std::time::Duration;

use proptest::prelude::*;
use trivia_board::core::{Board, GameConfig, GameData, Question, TeamId, TurnManager};
use trivia_board::machine::{Command, QuestionState};
use trivia_board::persistence::MemoryStore;
use trivia_board::session::GameSession;
use trivia_board::steal::StealQueue;
use trivia_board::timer::CountdownTimer;

/// What a player does whenever the machine is waiting on them.
#[derive(Clone, Copy, Debug)]
enum Move {
    Answer(usize),
    Steal,
    Wait,
}

fn moves() -> impl Strategy<Value = Move> {
    prop_oneof![
        (0usize..5).prop_map(Move::Answer),
        Just(Move::Steal),
        Just(Move::Wait),
    ]
}

fn board(categories: usize, per_category: usize) -> Board {
    let columns = (0..categories)
        .map(|c| {
            (0..per_category)
                .map(|q| {
                    Question::new(
                        format!("Cat {c}"),
                        (q as u32 + 1) * 100,
                        "Q?",
                        ["a".into(), "b".into(), "c".into(), "d".into()],
                        q % 4,
                    )
                })
                .collect()
        })
        .collect();
    Board::new(columns)
}

proptest! {
    /// Property: the steal queue holds every other team exactly once,
    /// starting right after the current team.
    #[test]
    fn prop_steal_queue_covers_other_teams(team_count in 1usize..12, offset in 0usize..12) {
        let current = TeamId::new(offset % team_count);
        let queue = StealQueue::build(current, team_count).to_vec();

        prop_assert_eq!(queue.len(), team_count - 1);
        prop_assert!(!queue.contains(&current));
        for (step, team) in queue.iter().enumerate() {
            prop_assert_eq!(team.index(), (current.index() + step + 1) % team_count);
        }
    }

    /// Property: advancing the turn `n` times lands on `n mod team_count`.
    #[test]
    fn prop_turn_rotation_wraps(team_count in 1usize..10, turns in 0usize..50) {
        let mut manager = TurnManager::new(team_count);
        for _ in 0..turns {
            let next = manager.advance();
            prop_assert!(next.index() < team_count);
        }
        prop_assert_eq!(manager.current().index(), turns % team_count);
    }

    /// Property: whatever the players do, the answered counter matches the
    /// answered flags, scores only come from played questions and the turn
    /// moves exactly once per resolved question.
    #[test]
    fn prop_answered_count_tracks_board(
        team_count in 1usize..5,
        categories in 1usize..4,
        per_category in 1usize..4,
        script in prop::collection::vec(moves(), 0..120),
    ) {
        let names = (0..team_count).map(|i| format!("T{i}")).collect();
        let data = GameData::new(names, board(categories, per_category)).unwrap();
        let config = GameConfig::default().with_settle_delay(Duration::ZERO);
        let mut game = GameSession::new(config, data, CountdownTimer::new(), MemoryStore::new());

        let mut script = script.into_iter();
        let mut resolved = 0usize;
        'board: for c in 0..categories {
            for q in 0..per_category {
                game.handle(Command::SelectQuestion { category: c, question: q });
                while game.state() != QuestionState::Idle {
                    let Some(step) = script.next() else { break 'board };
                    match step {
                        Move::Answer(option) => { game.handle(Command::SubmitAnswer(option)); }
                        Move::Steal => { game.handle(Command::RequestSteal); }
                        Move::Wait => { game.advance_clock(Duration::from_secs(45)); }
                    }
                }
                resolved += 1;
                prop_assert_eq!(game.data().current_team().index(), resolved % team_count);
            }
        }

        let data = game.data();
        prop_assert_eq!(data.questions_answered_count(), data.board().answered_questions());
        prop_assert!(data.questions_answered_count() <= data.total_questions());

        let earned: u32 = data.teams().values().map(|t| t.score).sum();
        let available: u32 = data
            .board()
            .categories()
            .iter()
            .flatten()
            .filter(|q| q.answered)
            .map(|q| q.points)
            .sum();
        prop_assert!(earned <= available);
        prop_assert_eq!(data.is_game_complete(), resolved == categories * per_category);
    }
}
