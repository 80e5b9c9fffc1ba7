use openchess::api::{Engine, Reply};
use openchess::{Board, Color, GameError, Move, MoveSearch, RawMove};

fn scripted(moves: &'static [&'static str]) -> Box<dyn MoveSearch + Send> {
    let mut idx = 0;
    Box::new(move |_: &Board, _: Color, _: Option<&Move>| {
        let mv = moves.get(idx).map(|s| s.parse::<RawMove>().unwrap());
        idx += 1;
        mv
    })
}

#[test]
fn test_fools_mate() {
    let mut engine = Engine::with_search(|| scripted(&["f2f3", "g2g4"]));
    let reply = engine.new_game(true, None, None).unwrap();
    assert_eq!(
        reply,
        Reply::Move {
            start: "F2".to_string(),
            end: "F3".to_string(),
            board: engine.game().unwrap().board().dump(),
        }
    );

    let reply = engine.make_move("E7", "E5").unwrap();
    match reply {
        Reply::Move { start, end, .. } => assert_eq!((start.as_str(), end.as_str()), ("G2", "G4")),
        Reply::Status(s) => panic!("unexpected status {}", s),
    }

    // Mate by the human, so the computer doesn't reply
    let reply = engine.make_move("d8", "h4").unwrap();
    match reply {
        Reply::Move { start, end, board } => {
            assert_eq!((start.as_str(), end.as_str()), ("D8", "H4"));
            let last_rank = board.lines().nth(4).unwrap();
            assert_eq!(last_rank, ", , , , , , P, q, ");
        }
        Reply::Status(s) => panic!("unexpected status {}", s),
    }
    let game = engine.game().unwrap();
    assert!(game.is_ended());
    assert_eq!(game.end_message(), Some("Checkmate! White player lose!"));
    assert_eq!(engine.make_move("E2", "E4"), Err(GameError::GameAlreadyEnded));
}

#[test]
fn test_board_dump() {
    let mut engine = Engine::with_search(|| scripted(&["e7e5"]));
    let reply = engine.new_game(false, Some("E2"), Some("E4")).unwrap();
    let expected = "\
r, n, b, q, k, b, n, r, \n\
p, p, p, p, , p, p, p, \n\
, , , , , , , , \n\
, , , , p, , , , \n\
, , , , P, , , , \n\
, , , , , , , , \n\
P, P, P, P, , P, P, P, \n\
R, N, B, Q, K, B, N, R, \n";
    assert_eq!(
        reply,
        Reply::Move {
            start: "E7".to_string(),
            end: "E5".to_string(),
            board: expected.to_string(),
        }
    );
}

#[test]
fn test_search_gives_up() {
    let mut engine = Engine::with_search(|| scripted(&[]));
    assert_eq!(
        engine.new_game(false, Some("e2"), Some("e4")),
        Err(GameError::NoAiMove)
    );
    let game = engine.game().unwrap();
    assert_eq!(game.plies(), 1);
    assert!(game.is_ended());
    assert_eq!(game.end_message(), Some("Computer didn't choose any move"));

    // The human cannot go on playing the computer's side
    assert_eq!(engine.make_move("E7", "E5"), Err(GameError::GameAlreadyEnded));
    assert_eq!(engine.game().unwrap().history().uci_list().to_string(), "e2e4");
}

#[test]
fn test_restart() {
    let mut engine = Engine::with_search(|| scripted(&["e7e5"]));
    engine.new_game(false, Some("E2"), Some("E4")).unwrap();
    engine.quit().unwrap();
    assert!(engine.game().unwrap().is_ended());

    engine.new_game(false, Some("D2"), Some("D4")).unwrap();
    let game = engine.game().unwrap();
    assert!(!game.is_ended());
    assert_eq!(game.history().uci_list().to_string(), "d2d4 e7e5");
}
