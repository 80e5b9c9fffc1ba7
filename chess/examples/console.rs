// Console application to play chess against the computer
//
// Run with `--self-play` to watch the computer play against itself. Set `RUST_LOG=debug` to see
// what the engine does.

use openchess::{
    board::PrettyStyle, Action, Game, GameError, GreedySearch, RandomSearch, RawMove, Settings,
};
use std::env;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn self_play() {
    let mut game = Game::new(Settings::self_play()).with_search(RandomSearch::new());
    game.new_game().unwrap();
    if let Err(e) = game.play_self() {
        println!("Error: {}", e);
    }
    println!("{}", game.board().pretty(PrettyStyle::Utf8));
    if let Some(msg) = game.end_message() {
        println!("Game finished: {}", msg);
    }
    println!("Notation: {}", game.history().uci_list());
}

// Selects the piece first, then clicks on the destination
fn play_move(game: &mut Game, mv: RawMove) -> Result<Action, GameError> {
    let mut action = game.move_at(mv.src.x(), mv.src.y())?;
    if action == Action::Unselected {
        // The piece stayed selected after the previous bad move
        action = game.move_at(mv.src.x(), mv.src.y())?;
    }
    if action != Action::Selected(mv.src) {
        return Ok(Action::Rejected);
    }
    game.move_at(mv.dst.x(), mv.dst.y())
}

fn human_play() {
    let mut stdin = io::stdin().lock();
    let settings = Settings::default();
    let max_plies = settings.max_plies();
    let mut game = Game::new(settings).with_search(GreedySearch::new());
    game.new_game().unwrap();

    while !game.is_ended() {
        if game.plies() >= max_plies {
            game.end_game(format!(
                "Over {} moves were made, ending game in draw",
                max_plies
            ));
            break;
        }

        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        print!("{} move: ", game.active_player());
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            game.end_game("Quitting Game");
            break;
        }
        let s = s.trim();
        if s == "quit" {
            game.end_game("Quitting Game");
            break;
        }

        let mv: RawMove = match s.parse() {
            Ok(mv) => mv,
            Err(e) => {
                println!("Bad move: {}", e);
                println!();
                continue;
            }
        };

        match play_move(&mut game, mv) {
            Ok(Action::Moved { reply, .. }) => {
                if let Some(reply) = reply {
                    println!("Computer plays {}", reply);
                }
            }
            Ok(_) => println!("Bad move: {}", s),
            Err(GameError::IllegalAiMove(mv)) => println!("Computer failed with move {}", mv),
            Err(e) => println!("Error: {}", e),
        }
        println!();
    }

    println!("{}", game.board().pretty(PrettyStyle::Ascii));
    if let Some(msg) = game.end_message() {
        println!("Game finished: {}", msg);
    }
    println!("Notation: {}", game.history().uci_list());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if env::args().any(|a| a == "--self-play") {
        self_play();
    } else {
        human_play();
    }
}
