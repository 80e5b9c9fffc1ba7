use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openchess::{movegen, Board, Color, Game, Piece, PieceKind, RandomSearch, RawMove, Settings};

// All the openings have an even number of plies, so White is to move
const OPENINGS: [(&str, &[&str]); 4] = [
    ("initial", &[]),
    ("open", &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6"]),
    ("queens", &["d2d4", "d7d5", "c2c4", "e7e6", "b1c3", "g8f6", "c1g5", "f8e7"]),
    ("castled", &["e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "f8c5", "e1g1", "g8f6"]),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    OPENINGS.iter().map(|&(name, moves)| {
        let mut board = Board::initial();
        for mv in moves {
            board.apply(mv.parse::<RawMove>().unwrap());
        }
        (name, board)
    })
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::all_legal_moves(&board, Color::White).len()))
        });
    }
}

fn bench_king_status(c: &mut Criterion) {
    let mut group = c.benchmark_group("king_status");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(movegen::king_status(&board, Color::White)))
        });
    }

    let mut stalemate = Board::empty();
    stalemate.put("h8".parse().unwrap(), Some(Piece::new(Color::White, PieceKind::King)));
    stalemate.put("f6".parse().unwrap(), Some(Piece::new(Color::Black, PieceKind::Knight)));
    stalemate.put("f5".parse().unwrap(), Some(Piece::new(Color::Black, PieceKind::Knight)));
    stalemate.put("h2".parse().unwrap(), Some(Piece::new(Color::Black, PieceKind::King)));
    group.bench_function("stalemate", |b| {
        b.iter(|| black_box(movegen::king_status(&stalemate, Color::White)))
    });
}

fn bench_self_play(c: &mut Criterion) {
    c.bench_function("self_play_100", |b| {
        b.iter(|| {
            let settings = Settings::self_play().with_max_plies(100);
            let mut game = Game::new(settings).with_search(RandomSearch::with_seed(1));
            game.new_game().unwrap();
            game.play_self().unwrap();
            black_box(game.plies())
        })
    });
}

criterion_group!(benches, bench_legal_moves, bench_king_status, bench_self_play);
criterion_main!(benches);
