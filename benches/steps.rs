use criterion::{black_box, criterion_group, criterion_main, Criterion};
use worm_engine::board::{Board, Level};
use worm_engine::screen::RecordingScreen;
use worm_engine::types::{ColorPair, GameState, Heading, Position};
use worm_engine::worm::Worm;

/// load an empty level and march a worm into the right-edge barrier
fn cross_the_board(screen: &mut RecordingScreen) -> Worm {
    let mut board = Board::initialize(screen).expect("the display fits");
    board.initialize_level(screen, &Level::default());

    let mut worm = Worm::new(20, 5, Position::new(20, 1), Heading::Right, ColorPair::UserWorm);
    worm.render(&mut board, screen);
    loop {
        let state = worm.step(&mut board, screen);
        if state != GameState::Ongoing {
            assert_eq!(state, GameState::Crash);
            return worm;
        }
        worm.render(&mut board, screen);
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("cross a 40x120 board", |b| {
        let mut screen = RecordingScreen::new(43, 120);
        b.iter(|| {
            let worm = cross_the_board(&mut screen);
            black_box(worm.head_position())
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
