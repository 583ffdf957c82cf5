use smart_2048::engine::Board;
use smart_2048::planner::Planner;

fn main() {
    let mut planner = Planner::new();
    let mut rng = rand::thread_rng();
    let mut board = Board::EMPTY
        .with_random_tile(&mut rng)
        .with_random_tile(&mut rng);
    println!("{}", board);
    let mut move_count = 0u64;
    let mut total_nodes: u64 = 0;
    let mut peak_nodes: u64 = 0;
    while !board.is_terminal() {
        let direction = planner.best_move(board);
        let (_, moved) = board.apply(direction);
        if !moved {
            break;
        }
        move_count += 1;
        board = board.make_move(direction, &mut rng);
        println!("{}", board);
        let stats = planner.last_stats();
        total_nodes = total_nodes.saturating_add(stats.nodes);
        peak_nodes = peak_nodes.max(stats.nodes);
    }
    println!(
        "Moves made: {}, Score: {}, Highest tile: {}, States considered: {}, Max states for a move: {}",
        move_count,
        board.score(),
        board.highest_tile(),
        total_nodes,
        peak_nodes
    );
}
