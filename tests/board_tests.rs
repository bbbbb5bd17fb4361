use battleship_setup::{
    BoardError, BoardState, Cell, GridSize, Orientation, SetupProgress, ShipId, FLEET, NUM_SHIPS,
    TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

const G: GridSize = GridSize::STANDARD;

/// One ship per row, all anchored in column 0.
fn full_board() -> BoardState {
    let mut board = BoardState::new();
    for (row, class) in FLEET.iter().enumerate() {
        board
            .place(class.id(), Cell::new(row, 0), Orientation::Horizontal, G)
            .unwrap();
    }
    board
}

#[test]
fn remove_by_any_cell_vacates_whole_ship() {
    let mut board = BoardState::new();
    board
        .place(ShipId(1), Cell::new(2, 2), Orientation::Horizontal, G)
        .unwrap();
    let removed = board.remove(Cell::new(2, 4)).unwrap();
    assert_eq!(removed.id(), ShipId(1));
    assert!(board.is_empty());
    for c in 2..=6 {
        assert!(board.occupant_at(Cell::new(2, c)).is_none());
    }
    assert_eq!(board, BoardState::new());
}

#[test]
fn remove_on_empty_cell_is_noop() {
    let mut board = BoardState::new();
    board
        .place(ShipId(4), Cell::new(0, 0), Orientation::Vertical, G)
        .unwrap();
    let before = board.clone();
    assert!(board.remove(Cell::new(0, 1)).is_none());
    assert!(board.remove(Cell::new(9, 9)).is_none());
    assert_eq!(board, before);
}

#[test]
fn duplicate_placement_is_rejected() {
    let mut board = BoardState::new();
    board
        .place(ShipId(3), Cell::new(0, 0), Orientation::Horizontal, G)
        .unwrap();
    let before = board.clone();
    assert_eq!(
        board
            .place(ShipId(3), Cell::new(5, 5), Orientation::Vertical, G)
            .unwrap_err(),
        BoardError::ShipAlreadyPlaced(ShipId(3))
    );
    assert_eq!(board, before);

    // after removal the ship can go elsewhere
    board.remove(Cell::new(0, 1)).unwrap();
    board
        .place(ShipId(3), Cell::new(5, 5), Orientation::Vertical, G)
        .unwrap();
    assert_eq!(board.get(ShipId(3)).unwrap().anchor(), Cell::new(5, 5));
}

#[test]
fn unknown_ship_is_rejected() {
    let mut board = BoardState::new();
    assert_eq!(
        board
            .place(ShipId(6), Cell::new(0, 0), Orientation::Horizontal, G)
            .unwrap_err(),
        BoardError::UnknownShip(ShipId(6))
    );
}

#[test]
fn occupant_lookup_ignores_orientation() {
    let mut board = BoardState::new();
    board
        .place(ShipId(2), Cell::new(1, 7), Orientation::Vertical, G)
        .unwrap();
    for r in 1..=4 {
        let ship = board.occupant_at(Cell::new(r, 7)).unwrap();
        assert_eq!(ship.name(), "Battleship");
        assert_eq!(ship.orientation(), Orientation::Vertical);
    }
    assert!(board.occupant_at(Cell::new(5, 7)).is_none());
}

#[test]
fn progress_walks_through_setup() {
    let mut board = BoardState::new();
    assert_eq!(board.progress(), SetupProgress::Empty);
    board
        .place(ShipId(5), Cell::new(9, 0), Orientation::Horizontal, G)
        .unwrap();
    assert_eq!(board.progress(), SetupProgress::PartiallyPlaced);
    assert!(!board.is_complete());

    let board = full_board();
    assert!(board.is_complete());
    assert_eq!(board.progress(), SetupProgress::Complete);
    assert_eq!(board.len(), NUM_SHIPS);
    let cells: usize = board.ships().map(|s| s.cells().len()).sum();
    assert_eq!(cells, TOTAL_SHIP_CELLS);
}

#[test]
fn removing_from_complete_board_goes_back_to_partial() {
    let mut board = full_board();
    board.remove(Cell::new(0, 0)).unwrap();
    assert!(!board.is_complete());
    assert_eq!(board.progress(), SetupProgress::PartiallyPlaced);
    let available: Vec<&str> = board.available_ships().map(|s| s.name()).collect();
    assert_eq!(available, ["Carrier"]);
}

#[test]
fn available_ships_follow_catalog_order() {
    let mut board = BoardState::new();
    board
        .place(ShipId(2), Cell::new(0, 0), Orientation::Horizontal, G)
        .unwrap();
    board
        .place(ShipId(4), Cell::new(1, 0), Orientation::Horizontal, G)
        .unwrap();
    let ids: Vec<ShipId> = board.available_ships().map(|s| s.id()).collect();
    assert_eq!(ids, [ShipId(1), ShipId(3), ShipId(5)]);
}

#[test]
fn shrinking_grid_evicts_only_ships_outside() {
    let mut board = BoardState::new();
    board
        .place(ShipId(1), Cell::new(0, 0), Orientation::Horizontal, GridSize::LARGE)
        .unwrap();
    board
        .place(ShipId(2), Cell::new(11, 0), Orientation::Horizontal, GridSize::LARGE)
        .unwrap();
    board
        .place(ShipId(5), Cell::new(3, 9), Orientation::Vertical, GridSize::LARGE)
        .unwrap();

    let evicted = board.retain_within(GridSize::SMALL);
    let mut ids: Vec<ShipId> = evicted.iter().map(|s| s.id()).collect();
    ids.sort();
    assert_eq!(ids, [ShipId(2), ShipId(5)]);
    assert!(board.contains(ShipId(1)));
    assert!(board.occupant_at(Cell::new(11, 0)).is_none());
    assert!(board.retain_within(GridSize::SMALL).is_empty());
}

#[test]
fn random_fill_completes_every_grid_size() {
    for (seed, grid) in [(1, GridSize::SMALL), (2, GridSize::STANDARD), (3, GridSize::LARGE)] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = BoardState::new();
        board
            .place(ShipId(1), Cell::new(0, 0), Orientation::Horizontal, grid)
            .unwrap();
        let placed = board.place_remaining_randomly(&mut rng, grid).unwrap();
        assert_eq!(placed, NUM_SHIPS - 1);
        assert!(board.is_complete());
        assert!(board.ships().all(|s| s.fits(grid)));
        assert_eq!(board.get(ShipId(1)).unwrap().anchor(), Cell::new(0, 0));
    }
}

#[test]
fn random_placement_is_reproducible() {
    let mut rng1 = SmallRng::seed_from_u64(42);
    let mut rng2 = SmallRng::seed_from_u64(42);
    let mut board1 = BoardState::new();
    let mut board2 = BoardState::new();
    board1.place_remaining_randomly(&mut rng1, G).unwrap();
    board2.place_remaining_randomly(&mut rng2, G).unwrap();
    assert_eq!(board1, board2);
}

#[test]
fn random_placement_refuses_placed_ship() {
    let board = full_board();
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        board.random_placement(&mut rng, ShipId(1), G).unwrap_err(),
        BoardError::ShipAlreadyPlaced(ShipId(1))
    );
}

/// Generator stuck at zero: every attempt picks the same anchor.
struct ZeroRng;

impl RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn failed_random_fill_leaves_board_untouched() {
    let mut board = BoardState::new();
    board
        .place(ShipId(5), Cell::new(9, 8), Orientation::Horizontal, G)
        .unwrap();
    let before = board.clone();

    // the carrier lands on the top-left corner, after which every later
    // ship keeps trying that same corner and gives up
    let err = board.place_remaining_randomly(&mut ZeroRng, G).unwrap_err();
    assert_eq!(err, BoardError::UnableToPlaceShip(ShipId(2)));
    assert_eq!(board, before);
    assert!(!board.contains(ShipId(1)));
}

#[test]
fn clear_empties_board() {
    let mut board = full_board();
    board.clear();
    assert!(board.is_empty());
    assert!(board.occupant_at(Cell::new(0, 0)).is_none());
    assert_eq!(board.available_ships().count(), NUM_SHIPS);
}
