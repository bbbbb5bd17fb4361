use battleship_setup::{
    can_place, cells_for_placement, check_placement, BoardError, BoardState, Cell, GridSize,
    Orientation, ShipClass, ShipId, FLEET,
};

fn class(name: &str) -> &'static ShipClass {
    ShipClass::by_name(name).unwrap()
}

#[test]
fn destroyer_off_right_edge_is_rejected() {
    let board = BoardState::new();
    let destroyer = class("Destroyer");
    let anchor = Cell::new(0, 9);

    assert_eq!(
        cells_for_placement(destroyer, anchor, Orientation::Horizontal),
        [Cell::new(0, 9), Cell::new(0, 10)]
    );
    assert!(!can_place(&board, destroyer, anchor, Orientation::Horizontal, GridSize::STANDARD));
    assert_eq!(
        check_placement(&board, destroyer, anchor, Orientation::Horizontal, GridSize::STANDARD),
        Err(BoardError::ShipOutOfBounds { row: 0, col: 10 })
    );
    // the same anchor works when the ship points down
    assert!(can_place(&board, destroyer, anchor, Orientation::Vertical, GridSize::STANDARD));
}

#[test]
fn carrier_on_empty_board() {
    let mut board = BoardState::new();
    let ship = board
        .place(ShipId(1), Cell::new(2, 2), Orientation::Horizontal, GridSize::STANDARD)
        .unwrap();
    let expected: Vec<Cell> = (2..=6).map(|c| Cell::new(2, c)).collect();
    assert_eq!(ship.cells(), expected.as_slice());
    assert_eq!(ship.name(), "Carrier");
    assert_eq!(ship.anchor(), Cell::new(2, 2));
}

#[test]
fn cruiser_crossing_carrier_is_rejected() {
    let mut board = BoardState::new();
    board
        .place(ShipId(1), Cell::new(2, 2), Orientation::Horizontal, GridSize::STANDARD)
        .unwrap();
    let before = board.clone();

    let cruiser = class("Cruiser");
    assert!(!can_place(&board, cruiser, Cell::new(2, 4), Orientation::Vertical, GridSize::STANDARD));
    let err = board
        .place(cruiser.id(), Cell::new(2, 4), Orientation::Vertical, GridSize::STANDARD)
        .unwrap_err();
    assert_eq!(
        err,
        BoardError::ShipOverlaps {
            row: 2,
            col: 4,
            occupant: ShipId(1)
        }
    );
    assert_eq!(board, before, "rejected placement must not touch the board");
}

#[test]
fn overlap_is_detected_below_the_anchor() {
    let mut board = BoardState::new();
    board
        .place(ShipId(5), Cell::new(3, 0), Orientation::Horizontal, GridSize::STANDARD)
        .unwrap();
    // vertical carrier from (0,1) runs through (3,1)
    assert_eq!(
        check_placement(&board, class("Carrier"), Cell::new(0, 1), Orientation::Vertical, GridSize::STANDARD),
        Err(BoardError::ShipOverlaps {
            row: 3,
            col: 1,
            occupant: ShipId(5)
        })
    );
    assert!(can_place(&board, class("Carrier"), Cell::new(0, 2), Orientation::Vertical, GridSize::STANDARD));
}

#[test]
fn bounds_follow_grid_size() {
    let board = BoardState::new();
    let carrier = class("Carrier");
    let anchor = Cell::new(7, 0);
    assert!(!can_place(&board, carrier, anchor, Orientation::Vertical, GridSize::SMALL));
    assert!(!can_place(&board, carrier, anchor, Orientation::Vertical, GridSize::STANDARD));
    assert!(can_place(&board, carrier, anchor, Orientation::Vertical, GridSize::LARGE));
    // anchor itself outside the grid
    assert!(!can_place(&board, class("Destroyer"), Cell::new(8, 0), Orientation::Horizontal, GridSize::SMALL));
}

#[test]
fn can_place_is_repeatable() {
    let mut board = BoardState::new();
    board
        .place(ShipId(2), Cell::new(5, 5), Orientation::Vertical, GridSize::STANDARD)
        .unwrap();
    for class in FLEET.iter() {
        for r in 0..10 {
            for c in 0..10 {
                for o in [Orientation::Horizontal, Orientation::Vertical] {
                    let first = can_place(&board, class, Cell::new(r, c), o, GridSize::STANDARD);
                    let second = can_place(&board, class, Cell::new(r, c), o, GridSize::STANDARD);
                    assert_eq!(first, second);
                }
            }
        }
    }
}

#[test]
fn grid_size_accepts_only_offered_sizes() {
    for n in [8, 10, 12] {
        assert_eq!(GridSize::try_from(n).unwrap().get(), n);
    }
    assert_eq!(GridSize::try_from(9), Err(BoardError::InvalidGridSize(9)));
    assert_eq!(GridSize::default(), GridSize::STANDARD);
}

#[test]
fn cells_parse_from_row_letter_and_column_number() {
    assert_eq!("B3".parse::<Cell>().unwrap(), Cell::new(1, 2));
    assert_eq!("a10".parse::<Cell>().unwrap(), Cell::new(0, 9));
    assert_eq!(Cell::new(11, 11).to_string(), "L12");
    assert_eq!("B0".parse::<Cell>(), Err(BoardError::InvalidCoordinate));
    assert_eq!("33".parse::<Cell>(), Err(BoardError::InvalidCoordinate));
    assert_eq!("".parse::<Cell>(), Err(BoardError::InvalidCoordinate));
}
