//! Tests for the board state machine.

use xo_engine::{
    Board, Cell, GameStatus, MoveError, Outcome, Participant, SetupError, Sign, Square, User,
    rules::LINES,
};

fn cell(row: usize, column: usize) -> Cell {
    Cell::new(row, column).expect("cell in range")
}

fn users() -> (User, User) {
    (User::new("user1"), User::new("user2"))
}

/// user1 plays O and moves first, user2 plays X.
fn new_board() -> Board {
    let (first, second) = users();
    Board::new(
        Participant::new(first, Sign::O),
        Participant::new(second, Sign::X),
    )
    .expect("valid board")
}

/// Plays the given cells alternately, starting with user1.
fn play(board: &mut Board, cells: &[(usize, usize)]) -> Option<Outcome> {
    let (first, second) = users();
    let mut outcome = None;
    for (turn, &(row, column)) in cells.iter().enumerate() {
        let user = if turn % 2 == 0 { &first } else { &second };
        outcome = board
            .make_move(cell(row, column), user)
            .expect("legal move");
    }
    outcome
}

#[test]
fn test_cell_out_of_range_rejected() {
    assert!(Cell::new(3, 0).is_err());
    assert!(Cell::new(0, 3).is_err());
    assert!(Cell::new(2, 2).is_ok());
}

#[test]
fn test_first_participant_moves_first() {
    let mut board = new_board();
    let (first, second) = users();
    assert_eq!(board.next_to_move(), &first);

    let result = board.make_move(cell(0, 0), &second);
    assert!(matches!(result, Err(MoveError::ConsecutiveMove(_))));

    board.make_move(cell(0, 0), &first).expect("first move");
    assert_eq!(board.next_to_move(), &second);
    assert_eq!(board.grid().get(cell(0, 0)), Square::Occupied(Sign::O));
}

#[test]
fn test_no_two_moves_in_a_row() {
    let mut board = new_board();
    let (first, _) = users();
    board.make_move(cell(0, 0), &first).expect("first move");
    let result = board.make_move(cell(1, 1), &first);
    assert_eq!(result, Err(MoveError::ConsecutiveMove(first)));
}

#[test]
fn test_occupied_cell_checked_before_turn() {
    let mut board = new_board();
    let (first, _) = users();
    board.make_move(cell(0, 0), &first).expect("first move");
    // Same user on the same cell: occupancy is reported first.
    let result = board.make_move(cell(0, 0), &first);
    assert_eq!(result, Err(MoveError::CellOccupied(cell(0, 0), Sign::O)));
}

#[test]
fn test_stranger_rejected() {
    let mut board = new_board();
    let stranger = User::new("mallory");
    let result = board.make_move(cell(0, 0), &stranger);
    assert_eq!(result, Err(MoveError::NotParticipant(stranger)));
}

#[test]
fn test_row_win_reports_winner_and_loser() {
    let mut board = new_board();
    let outcome = play(&mut board, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let (first, second) = users();

    assert_eq!(
        outcome,
        Some(Outcome::Won {
            winner: first.clone(),
            loser: second.clone(),
        })
    );
    assert_eq!(outcome.unwrap().to_string(), "user1 wins user2");
    assert_eq!(board.status(), &GameStatus::Won(first));
}

#[test]
fn test_every_line_wins_for_the_mover() {
    for line in LINES {
        let mut board = new_board();
        let (first, second) = users();
        // The opponent replies on cells outside the line.
        let mut spare = Cell::all().filter(|c| !line.contains(&(c.row(), c.column())));

        for &(row, column) in &line[..2] {
            let outcome = board.make_move(cell(row, column), &first).expect("line move");
            assert_eq!(outcome, None, "line {:?}", line);
            let reply = spare.next().expect("spare cell");
            assert_eq!(board.make_move(reply, &second).expect("reply"), None);
        }

        let (row, column) = line[2];
        let outcome = board.make_move(cell(row, column), &first).expect("closing move");
        assert_eq!(outcome.and_then(|o| o.winner().cloned()), Some(first), "line {:?}", line);
    }
}

#[test]
fn test_draw_detection() {
    let mut board = new_board();
    // o x o
    // o x x
    // x o o
    let outcome = play(
        &mut board,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 2),
            (2, 2),
        ],
    );
    assert_eq!(outcome, Some(Outcome::Draw));
    assert_eq!(outcome.unwrap().to_string(), "draw");
    assert_eq!(board.status(), &GameStatus::Draw);
}

#[test]
fn test_finished_game_refuses_moves() {
    let mut board = new_board();
    play(&mut board, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let (first, second) = users();

    let result = board.make_move(cell(2, 2), &second);
    assert_eq!(result, Err(MoveError::AlreadyWon(first.clone())));
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("\"user1\" is the winner")
    );
    assert_eq!(board.status(), &GameStatus::Won(first));
}

#[test]
fn test_forfeit_awards_the_other_participant() {
    let mut board = new_board();
    let (first, second) = users();
    board.make_move(cell(1, 1), &first).expect("first move");

    let outcome = board.forfeit(&first).expect("forfeit");
    assert_eq!(
        outcome,
        Outcome::Won {
            winner: second.clone(),
            loser: first,
        }
    );
    assert_eq!(board.status(), &GameStatus::Won(second.clone()));
    assert_eq!(board.forfeit(&second), Err(MoveError::AlreadyWon(second)));
}

#[test]
fn test_board_rejects_bad_pairings() {
    let (first, second) = users();
    let same_user = Board::new(
        Participant::new(first.clone(), Sign::X),
        Participant::new(first.clone(), Sign::O),
    );
    assert_eq!(same_user, Err(SetupError::SameUser(first.clone())));

    let same_sign = Board::new(
        Participant::new(first, Sign::X),
        Participant::new(second, Sign::X),
    );
    assert_eq!(same_sign, Err(SetupError::SameSign(Sign::X)));
}

#[test]
fn test_opener_is_independent_of_participant_order() {
    let (first, second) = users();
    let mut board = Board::with_opener(
        Participant::new(first.clone(), Sign::X),
        Participant::new(second.clone(), Sign::O),
        &second,
    )
    .expect("valid board");

    assert_eq!(board.participants()[0].user(), &first);
    assert_eq!(board.next_to_move(), &second);
    assert_eq!(
        board.make_move(cell(0, 0), &first),
        Err(MoveError::ConsecutiveMove(first.clone()))
    );
    assert_eq!(board.make_move(cell(0, 0), &second), Ok(None));
    assert_eq!(board.next_to_move(), &first);

    let stranger = Board::with_opener(
        Participant::new(first, Sign::X),
        Participant::new(second, Sign::O),
        &User::new("user3"),
    );
    assert_eq!(
        stranger,
        Err(SetupError::UnknownOpener(User::new("user3")))
    );
}

#[test]
fn test_sign_parsing() {
    assert_eq!(Sign::parse("x"), Ok(Sign::X));
    assert_eq!(Sign::parse("O"), Ok(Sign::O));
    assert!(Sign::parse("z").is_err());
    assert!(Sign::parse("").is_err());
}

#[test]
fn test_cell_deserialization_validates() {
    let ok: Cell = serde_json::from_str("[2, 1]").expect("valid cell");
    assert_eq!(ok, cell(2, 1));
    assert!(serde_json::from_str::<Cell>("[3, 1]").is_err());
}

#[test]
fn test_board_display() {
    let mut board = new_board();
    play(&mut board, &[(0, 0), (1, 1)]);
    let rendered = board.to_string();
    assert!(rendered.ends_with("o|.|.\n.|x|.\n.|.|."), "{}", rendered);
}
