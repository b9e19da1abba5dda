use chessbot::eval::terms::CENTER;
use chessbot::search::ordering::{move_priority, order_moves, OrderingHints};
use chessbot::Position;
use cozy_chess::Piece;

#[test]
fn most_valuable_victim_first() {
    // Nc3 can take the queen on d5 or the pawn on e4.
    let pos = Position::from_fen("4k3/8/8/3q4/4p3/2N5/8/4K3 w - - 0 30").unwrap();
    let ordered = order_moves(&pos, pos.legal_moves(), &OrderingHints::default());
    let uci: Vec<String> = ordered.iter().map(|&m| pos.move_to_uci(m)).collect();
    assert_eq!(uci[0], "c3d5");
    assert_eq!(uci[1], "c3e4");
}

#[test]
fn queen_to_center_searched_last() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 30").unwrap();
    let ordered = order_moves(&pos, pos.legal_moves(), &OrderingHints::default());
    let tail = &ordered[ordered.len() - 2..];
    for m in tail {
        assert_eq!(pos.board().piece_on(m.from), Some(Piece::Queen));
        assert!(CENTER.contains(&m.to), "{}", pos.move_to_uci(*m));
    }
}

#[test]
fn en_passant_counts_as_capture() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 30").unwrap();
    let ep = pos.parse_uci("e5d6").unwrap();
    assert_eq!(move_priority(&pos, ep), 10_000 + 100);
}

#[test]
fn equal_priorities_keep_generation_order() {
    let pos = Position::startpos();
    let legal = pos.legal_moves();
    let ordered = order_moves(&pos, legal.clone(), &OrderingHints::default());
    let quiet = |ms: &[cozy_chess::Move]| -> Vec<cozy_chess::Move> {
        ms.iter().copied().filter(|&m| move_priority(&pos, m) == 0).collect()
    };
    assert_eq!(quiet(&ordered[..]), quiet(&legal[..]));
    // Central pawn pushes lead, then developing knight moves.
    assert!(move_priority(&pos, ordered[0]) >= move_priority(&pos, ordered[1]));
    assert_eq!(move_priority(&pos, pos.parse_uci("e2e4").unwrap()), 50);
    assert_eq!(move_priority(&pos, pos.parse_uci("g1f3").unwrap()), 30);
}
