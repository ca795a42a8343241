//! Integration tests for the CATAMM core.
//!
//! These tests drive the public API from board generation through market
//! creation, trading and board growth.

use catamm_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// A one-ring board with explicit commodities, numbered 6 except the desert
fn one_ring_board(resources: [Option<Resource>; 7]) -> Board {
    let geometry = Geometry::default();
    let tiles: Vec<Tile> = generate_layout(1)
        .iter()
        .zip(resources)
        .map(|(layout, resource)| {
            let mut tile = Tile::from_layout(layout, &geometry);
            tile.resource = resource;
            tile.number = resource.map(|_| 6);
            tile.has_blocker = resource.is_none();
            tile
        })
        .collect();
    Board::from_tiles(tiles, geometry)
}

/// Portable vertex shared by two given tiles
fn port_between(board: &Board, a: usize, b: usize) -> VertexId {
    board
        .portable_vertices()
        .into_iter()
        .find(|v| {
            let tiles: HashSet<usize> = board.vertex(*v).unwrap().tiles.iter().map(|t| t.tile).collect();
            tiles == HashSet::from([a, b])
        })
        .expect("adjacent ring tiles share a port")
}

fn two_players() -> Vec<String> {
    vec!["Alice".to_string(), "Bob".to_string()]
}

#[test]
fn test_generated_boards_satisfy_graph_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);

    for rings in 0..5 {
        let config = BoardConfig {
            rings,
            ..BoardConfig::default()
        };
        let board = Board::generate_with_rng(&config, &mut rng);
        let n = board.tiles().len();
        assert_eq!(n as u32, 3 * rings * rings + 3 * rings + 1);

        // Every tile corner is referenced by exactly one global vertex
        let references: usize = board.vertices().values().map(|v| v.tiles.len()).sum();
        assert_eq!(references, 6 * n);

        // Every edge joins two known vertices and borders one or two tiles
        for edge in board.edges().values() {
            assert_eq!(edge.vertices, edge.id.endpoints());
            for v in edge.vertices {
                assert!(board.vertex(v).is_some(), "edge {} has dangling {}", edge.id, v);
            }
            assert!((1..=2).contains(&edge.tiles.len()));
        }

        // Euler: V - E + F = 2 with F = tiles + outer face
        let euler = board.vertices().len() as i64 - board.edges().len() as i64 + n as i64 + 1;
        assert_eq!(euler, 2, "rings {}", rings);

        assert_eq!(board.perimeter_edges().len(), 12 * rings as usize + 6);
        assert_eq!(board.portable_vertices().len(), 6 * rings as usize);
    }
}

#[test]
fn test_standard_board_counts() {
    let board = Board::standard_with_rng(&mut StdRng::seed_from_u64(1));

    assert_eq!(board.tiles().len(), 19);
    assert_eq!(board.vertices().len(), 54);
    assert_eq!(board.edges().len(), 72);
    assert_eq!(board.perimeter_edges().len(), 30);
    assert_eq!(board.perimeter_vertices().len(), 30);
    assert_eq!(board.portable_vertices().len(), 12);
    assert_eq!(board.tiles()[7].coord, HexCoord::new(2, -1));
}

#[test]
fn test_vertex_identity_is_independent_of_radius() {
    let layout = standard_layout();
    let small = build_board(&layout, Geometry::new(1.0, Point::new(0.0, 0.0)));
    let large = build_board(&layout, Geometry::new(123.456, Point::new(-7.0, 99.0)));

    let small_ids: Vec<&VertexId> = small.vertices().keys().collect();
    let large_ids: Vec<&VertexId> = large.vertices().keys().collect();
    assert_eq!(small_ids, large_ids);
    assert_eq!(small.edges().len(), large.edges().len());
}

#[test]
fn test_board_json_round_trip() {
    let mut board = Board::standard_with_rng(&mut StdRng::seed_from_u64(8));
    board.place_settlement(VertexId::new(0, 0), 1).unwrap();
    board
        .place_road(EdgeId::new(VertexId::new(0, 0), VertexId::new(0, 1)), 1)
        .unwrap();

    let json = serde_json::to_string(&board).unwrap();
    assert!(json.contains("\"h0v0\""));
    assert!(json.contains("\"h0v0-h0v1\""));

    let back: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(back.buildings(), board.buildings());
    assert_eq!(back.roads(), board.roads());
    assert_eq!(back.blocker(), board.blocker());
    assert!(back.vertices().keys().eq(board.vertices().keys()));
    assert!(back.edges().keys().eq(board.edges().keys()));
    for (a, b) in back.tiles().iter().zip(board.tiles()) {
        assert_eq!((a.coord, a.resource, a.number), (b.coord, b.resource, b.number));
        assert_eq!(a.neighbors, b.neighbors);
    }
}

#[test]
fn test_market_lifecycle_through_session() {
    use Resource::*;
    let board = one_ring_board([None, Some(Wood), Some(Brick), Some(Sheep), Some(Wheat), Some(Ore), Some(Wood)]);
    let port = port_between(&board, 1, 2);
    let mut session = GameSession::with_board(Config::default(), board, two_players()).unwrap();

    // Alice builds on the Wood/Brick port and owns the market
    let events = session
        .apply_action(0, GameAction::BuildSettlement(port))
        .unwrap();
    assert_eq!(
        events[1],
        GameEvent::MarketOpened {
            owner: 0,
            market: port,
            pair: MarketPair::new(Wood, Brick).unwrap(),
            seed_liquidity: 10,
        }
    );

    // Bob deepens the pool, then trades at the 10% rate
    session.grant(1, Wood, 100).unwrap();
    session.grant(1, Brick, 100).unwrap();
    session
        .apply_action(
            1,
            GameAction::Deposit {
                market: port,
                amount_first: 90,
                amount_second: 90,
            },
        )
        .unwrap();
    assert_eq!(session.ports().get(port).unwrap().reserves(), (100, 100));

    let k_before = session.ports().get(port).unwrap().k();
    let events = session
        .apply_action(
            1,
            GameAction::Swap {
                market: port,
                resource_in: Wood,
                amount_in: 10,
            },
        )
        .unwrap();
    match &events[0] {
        GameEvent::Swapped { receipt, .. } => assert_eq!(receipt.amount_out, 8),
        other => panic!("unexpected event {:?}", other),
    }
    let pool = session.ports().get(port).unwrap();
    assert!(pool.k() > k_before, "fees stay in the pool");

    // Alice trades free
    session.grant(0, Wood, 10).unwrap();
    let owner_quote = session.quote(0, port, Wood, 10).unwrap();
    let bob_quote = session.quote(1, port, Wood, 10).unwrap();
    assert!(owner_quote > bob_quote);

    // Only Alice can withdraw, and only her own shares
    assert_eq!(
        session.apply_action(1, GameAction::Withdraw { market: port, shares: 1 }),
        Err(GameError::Market(MarketError::NotOwner))
    );
    assert!(session
        .apply_action(0, GameAction::Withdraw { market: port, shares: 5 })
        .is_ok());
    assert_eq!(session.ports().get(port).unwrap().shares_of(0), 5);
}

#[test]
fn test_same_commodity_and_desert_ports_open_nothing() {
    use Resource::*;
    let board = one_ring_board([Some(Ore), Some(Sheep), Some(Sheep), None, Some(Wheat), Some(Ore), Some(Wood)]);
    let same = port_between(&board, 1, 2);
    let desert = port_between(&board, 2, 3);
    let mut session = GameSession::with_board(Config::default(), board, two_players()).unwrap();

    let events = session.apply_action(0, GameAction::BuildSettlement(same)).unwrap();
    assert_eq!(events.len(), 1);
    let events = session.apply_action(1, GameAction::BuildSettlement(desert)).unwrap();
    assert_eq!(events.len(), 1);
    assert!(session.ports().is_empty());
}

#[test]
fn test_occupied_vertex_is_rejected_without_side_effects() {
    use Resource::*;
    let board = one_ring_board([None, Some(Wood), Some(Brick), Some(Sheep), Some(Wheat), Some(Ore), Some(Wood)]);
    let port = port_between(&board, 1, 2);
    let mut session = GameSession::with_board(Config::default(), board, two_players()).unwrap();
    session.apply_action(0, GameAction::BuildSettlement(port)).unwrap();

    let result = session.apply_action(1, GameAction::BuildSettlement(port));
    assert_eq!(result, Err(GameError::Board(BoardError::VertexOccupied(port))));
    assert_eq!(session.board().building_at(port).unwrap().owner, 0);
    assert_eq!(session.ports().get(port).unwrap().owner(), 0);
}

#[test]
fn test_growth_deactivates_closed_port() {
    use Resource::*;
    let board = one_ring_board([None, Some(Wood), Some(Brick), Some(Sheep), Some(Wheat), Some(Ore), Some(Wood)]);
    let port = port_between(&board, 1, 2);
    let mut ports = PortRegistry::new();
    ports
        .open_for_building(&board, port, 0, &MarketConfig::default())
        .unwrap();

    // (1, 1) touches both (1, 0) and (0, 1), closing the port
    let grown = board.with_tile(HexCoord::new(1, 1), Some(Ore), Some(4)).unwrap();
    assert!(!grown.is_portable(port));
    assert_eq!(market_for_portable_vertex(&grown, port), None);

    assert_eq!(ports.revalidate(&grown), vec![port]);
    let pool = ports.get(port).unwrap();
    assert!(!pool.is_active());
    assert_eq!(pool.quote(Wood, 1, 0), Err(MarketError::Inactive));
}

#[test]
fn test_organic_growth_keeps_existing_identities() {
    let config = Config {
        organic_growth: true,
        ..Config::default()
    };
    let mut rng = StdRng::seed_from_u64(77);
    let mut session = GameSession::new_with_rng(config, two_players(), &mut rng).unwrap();
    let before: Vec<VertexId> = session.board().vertices().keys().copied().collect();

    // Every perimeter vertex borders an empty slot, so each build grows the board
    for _ in 0..3 {
        let vertex = session
            .board()
            .perimeter_vertices()
            .into_iter()
            .find(|v| session.board().building_at(*v).is_none())
            .unwrap();
        session
            .apply_action_with_rng(0, GameAction::BuildSettlement(vertex), &mut rng)
            .unwrap();
    }

    assert_eq!(session.board().tiles().len(), 22);
    for id in before {
        assert!(session.board().vertex(id).is_some(), "{} disappeared", id);
    }
}
