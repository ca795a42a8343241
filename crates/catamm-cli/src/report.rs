//! Topology summary of a generated board.

use catamm_core::{market_for_portable_vertex, Board, Resource, VertexId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A port that can host a market
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketPort {
    pub vertex: VertexId,
    pub pair: String,
}

/// Counts and commodity spread of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardReport {
    pub tiles: usize,
    pub vertices: usize,
    pub edges: usize,
    pub perimeter_edges: usize,
    pub interior_edges: usize,
    pub perimeter_vertices: usize,
    pub portable_vertices: usize,
    pub market_ports: Vec<MarketPort>,
    pub blocker: Option<usize>,
    pub resources: BTreeMap<String, usize>,
    pub deserts: usize,
}

impl BoardReport {
    pub fn from_board(board: &Board) -> Self {
        let market_ports = board
            .portable_vertices()
            .into_iter()
            .filter_map(|v| {
                market_for_portable_vertex(board, v).map(|m| MarketPort {
                    vertex: v,
                    pair: m.pair.to_string(),
                })
            })
            .collect();

        let mut resources: BTreeMap<String, usize> = Resource::ALL
            .iter()
            .map(|r| (r.name().to_string(), 0))
            .collect();
        for resource in board.tiles().iter().filter_map(|t| t.resource) {
            *resources.entry(resource.name().to_string()).or_default() += 1;
        }

        Self {
            tiles: board.tiles().len(),
            vertices: board.vertices().len(),
            edges: board.edges().len(),
            perimeter_edges: board.perimeter_edges().len(),
            interior_edges: board.interior_edges().len(),
            perimeter_vertices: board.perimeter_vertices().len(),
            portable_vertices: board.portable_vertices().len(),
            market_ports,
            blocker: board.blocker(),
            resources,
            deserts: board.tiles().iter().filter(|t| t.is_desert()).count(),
        }
    }
}

impl fmt::Display for BoardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tiles:              {}", self.tiles)?;
        writeln!(f, "vertices:           {}", self.vertices)?;
        writeln!(
            f,
            "edges:              {} ({} perimeter, {} interior)",
            self.edges, self.perimeter_edges, self.interior_edges
        )?;
        writeln!(f, "perimeter vertices: {}", self.perimeter_vertices)?;
        writeln!(f, "portable vertices:  {}", self.portable_vertices)?;
        for (name, count) in &self.resources {
            writeln!(f, "  {:<6} {}", name, count)?;
        }
        writeln!(f, "  desert {}", self.deserts)?;
        writeln!(f, "market ports:       {}", self.market_ports.len())?;
        for port in &self.market_ports {
            writeln!(f, "  {:<8} {}", port.vertex.to_string(), port.pair)?;
        }
        Ok(())
    }
}
