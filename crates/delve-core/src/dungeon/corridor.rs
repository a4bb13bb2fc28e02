//! Corridor generation.
//!
//! Connects the rooms of a level into a single walkable network: rooms are
//! ordered by top-left corner (with a few random swaps so the dungeon is
//! not perfectly predictable), a doorway is carved into each room of every
//! consecutive pair, and the doorways are joined by an A* shortest path
//! over the grid of cells not claimed by any room.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use delve_rng::GameRng;

use crate::consts::{MAX_DOORWAY_ATTEMPTS, SCREEN_H, SCREEN_W};
use crate::dungeon::{Position, Room, Square, SquareStore, SquareType};
use crate::errors::LevelError;

/// Builds the corridor square store for a set of rooms.
///
/// Implementations may carve doorway squares out of the rooms they are
/// given.
pub trait CorridorBuilder {
    fn build(&self, rooms: &mut [Room], rng: &mut GameRng) -> Result<SquareStore, LevelError>;
}

/// Corridor factory that routes shortest paths over the free cells of the
/// screen grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCorridorFactory;

impl CorridorBuilder for GridCorridorFactory {
    fn build(&self, rooms: &mut [Room], rng: &mut GameRng) -> Result<SquareStore, LevelError> {
        let mut result = SquareStore::new();
        if rooms.len() < 2 {
            return Ok(result);
        }

        let order = room_order(rooms, rng);

        let mut grid = PathGrid::new();
        for room in rooms.iter() {
            for pos in room.store().positions() {
                grid.remove(pos);
            }
        }

        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let start = rnd_doorway(&rooms[a], rng)?;
            let end = rnd_doorway(&rooms[b], rng)?;
            rooms[a].carve(start);
            rooms[b].carve(end);
            for pos in [start, end] {
                grid.insert(pos);
                result.insert(pos, Square::new(SquareType::Doorway));
            }

            let path =
                astar(&grid, start, end, rooms).ok_or(LevelError::NoPath { from: start, to: end })?;
            for pos in &path[1..path.len() - 1] {
                result.insert(*pos, Square::new(SquareType::Corridor));
            }

            // Later paths must not route through used doorways.
            grid.remove(start);
            grid.remove(end);
        }
        Ok(result)
    }
}

/// Room indices ordered by top-left corner, then perturbed by a few random
/// pairwise swaps (each gated by a 1d4 > 1 check, at most one per room).
fn room_order(rooms: &[Room], rng: &mut GameRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rooms.len()).collect();
    order.sort_by_key(|&i| rooms[i].top_left);
    let mut swaps = 0;
    while rng.roll(1, 4) > 1 && swaps < rooms.len() {
        if let Some((a, b)) = rng.pair(order.len()) {
            order.swap(a, b);
        }
        swaps += 1;
    }
    order
}

/// Pick a wall square on the room perimeter suitable for a doorway.
///
/// Candidates are drawn on each of the four walls; a candidate is suitable
/// when it is not on the map edge and is still a plain wall square. The
/// retry is bounded; exhaustion fails level generation.
fn rnd_doorway(room: &Room, rng: &mut GameRng) -> Result<Position, LevelError> {
    let [tl, _, br, _] = room.corners();
    for _ in 0..MAX_DOORWAY_ATTEMPTS {
        let candidates = [
            tl + (rng.range(1, room.width - 1), 0),
            tl + (0, rng.range(1, room.height - 1)),
            br - (rng.range(1, room.width - 1), 0),
            br - (0, rng.range(1, room.height - 1)),
        ];
        let valid: Vec<Position> = candidates
            .into_iter()
            .filter(|&pos| is_valid_doorway(pos) && is_plain_wall(room, pos))
            .collect();
        if let Some(&pos) = rng.choose(&valid) {
            return Ok(pos);
        }
    }
    Err(LevelError::DoorwayExhausted {
        top_left: room.top_left,
    })
}

/// Doorways can't be placed on the map's edge.
fn is_valid_doorway(pos: Position) -> bool {
    pos.col >= 1 && pos.col <= SCREEN_W - 2 && pos.row >= 1 && pos.row <= SCREEN_H - 2
}

fn is_plain_wall(room: &Room, pos: Position) -> bool {
    matches!(
        room.get(pos).map(|sq| sq.typ),
        Some(SquareType::WallHorizontal | SquareType::WallVertical)
    )
}

/// 4-connected availability grid over the screen.
struct PathGrid {
    free: Vec<Vec<bool>>,
}

impl PathGrid {
    fn new() -> Self {
        Self {
            free: vec![vec![true; SCREEN_H as usize]; SCREEN_W as usize],
        }
    }

    fn insert(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.free[pos.col as usize][pos.row as usize] = true;
        }
    }

    fn remove(&mut self, pos: Position) {
        if pos.in_bounds() {
            self.free[pos.col as usize][pos.row as usize] = false;
        }
    }

    fn is_free(&self, pos: Position) -> bool {
        pos.in_bounds() && self.free[pos.col as usize][pos.row as usize]
    }

    fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors(false).filter(|&n| self.is_free(n))
    }
}

/// Manhattan-distance heuristic; cells claimed by a room are unreachable.
fn heuristic(pos: Position, goal: Position, rooms: &[Room]) -> Option<u32> {
    if rooms.iter().any(|r| r.contains(pos)) {
        return None;
    }
    Some(pos.manhattan(goal) as u32)
}

/// A* shortest path over the free grid cells, endpoints included.
fn astar(grid: &PathGrid, start: Position, goal: Position, rooms: &[Room]) -> Option<Vec<Position>> {
    let mut open = BinaryHeap::new();
    let mut best_cost: BTreeMap<Position, u32> = BTreeMap::new();
    let mut came_from: BTreeMap<Position, Position> = BTreeMap::new();

    best_cost.insert(start, 0);
    open.push(Reverse((heuristic(start, goal, rooms)?, start)));

    while let Some(Reverse((_, current))) = open.pop() {
        if current == goal {
            let mut path = vec![current];
            let mut pos = current;
            while let Some(&prev) = came_from.get(&pos) {
                path.push(prev);
                pos = prev;
            }
            path.reverse();
            return Some(path);
        }

        let cost = best_cost[&current] + 1;
        for neighbor in grid.neighbors(current) {
            if best_cost.get(&neighbor).is_none_or(|&c| cost < c) {
                let Some(h) = heuristic(neighbor, goal, rooms) else {
                    continue;
                };
                best_cost.insert(neighbor, cost);
                came_from.insert(neighbor, current);
                open.push(Reverse((cost + h, neighbor)));
            }
        }
    }
    None
}
