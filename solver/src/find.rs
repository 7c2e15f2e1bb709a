use std::collections::VecDeque;

use log::debug;

use crate::{
    error::{DegenerateReason, Result, SolveError},
    frame::BoundingBox,
    grid::{PixelGrid, Point},
};

/// One discovered cell. Nodes live in an arena owned by the [`PathFinder`] and
/// refer to their parent by index, the start node has no parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub point: Point,
    pub parent: Option<usize>,
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult {
    /// every cell from start to goal, both included
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    /// number of moves, always `path.len() - 1`
    pub hops: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Neighbors in the fixed expansion order: north, south, east, west
fn neighbors_of(p: Point) -> impl Iterator<Item = Point> {
    [
        p.y.checked_sub(1).map(|y| Point::new(p.x, y)),
        Some(Point::new(p.x, p.y + 1)),
        Some(Point::new(p.x + 1, p.y)),
        p.x.checked_sub(1).map(|x| Point::new(x, p.y)),
    ]
    .into_iter()
    .flatten()
}

/// Breadth-first search over the open cells inside a [`BoundingBox`].
///
/// The search can be advanced one frontier node at a time with [`PathFinder::step`]
/// or run to the end with [`PathFinder::finish`].
#[derive(Debug)]
pub struct PathFinder<'a, G: PixelGrid + ?Sized> {
    grid: &'a G,
    bounds: BoundingBox,
    start: Point,
    goal: Point,
    visited: Vec<bool>,
    nodes: Vec<Node>,
    frontier: VecDeque<usize>,
    state: PathFinderState,
}

impl<'a, G: PixelGrid + ?Sized> PathFinder<'a, G> {
    /// Set up a search from `start` to `goal`. Both must be open cells inside `bounds`.
    pub fn new(grid: &'a G, bounds: BoundingBox, start: Point, goal: Point) -> Result<Self> {
        for p in [start, goal] {
            if !bounds.contains(p) || !grid.contains(p) || grid.is_wall(p) {
                return Err(SolveError::Degenerate(
                    DegenerateReason::EndpointOutsideFrame(p),
                ));
            }
        }

        let mut finder = Self {
            grid,
            bounds,
            start,
            goal,
            visited: vec![false; grid.width() * grid.height()],
            nodes: Vec::new(),
            frontier: VecDeque::new(),
            state: PathFinderState::Computing,
        };
        finder.discover(start, None);

        Ok(finder)
    }

    fn index(&self, p: Point) -> usize {
        p.y * self.grid.width() + p.x
    }

    fn discover(&mut self, point: Point, parent: Option<usize>) {
        let idx = self.index(point);
        self.visited[idx] = true;
        self.nodes.push(Node { point, parent });
        self.frontier.push_back(self.nodes.len() - 1);
    }

    fn can_enter(&self, p: Point) -> bool {
        self.bounds.contains(p)
            && self.grid.contains(p)
            && !self.grid.is_wall(p)
            && !self.visited[self.index(p)]
    }

    /// Follow the parent links from `target` back to the start
    fn backtrack(&self, target: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = Some(target);

        while let Some(id) = current {
            let node = self.nodes[id];
            path.push(node.point);
            current = node.parent;
        }

        path.reverse();
        path
    }

    pub fn finish(mut self) -> PathFinderState {
        while !self.state.is_done() {
            self.step();
        }
        self.state
    }

    /// Expand a single node from the frontier
    pub fn step(&mut self) -> &PathFinderState {
        if self.state.is_done() {
            return &self.state;
        }

        let Some(id) = self.frontier.pop_front() else {
            debug!(
                "frontier exhausted after {} nodes without reaching {}",
                self.nodes.len(),
                self.goal
            );
            self.state = PathFinderState::NoPathFound;
            return &self.state;
        };

        let current = self.nodes[id].point;

        if current == self.goal {
            let path = self.backtrack(id);
            debug!(
                "reached {} in {} hops, {} nodes discovered",
                self.goal,
                path.len() - 1,
                self.nodes.len()
            );
            self.state = PathFinderState::PathFound(PathResult {
                hops: path.len() - 1,
                path,
                start: self.start,
                goal: self.goal,
            });
            return &self.state;
        }

        for next in neighbors_of(current) {
            if self.can_enter(next) {
                self.discover(next, Some(id));
            }
        }

        &self.state
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }

    /// All nodes discovered so far, in the order they were enqueued
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.grid.contains(p) && self.visited[self.index(p)]
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}

/// Find the shortest 4-connected path between two open cells of the frame
pub fn solve<G: PixelGrid + ?Sized>(
    grid: &G,
    bounds: BoundingBox,
    start: Point,
    end: Point,
) -> Result<PathResult> {
    match PathFinder::new(grid, bounds, start, end)?.finish() {
        PathFinderState::PathFound(result) => Ok(result),
        _ => Err(SolveError::Unreachable { start, end }),
    }
}

#[cfg(test)]
mod test {
    use std::collections::{HashSet, VecDeque};

    use super::*;
    use crate::{frame::locate_maze, grid::WallMap};

    fn create_basic_map() -> WallMap {
        "
        ##.##
        #...#
        #...#
        #...#
        ##.##
        "
        .parse()
        .unwrap()
    }

    fn create_detour_map() -> WallMap {
        "
        ##.##
        #....
        ####.
        #....
        ##.##
        "
        .parse()
        .unwrap()
    }

    fn solve_map(map: &WallMap) -> Result<PathResult> {
        let (bounds, ends) = locate_maze(map)?;
        solve(map, bounds, ends.start, ends.end)
    }

    /// Reference distances: relax a full distance table until it stops changing
    fn brute_force_distance(
        map: &WallMap,
        bounds: &BoundingBox,
        from: Point,
        to: Point,
    ) -> Option<usize> {
        const OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

        let passable = |x: isize, y: isize| {
            x >= bounds.l.x as isize
                && x <= bounds.r.x as isize
                && y >= bounds.l.y as isize
                && y <= bounds.r.y as isize
                && map.is_open(Point::new(x as usize, y as usize))
        };

        let mut dist = vec![vec![usize::MAX; map.width()]; map.height()];
        dist[from.y][from.x] = 0;

        let mut changed = true;
        while changed {
            changed = false;
            for y in 0..map.height() as isize {
                for x in 0..map.width() as isize {
                    if !passable(x, y) {
                        continue;
                    }
                    for (dx, dy) in OFFSETS {
                        let (nx, ny) = (x + dx, y + dy);
                        if !passable(nx, ny) {
                            continue;
                        }
                        let via = dist[ny as usize][nx as usize].saturating_add(1);
                        if via < dist[y as usize][x as usize] {
                            dist[y as usize][x as usize] = via;
                            changed = true;
                        }
                    }
                }
            }
        }

        Some(dist[to.y][to.x]).filter(|&d| d != usize::MAX)
    }

    /// A framed `size` x `size` maze with pseudo-random inner walls, openings at
    /// the top left and bottom right
    fn generated_map(size: usize, seed: u64) -> WallMap {
        let mut map = WallMap::new(size, size);
        let mut state = seed;

        for y in 0..size {
            for x in 0..size {
                let border = x == 0 || y == 0 || x == size - 1 || y == size - 1;
                // xorshift
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                map.set_wall(Point::new(x, y), border || state % 10 < 3);
            }
        }
        map.set_wall(Point::new(1, 0), false);
        map.set_wall(Point::new(1, 1), false);
        map.set_wall(Point::new(size - 2, size - 1), false);
        map.set_wall(Point::new(size - 2, size - 2), false);

        map
    }

    fn assert_contiguous(path: &[Point]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance(&pair[1]), 1, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_basic_route() {
        let res = solve_map(&create_basic_map()).unwrap();

        let expected: Vec<Point> = [(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        assert_eq!(res.path, expected);
        assert_eq!(res.hops, 4);
        assert_eq!(res.start, Point::new(2, 0));
        assert_eq!(res.goal, Point::new(2, 4));
    }

    #[test]
    fn test_detour_through_gap() {
        let map = create_detour_map();
        let res = solve_map(&map).unwrap();

        let expected: Vec<Point> = [
            (2, 0),
            (2, 1),
            (3, 1),
            (4, 1),
            (4, 2),
            (4, 3),
            (3, 3),
            (2, 3),
            (2, 4),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
        assert_eq!(res.path, expected);
        assert_eq!(res.hops, 8);
        assert_contiguous(&res.path);
    }

    #[test]
    fn test_basic_no_route() {
        let map: WallMap = "
            ##.##
            #...#
            #####
            #...#
            ##.##
        "
        .parse()
        .unwrap();

        assert!(matches!(
            solve_map(&map),
            Err(SolveError::Unreachable { start, end })
                if start == Point::new(2, 0) && end == Point::new(2, 4)
        ));
    }

    #[test]
    fn test_start_is_goal() {
        let map: WallMap = "
            ##.##
            #...#
            #####
        "
        .parse()
        .unwrap();

        let res = solve_map(&map).unwrap();
        assert_eq!(res.path, vec![Point::new(2, 0)]);
        assert_eq!(res.hops, 0);
    }

    #[test]
    fn test_endpoint_on_wall_is_rejected() {
        let map = create_basic_map();
        let bounds = BoundingBox {
            l: Point::new(0, 0),
            r: Point::new(4, 4),
        };

        assert!(matches!(
            solve(&map, bounds, Point::new(0, 0), Point::new(2, 4)),
            Err(SolveError::Degenerate(DegenerateReason::EndpointOutsideFrame(p)))
                if p == Point::new(0, 0)
        ));
    }

    #[test]
    fn test_search_stays_inside_frame() {
        // the bottom row would connect both sides but lies outside the frame
        let map: WallMap = "
            ..#..
            ..#..
            .....
        "
        .parse()
        .unwrap();
        let bounds = BoundingBox {
            l: Point::new(0, 0),
            r: Point::new(4, 1),
        };

        assert!(matches!(
            solve(&map, bounds, Point::new(0, 0), Point::new(4, 0)),
            Err(SolveError::Unreachable { .. })
        ));

        let whole = BoundingBox {
            l: Point::new(0, 0),
            r: Point::new(4, 2),
        };
        let res = solve(&map, whole, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert_eq!(res.hops, 8);
    }

    #[test]
    fn test_each_cell_enqueued_once() {
        let map: WallMap = "
            ###.#####
            #.......#
            #.#.###.#
            #.#...#.#
            #.###.#.#
            #.......#
            #######.#
        "
        .parse()
        .unwrap();
        let (bounds, ends) = locate_maze(&map).unwrap();
        let mut finder = PathFinder::new(&map, bounds, ends.start, ends.end).unwrap();

        while !finder.step().is_done() {}

        let unique: HashSet<Point> = finder.nodes().iter().map(|n| n.point).collect();
        assert_eq!(unique.len(), finder.nodes().len());
        assert!(finder.is_visited(ends.end));
        assert_eq!(finder.start(), Point::new(3, 0));
        assert_eq!(finder.goal(), Point::new(7, 6));
        assert_eq!(finder.nodes()[0].point, finder.start());
        assert!(matches!(finder.state(), PathFinderState::PathFound(_)));
    }

    #[test]
    fn test_matches_brute_force() {
        let maps = [
            create_basic_map(),
            create_detour_map(),
            "
            #.#######
            #.....#.#
            #.###.#.#
            #...#...#
            ###.#####
            #.......#
            #####.###
            "
            .parse()
            .unwrap(),
            "
            ####.####
            #.......#
            #.#.#.#.#
            #.......#
            #.#.#.#.#
            #.......#
            #.#######
            "
            .parse()
            .unwrap(),
        ];

        for map in &maps {
            let (bounds, ends) = locate_maze(map).unwrap();
            let res = solve(map, bounds, ends.start, ends.end).unwrap();
            let expected = brute_force_distance(map, &bounds, ends.start, ends.end).unwrap();

            assert_eq!(res.hops, expected, "\n{}", map);
            assert_eq!(res.path.len(), res.hops + 1);
            assert_contiguous(&res.path);
            assert!(res.path.iter().all(|p| map.is_open(*p)));
        }
    }

    #[test]
    fn test_generated_maps_match_brute_force() {
        let mut solved = 0;

        for seed in 1..=40u64 {
            let map = generated_map(7 + (seed as usize % 6), seed * 0x9E37_79B9);
            let (bounds, ends) = locate_maze(&map).unwrap();
            let expected = brute_force_distance(&map, &bounds, ends.start, ends.end);

            match (solve(&map, bounds, ends.start, ends.end), expected) {
                (Ok(res), Some(hops)) => {
                    assert_eq!(res.hops, hops, "seed {}\n{}", seed, map);
                    assert_contiguous(&res.path);
                    solved += 1;
                }
                (Err(SolveError::Unreachable { .. }), None) => {}
                (res, expected) => {
                    panic!("seed {}: got {:?}, expected {:?}\n{}", seed, res, expected, map)
                }
            }
        }

        // the wall density leaves most of these solvable
        assert!(solved > 0);
    }

    #[test]
    fn test_north_first_tie_break() {
        // two equally short routes, north/south are tried before east/west
        let map: WallMap = "
            #.###
            #...#
            #.#.#
            #...#
            ###.#
        "
        .parse()
        .unwrap();
        let res = solve_map(&map).unwrap();

        let expected: Vec<Point> = [(1, 0), (1, 1), (1, 2), (1, 3), (2, 3), (3, 3), (3, 4)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        assert_eq!(res.path, expected);
    }
}
