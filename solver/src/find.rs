use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
    fmt::Debug,
    ops::{Add, Deref, DerefMut},
};

/// Represents an absolute cost value, accumulated along a route
pub trait Cost: Copy + Clone + Default + Ord + Add<Output = Self> + Debug + 'static {}

impl Cost for usize {}

/// Supertrait that collects all the requirements on the NodeReference values
/// Must be copy, comparable and not references (hence 'static)
pub trait NodeReference: Copy + Eq + Debug + 'static {}

pub trait MapTrait {
    /// The type that can be used to reference nodes in the map
    type Reference: NodeReference;

    /// The type that the map uses for storage
    type Storage<T: Default + Copy + Clone + 'static>: MapStorage<T, Reference = Self::Reference>;

    type Cost: Cost;

    /// Return an iterator over the neighbors of the provided node and the cost required to go there
    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Reference, Self::Cost)>;

    /// Estimated cost of the cheapest route between two nodes. Must never overestimate.
    fn estimate(&self, _from: Self::Reference, _to: Self::Reference) -> Self::Cost {
        Self::Cost::default()
    }

    /// Create a storage for values of type T
    fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> Self::Storage<T>;
}

pub trait MapStorage<T> {
    type Reference: NodeReference;

    fn get(&self, node: Self::Reference) -> T;
    fn get_mut(&mut self, node: Self::Reference) -> &mut T;
}

/// A node waiting in a frontier, together with the route that led to it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToVisit<C, R> {
    /// Key used by ordered frontiers, lower comes first
    pub rank: C,
    pub cost: C,
    pub point: R,
    pub from: Option<R>,
}

/// The discipline in which discovered nodes are handed back for expansion
pub trait Frontier<C: Cost, R: NodeReference> {
    fn push(&mut self, visit: ToVisit<C, R>);
    fn pop(&mut self) -> Option<ToVisit<C, R>>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a route of cost `candidate` should be queued, given the best cost `known` so far
    fn admits(&self, known: Option<C>, candidate: C) -> bool {
        known.map_or(true, |known| candidate < known)
    }
}

/// First in, first out. Nodes are only admitted the first time they are reached.
#[derive(Debug)]
pub struct Fifo<C, R>(VecDeque<ToVisit<C, R>>);

impl<C, R> Default for Fifo<C, R> {
    fn default() -> Self {
        Fifo(VecDeque::new())
    }
}

impl<C: Cost, R: NodeReference> Frontier<C, R> for Fifo<C, R> {
    fn push(&mut self, visit: ToVisit<C, R>) {
        self.0.push_back(visit);
    }

    fn pop(&mut self) -> Option<ToVisit<C, R>> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn admits(&self, known: Option<C>, _candidate: C) -> bool {
        known.is_none()
    }
}

/// Last in, first out. A node may be pushed again until it is expanded, the latest push wins.
#[derive(Debug)]
pub struct Lifo<C, R>(Vec<ToVisit<C, R>>);

impl<C, R> Default for Lifo<C, R> {
    fn default() -> Self {
        Lifo(Vec::new())
    }
}

impl<C: Cost, R: NodeReference> Frontier<C, R> for Lifo<C, R> {
    fn push(&mut self, visit: ToVisit<C, R>) {
        self.0.push(visit);
    }

    fn pop(&mut self) -> Option<ToVisit<C, R>> {
        self.0.pop()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn admits(&self, _known: Option<C>, _candidate: C) -> bool {
        true
    }
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct Ranked<C, R> {
    sequence: u64,
    visit: ToVisit<C, R>,
}

impl<C: Ord, R: Eq> Ord for Ranked<C, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for BinaryHeap to be a min-heap, equal ranks pop in insertion order
        other
            .visit
            .rank
            .cmp(&self.visit.rank)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<C: Ord, R: Eq> PartialOrd for Ranked<C, R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord, R: Eq> PartialEq for Ranked<C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Ord, R: Eq> Eq for Ranked<C, R> {}

/// Lowest rank first. A node is queued again only when reached through a strictly cheaper route.
#[derive(Debug)]
pub struct Priority<C, R> {
    heap: BinaryHeap<Ranked<C, R>>,
    pushed: u64,
}

impl<C: Ord, R: Eq> Default for Priority<C, R> {
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            pushed: 0,
        }
    }
}

impl<C: Cost, R: NodeReference> Frontier<C, R> for Priority<C, R> {
    fn push(&mut self, visit: ToVisit<C, R>) {
        self.heap.push(Ranked {
            sequence: self.pushed,
            visit,
        });
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<ToVisit<C, R>> {
        self.heap.pop().map(|ranked| ranked.visit)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// How the rank of a queued node is computed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ranking {
    /// Accumulated cost from the start
    Cost,
    /// Accumulated cost plus the map's estimate of the remaining cost to the goal
    CostPlusEstimate,
}

#[derive(Clone, Copy, Debug)]
pub struct VisitedItem<C, R> {
    pub cost: C,
    pub from: Option<R>,
}

#[derive(Clone, Copy, Debug)]
pub struct Visited<C, R>(Option<VisitedItem<C, R>>);

impl<C, R> Default for Visited<C, R> {
    fn default() -> Self {
        Visited(None)
    }
}
impl<C, R> Deref for Visited<C, R> {
    type Target = Option<VisitedItem<C, R>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl<C, R> DerefMut for Visited<C, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Debug, PartialEq, Clone, Eq)]
pub struct PathResult<C, R> {
    pub path: Vec<R>,
    pub start: R,
    pub goal: R,
    pub total_cost: C,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState<C, R> {
    Computing,
    NoPathFound,
    PathFound(PathResult<C, R>),
}

impl<C, R> PathFinderState<C, R> {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Graph search from `start` to `goal` over a [`MapTrait`].
///
/// The [`Frontier`] decides the search discipline (breadth-first, depth-first or best-first) and
/// the [`Ranking`] what "best" means for ordered frontiers. A node counts as visited the moment
/// it is popped and expanded; the expansion order is kept so it can be replayed.
pub struct PathFinder<M: MapTrait, F> {
    start: M::Reference,
    goal: M::Reference,
    ranking: Ranking,
    frontier: F,
    visited: M::Storage<Visited<M::Cost, M::Reference>>,
    best: M::Storage<Option<M::Cost>>,
    order: Vec<M::Reference>,
    state: PathFinderState<M::Cost, M::Reference>,
}

impl<M, F> PathFinder<M, F>
where
    M: MapTrait,
    F: Frontier<M::Cost, M::Reference>,
{
    pub fn new(
        map: &M,
        start: M::Reference,
        goal: M::Reference,
        mut frontier: F,
        ranking: Ranking,
    ) -> Self {
        let mut best = map.create_storage::<Option<M::Cost>>();
        *best.get_mut(start) = Some(M::Cost::default());

        let rank = match ranking {
            Ranking::Cost => M::Cost::default(),
            Ranking::CostPlusEstimate => map.estimate(start, goal),
        };
        frontier.push(ToVisit {
            rank,
            cost: Default::default(),
            point: start,
            from: None,
        });

        Self {
            start,
            goal,
            ranking,
            frontier,
            visited: map.create_storage(),
            best,
            order: Vec::new(),
            state: PathFinderState::Computing,
        }
    }

    /// Run until a path is found or the frontier is exhausted
    pub fn finish(
        mut self,
        map: &M,
    ) -> (PathFinderState<M::Cost, M::Reference>, Vec<M::Reference>) {
        loop {
            match self.step(map) {
                PathFinderState::Computing => {}
                s => return (s, self.order),
            }
        }
    }

    /// Pop and expand at most one node
    pub fn step(&mut self, map: &M) -> PathFinderState<M::Cost, M::Reference> {
        if self.state.is_done() {
            return self.state.clone();
        }

        let Some(visit) = self.frontier.pop() else {
            self.state = PathFinderState::NoPathFound;
            return self.state.clone();
        };

        // stale entry, a cheaper or earlier route already expanded this node
        if self.visited.get(visit.point).is_some() {
            return self.state.clone();
        }

        *self.visited.get_mut(visit.point) = Visited(Some(VisitedItem {
            cost: visit.cost,
            from: visit.from,
        }));
        self.order.push(visit.point);

        if visit.point == self.goal {
            self.state = PathFinderState::PathFound(PathResult {
                path: self.backtrack(),
                total_cost: visit.cost,
                start: self.start,
                goal: self.goal,
            });
            return self.state.clone();
        }

        for (point, move_cost) in map.neighbors_of(visit.point) {
            if self.visited.get(point).is_some() {
                continue;
            }

            let cost = visit.cost + move_cost;
            if !self.frontier.admits(self.best.get(point), cost) {
                continue;
            }
            *self.best.get_mut(point) = Some(cost);

            let rank = match self.ranking {
                Ranking::Cost => cost,
                Ranking::CostPlusEstimate => cost + map.estimate(point, self.goal),
            };
            self.frontier.push(ToVisit {
                rank,
                cost,
                point,
                from: Some(visit.point),
            });
        }

        self.state.clone()
    }

    /// Follow the recorded predecessors from the goal back to the start
    fn backtrack(&self) -> Vec<M::Reference> {
        let mut path = vec![self.goal];
        let mut current = self.goal;

        while let Some(VisitedItem {
            from: Some(from), ..
        }) = *self.visited.get(current)
        {
            path.push(from);
            current = from;
        }

        path.reverse();
        path
    }

    /// Nodes in the order they were expanded
    pub fn order(&self) -> &[M::Reference] {
        &self.order
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Map where leaving a cell costs that cell's weight, `None` cells are blocked
    struct WeightedMap {
        cells: Vec<Vec<Option<usize>>>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Node(usize, usize);

    impl NodeReference for Node {}

    struct NestedStorage<T>(Vec<Vec<T>>);

    impl<T: Copy + 'static> MapStorage<T> for NestedStorage<T> {
        type Reference = Node;

        fn get(&self, node: Node) -> T {
            self.0[node.0][node.1]
        }

        fn get_mut(&mut self, node: Node) -> &mut T {
            &mut self.0[node.0][node.1]
        }
    }

    impl MapTrait for WeightedMap {
        type Reference = Node;
        type Storage<T: Default + Copy + Clone + 'static> = NestedStorage<T>;
        type Cost = usize;

        fn neighbors_of(&self, node: Node) -> impl Iterator<Item = (Node, usize)> {
            let cost = self.cells[node.0][node.1];
            let rows = self.cells.len();
            let cols = self.cells[0].len();

            let mut points = Vec::with_capacity(4);
            if let Some(cost) = cost {
                if node.0 > 0 {
                    points.push((Node(node.0 - 1, node.1), cost));
                }
                if node.0 < rows - 1 {
                    points.push((Node(node.0 + 1, node.1), cost));
                }
                if node.1 > 0 {
                    points.push((Node(node.0, node.1 - 1), cost));
                }
                if node.1 < cols - 1 {
                    points.push((Node(node.0, node.1 + 1), cost));
                }
            }
            points.retain(|(p, _)| self.cells[p.0][p.1].is_some());
            points.into_iter()
        }

        fn create_storage<T: Default + Copy + Clone + 'static>(&self) -> NestedStorage<T> {
            let row = vec![T::default(); self.cells[0].len()];
            NestedStorage(vec![row; self.cells.len()])
        }
    }

    fn create_basic_map() -> WeightedMap {
        const X: Option<usize> = None;
        const O: Option<usize> = Some(1);
        WeightedMap {
            cells: vec![
                vec![X, X, X, X, X, X, X],
                vec![X, O, X, X, X, O, X],
                vec![X, O, X, X, X, O, X],
                vec![X, O, X, O, O, O, X],
                vec![X, O, X, O, X, X, X],
                vec![X, O, O, O, O, O, O],
                vec![X, X, X, X, X, X, X],
            ],
        }
    }

    fn run<F: Frontier<usize, Node>>(
        map: &WeightedMap,
        frontier: F,
        ranking: Ranking,
    ) -> (PathFinderState<usize, Node>, Vec<Node>) {
        PathFinder::new(map, Node(1, 1), Node(1, 5), frontier, ranking).finish(map)
    }

    #[test]
    fn test_basic_route() {
        let map = create_basic_map();

        assert!(matches!(
            run(&map, Priority::default(), Ranking::Cost).0,
            PathFinderState::PathFound(PathResult { total_cost: 12, .. })
        ));
    }

    #[test]
    fn test_basic_no_route() {
        let map = create_basic_map();

        let finder = PathFinder::new(&map, Node(1, 1), Node(0, 5), Fifo::default(), Ranking::Cost);
        let (state, order) = finder.finish(&map);
        assert!(matches!(state, PathFinderState::NoPathFound));
        // every open cell of the map is reachable from the start
        assert_eq!(order.len(), 16);
    }

    #[test]
    fn test_basic_shortcut() {
        let mut map = create_basic_map();

        // create higher cost shortcut
        for (shortcut, expected) in [(2, 9), (4, 11), (10, 12)] {
            map.cells[3][2] = Some(shortcut);

            assert!(matches!(
                run(&map, Priority::default(), Ranking::Cost).0,
                PathFinderState::PathFound(PathResult { total_cost, .. }) if total_cost == expected
            ));
            assert!(matches!(
                run(&map, Priority::default(), Ranking::CostPlusEstimate).0,
                PathFinderState::PathFound(PathResult { total_cost, .. }) if total_cost == expected
            ));
        }
    }

    #[test]
    fn test_breadth_first_ignores_cost() {
        let mut map = create_basic_map();
        map.cells[3][2] = Some(10);

        let PathFinderState::PathFound(result) = run(&map, Fifo::default(), Ranking::Cost).0 else {
            panic!("expected a path");
        };
        // fewest steps through the expensive shortcut
        assert_eq!(result.path.len(), 9);
        assert_eq!(result.total_cost, 17);
        assert!(result.path.contains(&Node(3, 2)));
    }

    #[test]
    fn test_depth_first_reaches_goal() {
        let map = create_basic_map();

        let (state, order) = run(&map, Lifo::default(), Ranking::Cost);
        let PathFinderState::PathFound(result) = state else {
            panic!("expected a path");
        };
        assert_eq!(result.path.first(), Some(&Node(1, 1)));
        assert_eq!(result.path.last(), Some(&Node(1, 5)));
        assert_eq!(order.last(), Some(&Node(1, 5)));
    }

    #[test]
    fn test_step_is_idempotent_after_done() {
        let map = create_basic_map();
        let mut finder = PathFinder::new(
            &map,
            Node(1, 1),
            Node(1, 1),
            Priority::default(),
            Ranking::Cost,
        );

        let first = finder.step(&map);
        assert!(first.is_done());
        assert_eq!(finder.step(&map), first);
        assert_eq!(finder.order(), &[Node(1, 1)]);
    }

    #[test]
    fn test_priority_ties_pop_in_insertion_order() {
        let mut frontier: Priority<usize, Node> = Priority::default();
        for (i, rank) in [3, 1, 1, 2, 1].into_iter().enumerate() {
            frontier.push(ToVisit {
                rank,
                cost: rank,
                point: Node(i, 0),
                from: None,
            });
        }

        let popped: Vec<_> = std::iter::from_fn(|| frontier.pop())
            .map(|v| v.point.0)
            .collect();
        assert_eq!(popped, vec![1, 2, 4, 3, 0]);
        assert!(frontier.is_empty());
    }
}
