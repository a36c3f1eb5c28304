use std::time::Duration;

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

use super::actor::{Actor, Behaviour};
use super::error::GridError;
use super::location::Location;
use super::ActorId;

/// Default simulation period of a fresh grid
pub const DEFAULT_SIMULATION_PERIOD: Duration = Duration::from_millis(200);

/// Grids up to this many cells move actors cell by cell
const SMALL_GRID_CELLS: i64 = 900;

/// Largest number of cells along either side of a grid
pub const MAX_GRID_SIDE: i32 = 1000;

/// Random draws before `random_empty_location` falls back to a full scan
const SAMPLE_ATTEMPTS: usize = 64;

/// Whether the simulation clock is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Paused,
    Running,
    /// Run exactly one tick, then pause
    SingleStep,
}

/// A rectangular grid of cells holding a scene of actors.
///
/// Actors are owned by the grid and addressed by `ActorId`. The scene keeps
/// insertion order, which is both the act order and the paint order (later
/// actors are drawn on top).
pub struct GameGrid<K> {
    nb_horz_cells: i32,
    nb_vert_cells: i32,
    actors: SlotMap<ActorId, Actor<K>>,
    scene: Vec<ActorId>,
    simulation_period: Duration,
    state: SimulationState,
    title: String,
    rng: StdRng,
}

impl<K: Copy + PartialEq + 'static> GameGrid<K> {
    pub fn new(nb_horz_cells: i32, nb_vert_cells: i32) -> Result<Self, GridError> {
        Self::with_seed(nb_horz_cells, nb_vert_cells, None)
    }

    /// Creates a grid whose random placements are reproducible when seeded
    pub fn with_seed(
        nb_horz_cells: i32,
        nb_vert_cells: i32,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let side = 1..=MAX_GRID_SIDE;
        if !side.contains(&nb_horz_cells) || !side.contains(&nb_vert_cells) {
            return Err(GridError::InvalidDimensions {
                width: nb_horz_cells,
                height: nb_vert_cells,
            });
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            nb_horz_cells,
            nb_vert_cells,
            actors: SlotMap::with_key(),
            scene: Vec::new(),
            simulation_period: DEFAULT_SIMULATION_PERIOD,
            state: SimulationState::Paused,
            title: String::new(),
            rng,
        })
    }

    pub fn nb_horz_cells(&self) -> i32 {
        self.nb_horz_cells
    }

    pub fn nb_vert_cells(&self) -> i32 {
        self.nb_vert_cells
    }

    fn is_small(&self) -> bool {
        i64::from(self.nb_horz_cells) * i64::from(self.nb_vert_cells) <= SMALL_GRID_CELLS
    }

    // ---- scene -------------------------------------------------------------

    pub fn add_actor(&mut self, actor: Actor<K>, location: Location) -> ActorId {
        self.add_actor_with_direction(actor, location, 0.0)
    }

    /// Places an actor and records its start location and direction for
    /// `do_reset`
    pub fn add_actor_with_direction(
        &mut self,
        mut actor: Actor<K>,
        location: Location,
        direction: f64,
    ) -> ActorId {
        actor.set_location(location);
        actor.set_direction(direction);
        actor.init_start();
        let id = self.actors.insert(actor);
        self.scene.push(id);
        id
    }

    /// Moves an existing actor to the end of the scene (top of paint order)
    /// and resets its start state to `location`.
    pub fn readd_actor(&mut self, id: ActorId, location: Location, direction: f64) -> bool {
        let Some(actor) = self.actors.get_mut(id) else {
            return false;
        };
        actor.set_location(location);
        actor.set_direction(direction);
        actor.init_start();
        self.scene.retain(|&other| other != id);
        self.scene.push(id);
        true
    }

    pub fn remove_actor(&mut self, id: ActorId) -> bool {
        if self.actors.remove(id).is_some() {
            self.scene.retain(|&other| other != id);
            true
        } else {
            false
        }
    }

    pub fn remove_all_actors(&mut self) -> usize {
        let count = self.scene.len();
        self.actors.clear();
        self.scene.clear();
        count
    }

    /// Removes every actor of the given kind, returning how many went
    pub fn remove_actors(&mut self, kind: K) -> usize {
        let ids = self.actors_of(kind);
        ids.into_iter().filter(|&id| self.remove_actor(id)).count()
    }

    pub fn remove_actors_at(&mut self, location: Location, kind: Option<K>) -> usize {
        let ids = self.actors_at(location, kind);
        ids.into_iter().filter(|&id| self.remove_actor(id)).count()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor<K>> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor<K>> {
        self.actors.get_mut(id)
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.actors.contains_key(id)
    }

    /// All actors in scene order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor<K>)> + '_ {
        self.scene
            .iter()
            .filter_map(move |&id| self.actors.get(id).map(|actor| (id, actor)))
    }

    pub fn actors_of(&self, kind: K) -> Vec<ActorId> {
        self.actors()
            .filter(|(_, actor)| actor.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Actors at a cell, optionally restricted to one kind
    pub fn actors_at(&self, location: Location, kind: Option<K>) -> Vec<ActorId> {
        self.actors()
            .filter(|(_, actor)| actor.location() == location)
            .filter(|(_, actor)| kind.map_or(true, |k| actor.kind() == k))
            .map(|(id, _)| id)
            .collect()
    }

    /// Actors at a cell that take part in collisions
    pub fn collision_candidates_at(&self, location: Location, kind: Option<K>) -> Vec<ActorId> {
        self.actors_at(location, kind)
            .into_iter()
            .filter(|&id| self.actors.get(id).is_some_and(|a| a.is_collision_enabled()))
            .collect()
    }

    /// Actors in the cells around `id` that intersect a circle of `distance`
    /// cells, see `Location::neighbour_locations`. Actors sharing its cell
    /// are not included.
    pub fn neighbours(&self, id: ActorId, distance: f64, kind: Option<K>) -> Vec<ActorId> {
        let Some(center) = self.location(id) else {
            return Vec::new();
        };
        center
            .neighbour_locations(distance)
            .into_iter()
            .flat_map(|loc| self.actors_at(loc, kind))
            .collect()
    }

    pub fn one_actor_at(&self, location: Location, kind: Option<K>) -> Option<ActorId> {
        self.actors()
            .find(|(_, actor)| {
                actor.location() == location && kind.map_or(true, |k| actor.kind() == k)
            })
            .map(|(id, _)| id)
    }

    pub fn number_of_actors(&self) -> usize {
        self.scene.len()
    }

    pub fn number_of_actors_of(&self, kind: K) -> usize {
        self.actors().filter(|(_, actor)| actor.kind() == kind).count()
    }

    pub fn number_of_actors_at(&self, location: Location, kind: Option<K>) -> usize {
        self.actors_at(location, kind).len()
    }

    pub fn is_empty(&self, location: Location) -> bool {
        self.one_actor_at(location, None).is_none()
    }

    pub fn location(&self, id: ActorId) -> Option<Location> {
        self.actors.get(id).map(|actor| actor.location())
    }

    pub fn set_location(&mut self, id: ActorId, location: Location) -> Result<(), GridError> {
        let actor = self
            .actors
            .get_mut(id)
            .ok_or(GridError::UnknownActor(id))?;
        actor.set_location(location);
        Ok(())
    }

    // ---- geometry ----------------------------------------------------------

    pub fn is_in_grid(&self, location: Location) -> bool {
        (0..self.nb_horz_cells).contains(&location.x) && (0..self.nb_vert_cells).contains(&location.y)
    }

    pub fn is_at_border(&self, location: Location) -> bool {
        location.x == 0
            || location.x == self.nb_horz_cells - 1
            || location.y == 0
            || location.y == self.nb_vert_cells - 1
    }

    /// Whether the actor stands on a border row or column
    pub fn is_near_border(&self, id: ActorId) -> bool {
        self.location(id).is_some_and(|loc| self.is_at_border(loc))
    }

    fn cells(&self) -> impl Iterator<Item = Location> {
        let (w, h) = (self.nb_horz_cells, self.nb_vert_cells);
        (0..h).flat_map(move |y| (0..w).map(move |x| Location::new(x, y)))
    }

    /// Occupied cells in row-major order
    pub fn occupied_locations(&self) -> Vec<Location> {
        self.cells().filter(|&loc| !self.is_empty(loc)).collect()
    }

    /// Free cells in row-major order
    pub fn empty_locations(&self) -> Vec<Location> {
        self.cells().filter(|&loc| self.is_empty(loc)).collect()
    }

    pub fn random_location(&mut self) -> Location {
        Location::new(
            self.rng.gen_range(0..self.nb_horz_cells),
            self.rng.gen_range(0..self.nb_vert_cells),
        )
    }

    /// A random free cell, or `None` when every cell is taken
    pub fn random_empty_location(&mut self) -> Option<Location> {
        let max = Location::new(self.nb_horz_cells - 1, self.nb_vert_cells - 1);
        self.random_empty_location_in(Location::new(0, 0), max)
    }

    /// A random free cell inside the inclusive rectangle `min..=max`.
    ///
    /// Samples a bounded number of times, then scans the rectangle so a
    /// nearly full board still terminates.
    pub fn random_empty_location_in(&mut self, min: Location, max: Location) -> Option<Location> {
        let min = Location::new(min.x.max(0), min.y.max(0));
        let max = Location::new(
            max.x.min(self.nb_horz_cells - 1),
            max.y.min(self.nb_vert_cells - 1),
        );
        if min.x > max.x || min.y > max.y {
            return None;
        }

        for _ in 0..SAMPLE_ATTEMPTS {
            let candidate = Location::new(
                self.rng.gen_range(min.x..=max.x),
                self.rng.gen_range(min.y..=max.y),
            );
            if self.is_empty(candidate) {
                return Some(candidate);
            }
        }

        let free: Vec<Location> = (min.y..=max.y)
            .flat_map(|y| (min.x..=max.x).map(move |x| Location::new(x, y)))
            .filter(|&loc| self.is_empty(loc))
            .collect();
        if !free.is_empty() {
            warn!(
                "random sampling found no free cell after {SAMPLE_ATTEMPTS} draws, scanned {} free cells",
                free.len()
            );
        }
        free.choose(&mut self.rng).copied()
    }

    // ---- actor motion ------------------------------------------------------

    /// Moves an actor one step along its heading (8-way on small grids)
    pub fn move_actor(&mut self, id: ActorId) -> Result<Location, GridError> {
        let small = self.is_small();
        let actor = self
            .actors
            .get_mut(id)
            .ok_or(GridError::UnknownActor(id))?;
        let next = actor.next_location(small);
        actor.set_location(next);
        Ok(next)
    }

    /// Whether the next `move_actor` keeps the actor inside the grid
    pub fn is_move_valid(&self, id: ActorId) -> bool {
        self.actors
            .get(id)
            .is_some_and(|actor| self.is_in_grid(actor.next_location(self.is_small())))
    }

    // ---- simulation control ------------------------------------------------

    pub fn simulation_period(&self) -> Duration {
        self.simulation_period
    }

    /// Sets the tick period; anything under a millisecond is clamped up
    pub fn set_simulation_period(&mut self, period: Duration) {
        let period = period.max(Duration::from_millis(1));
        if period != self.simulation_period {
            debug!("simulation period {:?} -> {:?}", self.simulation_period, period);
        }
        self.simulation_period = period;
    }

    pub fn simulation_state(&self) -> SimulationState {
        self.state
    }

    pub fn do_run(&mut self) {
        self.state = SimulationState::Running;
    }

    pub fn do_pause(&mut self) {
        self.state = SimulationState::Paused;
    }

    pub fn do_step(&mut self) {
        self.state = SimulationState::SingleStep;
    }

    pub fn is_running(&self) -> bool {
        self.state != SimulationState::Paused
    }

    pub fn is_paused(&self) -> bool {
        self.state == SimulationState::Paused
    }

    /// Whether the coming tick should run; a single step is consumed here
    pub fn take_tick(&mut self) -> bool {
        match self.state {
            SimulationState::Running => true,
            SimulationState::SingleStep => {
                self.state = SimulationState::Paused;
                true
            }
            SimulationState::Paused => false,
        }
    }

    /// Pauses and puts every actor back where it started
    pub fn do_reset(&mut self) {
        self.do_pause();
        for id in self.scene.clone() {
            if let Some(actor) = self.actors.get_mut(id) {
                actor.restore_start();
            }
            self.with_behaviour(id, |behaviour, grid| behaviour.reset(id, grid));
        }
    }

    /// Runs one tick of every actor's behaviour, in scene order.
    ///
    /// Actors removed or added by a behaviour during the tick are skipped or
    /// deferred to the next tick respectively.
    pub fn act_all(&mut self) {
        for id in self.scene.clone() {
            let Some(actor) = self.actors.get_mut(id) else {
                continue;
            };
            if !actor.is_act_enabled() || !actor.take_act_turn() {
                continue;
            }
            self.with_behaviour(id, |behaviour, grid| behaviour.act(id, grid));
        }
    }

    fn with_behaviour(
        &mut self,
        id: ActorId,
        f: impl FnOnce(&mut Box<dyn Behaviour<K>>, &mut Self),
    ) {
        let Some(mut behaviour) = self.actors.get_mut(id).and_then(|a| a.behaviour.take()) else {
            return;
        };
        f(&mut behaviour, self);
        if let Some(actor) = self.actors.get_mut(id) {
            actor.behaviour = Some(behaviour);
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::sprite::SpriteStore;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Fish,
        Rock,
    }

    fn actor(kind: Kind) -> Actor<Kind> {
        let mut store = SpriteStore::default();
        Actor::new(kind, vec![store.get("sprites/apple.png", false).unwrap()])
    }

    /// Swims back and forth between the left and right border
    struct Fish {
        ds: i32,
    }

    impl Behaviour<Kind> for Fish {
        fn act(&mut self, me: ActorId, grid: &mut GameGrid<Kind>) {
            let width = grid.nb_horz_cells();
            let actor = grid.actor_mut(me).unwrap();
            if actor.x() == width - 1 {
                self.ds = -1;
            }
            if actor.x() == 0 {
                self.ds = 1;
            }
            actor.set_x(actor.x() + self.ds);
        }

        fn reset(&mut self, _me: ActorId, _grid: &mut GameGrid<Kind>) {
            self.ds = 1;
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(GameGrid::<Kind>::new(0, 5).is_err());
        assert_eq!(
            GameGrid::<Kind>::new(50_000, 50_000).err(),
            Some(GridError::InvalidDimensions {
                width: 50_000,
                height: 50_000
            })
        );
    }

    #[test]
    fn test_largest_grid_moves_in_long_steps() {
        let mut grid = GameGrid::new(MAX_GRID_SIDE, MAX_GRID_SIDE).unwrap();
        let fish = grid.add_actor(actor(Kind::Fish), Location::new(0, 0));
        assert_eq!(grid.move_actor(fish).unwrap(), Location::new(5, 0));
    }

    #[test]
    fn test_readd_actor_goes_on_top() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor(actor(Kind::Fish), Location::new(1, 1));
        let rock = grid.add_actor(actor(Kind::Rock), Location::new(2, 2));

        assert!(grid.readd_actor(fish, Location::new(6, 3), 90.0));
        let order: Vec<ActorId> = grid.actors().map(|(id, _)| id).collect();
        assert_eq!(order, vec![rock, fish]);

        let moved = grid.actor(fish).unwrap();
        assert_eq!(moved.location_start(), Location::new(6, 3));
        assert_eq!(moved.direction_start(), 90.0);

        grid.set_location(fish, Location::new(0, 0)).unwrap();
        grid.do_reset();
        assert_eq!(grid.location(fish), Some(Location::new(6, 3)));

        grid.remove_actor(rock);
        assert!(!grid.readd_actor(rock, Location::new(0, 0), 0.0));
    }

    #[test]
    fn test_remove_actors_at_keeps_other_kinds() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let cell = Location::new(4, 4);
        let fish = grid.add_actor(actor(Kind::Fish), cell);
        grid.add_actor(actor(Kind::Rock), cell);
        grid.add_actor(actor(Kind::Rock), cell);
        grid.add_actor(actor(Kind::Rock), Location::new(5, 4));

        assert_eq!(grid.number_of_actors_at(cell, None), 3);
        assert_eq!(grid.remove_actors_at(cell, Some(Kind::Rock)), 2);
        assert_eq!(grid.actors_at(cell, None), vec![fish]);
        assert_eq!(grid.number_of_actors_at(Location::new(5, 4), Some(Kind::Rock)), 1);

        assert_eq!(grid.remove_all_actors(), 2);
        assert_eq!(grid.number_of_actors(), 0);
        assert!(grid.occupied_locations().is_empty());
    }

    #[test]
    fn test_random_location_stays_in_grid() {
        let mut grid = GameGrid::<Kind>::with_seed(3, 7, Some(11)).unwrap();
        for _ in 0..100 {
            let loc = grid.random_location();
            assert!(grid.is_in_grid(loc));
        }
    }

    #[test]
    fn test_reset_restores_visibility_and_collisions() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let rock = grid.add_actor(actor(Kind::Rock), Location::new(3, 3));
        {
            let actor = grid.actor_mut(rock).unwrap();
            actor.set_visible(false);
            actor.set_collision_enabled(false);
        }
        assert!(grid.collision_candidates_at(Location::new(3, 3), None).is_empty());

        grid.do_reset();

        let actor = grid.actor(rock).unwrap();
        assert!(actor.is_visible());
        assert!(actor.is_collision_enabled());
        assert_eq!(grid.collision_candidates_at(Location::new(3, 3), None), vec![rock]);
    }

    #[test]
    fn test_neighbours() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor(actor(Kind::Fish), Location::new(0, 4));
        let beside = grid.add_actor(actor(Kind::Rock), Location::new(1, 4));
        let diagonal = grid.add_actor(actor(Kind::Rock), Location::new(1, 5));
        grid.add_actor(actor(Kind::Rock), Location::new(0, 4));
        grid.add_actor(actor(Kind::Rock), Location::new(3, 4));

        let mut near = grid.neighbours(fish, 1.0, Some(Kind::Rock));
        near.sort();
        let mut expected = vec![beside, diagonal];
        expected.sort();
        assert_eq!(near, expected);

        assert_eq!(grid.neighbours(fish, 0.5, None), vec![beside]);
        assert!(grid.is_near_border(fish));
        assert!(!grid.is_near_border(beside));
    }

    #[test]
    fn test_scene_queries() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor(actor(Kind::Fish), Location::new(2, 4));
        let rock = grid.add_actor(actor(Kind::Rock), Location::new(2, 4));
        grid.add_actor(actor(Kind::Rock), Location::new(7, 7));

        assert_eq!(grid.number_of_actors(), 3);
        assert_eq!(grid.actors_at(Location::new(2, 4), None), vec![fish, rock]);
        assert_eq!(grid.one_actor_at(Location::new(2, 4), Some(Kind::Rock)), Some(rock));
        assert_eq!(grid.number_of_actors_of(Kind::Rock), 2);
        assert!(grid.is_empty(Location::new(0, 0)));
        assert_eq!(
            grid.occupied_locations(),
            vec![Location::new(2, 4), Location::new(7, 7)]
        );

        assert_eq!(grid.remove_actors(Kind::Rock), 2);
        assert!(!grid.remove_actor(rock));
        assert_eq!(grid.number_of_actors(), 1);
        assert!(grid.contains(fish));
    }

    #[test]
    fn test_borders() {
        let grid = GameGrid::<Kind>::new(5, 4).unwrap();
        assert!(grid.is_in_grid(Location::new(4, 3)));
        assert!(!grid.is_in_grid(Location::new(5, 3)));
        assert!(!grid.is_in_grid(Location::new(0, -1)));
        assert!(grid.is_at_border(Location::new(0, 2)));
        assert!(grid.is_at_border(Location::new(2, 3)));
        assert!(!grid.is_at_border(Location::new(2, 2)));
    }

    #[test]
    fn test_random_empty_location_avoids_actors() {
        let mut grid = GameGrid::with_seed(3, 3, Some(7)).unwrap();
        for loc in grid.empty_locations().into_iter().skip(1) {
            grid.add_actor(actor(Kind::Rock), loc);
        }

        // only (0, 0) is left
        for _ in 0..20 {
            assert_eq!(grid.random_empty_location(), Some(Location::new(0, 0)));
        }

        grid.add_actor(actor(Kind::Rock), Location::new(0, 0));
        assert_eq!(grid.random_empty_location(), None);
    }

    #[test]
    fn test_random_empty_location_in_rectangle() {
        let mut grid = GameGrid::<Kind>::with_seed(10, 10, Some(1)).unwrap();
        for _ in 0..50 {
            let loc = grid
                .random_empty_location_in(Location::new(1, 1), Location::new(3, 2))
                .unwrap();
            assert!((1..=3).contains(&loc.x));
            assert!((1..=2).contains(&loc.y));
        }
    }

    #[test]
    fn test_single_step() {
        let mut grid = GameGrid::<Kind>::new(4, 4).unwrap();
        assert!(!grid.take_tick());

        grid.do_step();
        assert!(grid.is_running());
        assert!(grid.take_tick());
        assert!(!grid.take_tick());
        assert!(grid.is_paused());

        grid.do_run();
        assert!(grid.take_tick());
        assert!(grid.take_tick());
    }

    #[test]
    fn test_simulation_period_clamped() {
        let mut grid = GameGrid::<Kind>::new(4, 4).unwrap();
        assert_eq!(grid.simulation_period(), DEFAULT_SIMULATION_PERIOD);
        grid.set_simulation_period(Duration::ZERO);
        assert_eq!(grid.simulation_period(), Duration::from_millis(1));
    }

    #[test]
    fn test_act_all_and_reset() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor(
            actor(Kind::Fish).with_behaviour(Fish { ds: 1 }),
            Location::new(2, 4),
        );

        for _ in 0..3 {
            grid.act_all();
        }
        assert_eq!(grid.location(fish), Some(Location::new(5, 4)));

        for _ in 0..10 {
            grid.act_all();
        }
        // bounced off the right border at x = 9
        assert_eq!(grid.location(fish), Some(Location::new(3, 4)));

        grid.do_reset();
        assert_eq!(grid.location(fish), Some(Location::new(2, 4)));
        grid.act_all();
        assert_eq!(grid.location(fish), Some(Location::new(3, 4)));
    }

    #[test]
    fn test_disabled_actor_does_not_act() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor(
            actor(Kind::Fish).with_behaviour(Fish { ds: 1 }),
            Location::new(2, 4),
        );
        grid.actor_mut(fish).unwrap().set_act_enabled(false);
        grid.act_all();
        assert_eq!(grid.location(fish), Some(Location::new(2, 4)));
    }

    #[test]
    fn test_move_actor_eight_way() {
        let mut grid = GameGrid::new(10, 10).unwrap();
        let fish = grid.add_actor_with_direction(actor(Kind::Fish), Location::new(0, 0), 45.0);

        assert!(grid.is_move_valid(fish));
        assert_eq!(grid.move_actor(fish).unwrap(), Location::new(1, 1));

        grid.set_location(fish, Location::new(0, 5)).unwrap();
        grid.actor_mut(fish).unwrap().set_direction(180.0);
        assert!(!grid.is_move_valid(fish));
    }
}
