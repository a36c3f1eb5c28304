use std::sync::Arc;

use super::game_grid::GameGrid;
use super::location::{Location, FULL_CIRCLE};
use super::sprite::{Glyph, Sprite};
use super::ActorId;

/// Per-actor update logic, called once per tick by `GameGrid::act_all`.
///
/// The behaviour is detached from its actor while it runs, so it can borrow
/// the whole grid mutably, including its own actor through `me`.
pub trait Behaviour<K> {
    fn act(&mut self, me: ActorId, grid: &mut GameGrid<K>);

    /// Called by `GameGrid::do_reset` after the actor is back at its start.
    fn reset(&mut self, _me: ActorId, _grid: &mut GameGrid<K>) {}
}

/// A sprite-backed entity living on a `GameGrid`
pub struct Actor<K> {
    kind: K,
    location: Location,
    location_start: Location,
    direction: f64,
    direction_start: f64,
    rotatable: bool,
    rotation_index: usize,
    sprites: Vec<Arc<Sprite>>,
    id_visible: Option<usize>,
    act_enabled: bool,
    collision_enabled: bool,
    slow_down: u32,
    step_count: u32,
    pub(super) behaviour: Option<Box<dyn Behaviour<K>>>,
}

impl<K: Copy> Actor<K> {
    /// Creates an actor showing its first sprite frame.
    ///
    /// The actor is rotatable if its sprites were loaded as rotatable.
    pub fn new(kind: K, sprites: Vec<Arc<Sprite>>) -> Self {
        let rotatable = sprites.first().is_some_and(|s| s.is_rotatable());
        let id_visible = if sprites.is_empty() { None } else { Some(0) };

        Self {
            kind,
            location: Location::default(),
            location_start: Location::default(),
            direction: 0.0,
            direction_start: 0.0,
            rotatable,
            rotation_index: 0,
            sprites,
            id_visible,
            act_enabled: true,
            collision_enabled: true,
            slow_down: 0,
            step_count: 0,
            behaviour: None,
        }
    }

    pub fn with_behaviour(mut self, behaviour: impl Behaviour<K> + 'static) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn x(&self) -> i32 {
        self.location.x
    }

    pub fn y(&self) -> i32 {
        self.location.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.location.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.location.y = y;
    }

    pub fn location_start(&self) -> Location {
        self.location_start
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn direction_start(&self) -> f64 {
        self.direction_start
    }

    /// Sets the heading in degrees, normalised into `[0, 360)`
    pub fn set_direction(&mut self, direction: f64) {
        let direction = direction.rem_euclid(FULL_CIRCLE);
        self.direction = direction;
        if self.rotatable {
            self.rotation_index = ((1000.0 * direction) as usize) / 5625;
        }
    }

    pub fn turn(&mut self, angle: f64) {
        self.set_direction(self.direction + angle);
    }

    pub fn rotation_index(&self) -> usize {
        self.rotation_index
    }

    pub fn is_rotatable(&self) -> bool {
        self.rotatable
    }

    /// Cell the actor would reach with one `move`.
    ///
    /// Small grids step to one of the 8 neighbours; large grids jump 5 cells.
    pub fn next_location(&self, small_grid: bool) -> Location {
        if small_grid {
            self.location.neighbour_location(self.direction)
        } else {
            self.location.adjacent_location(self.direction, 5)
        }
    }

    pub fn nb_sprites(&self) -> usize {
        self.sprites.len()
    }

    /// Glyph of the visible frame, if any
    pub fn glyph(&self) -> Option<&Glyph> {
        self.id_visible
            .and_then(|id| self.sprites.get(id))
            .map(|sprite| sprite.glyph(self.rotation_index))
    }

    /// Makes the given frame the visible one
    pub fn show(&mut self, sprite_id: usize) {
        self.set_sprite_visible(sprite_id, true);
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.set_sprite_visible(0, true);
        } else {
            self.id_visible = None;
        }
    }

    /// Out of range frame ids fall back to frame 0
    pub fn set_sprite_visible(&mut self, sprite_id: usize, visible: bool) {
        if !visible {
            self.id_visible = None;
        } else if self.sprites.is_empty() {
            self.id_visible = None;
        } else if sprite_id < self.sprites.len() {
            self.id_visible = Some(sprite_id);
        } else {
            self.id_visible = Some(0);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.id_visible.is_some()
    }

    pub fn id_visible(&self) -> Option<usize> {
        self.id_visible
    }

    pub fn set_act_enabled(&mut self, enabled: bool) {
        self.act_enabled = enabled;
    }

    pub fn is_act_enabled(&self) -> bool {
        self.act_enabled
    }

    /// Actors with collisions disabled are left out of
    /// `GameGrid::collision_candidates_at`
    pub fn set_collision_enabled(&mut self, enabled: bool) {
        self.collision_enabled = enabled;
    }

    pub fn is_collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    /// Act only every `factor + 1` ticks
    pub fn set_slow_down(&mut self, factor: u32) {
        self.slow_down = factor;
        self.step_count = factor;
    }

    pub fn has_behaviour(&self) -> bool {
        self.behaviour.is_some()
    }

    /// Counts down the slow-down and reports whether this tick is an acting one
    pub(super) fn take_act_turn(&mut self) -> bool {
        if self.step_count == 0 {
            self.step_count = self.slow_down;
            true
        } else {
            self.step_count -= 1;
            false
        }
    }

    pub(super) fn init_start(&mut self) {
        self.location_start = self.location;
        self.direction_start = self.direction;
    }

    pub(super) fn restore_start(&mut self) {
        self.location = self.location_start;
        self.set_direction(self.direction_start);
        self.set_visible(true);
        self.collision_enabled = true;
        self.step_count = self.slow_down;
    }
}
