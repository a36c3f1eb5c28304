use log::debug;

use super::config::GameConfig;
use super::state::{Piece, Skin, SnakeGrid};
use crate::grid::{Actor, ActorId, GridError, Location, SpriteStore};

/// A random free cell inside the playing field, `None` when it is full
pub fn place_food(grid: &mut SnakeGrid, config: &GameConfig) -> Option<Location> {
    grid.random_empty_location_in(config.playable_min(), config.playable_max())
}

/// Puts a new food actor on a free cell.
///
/// Returns `Ok(None)` when there is no room left.
pub fn spawn_food(
    grid: &mut SnakeGrid,
    store: &mut SpriteStore,
    skin: &Skin,
    config: &GameConfig,
) -> Result<Option<ActorId>, GridError> {
    let sprite = store.get(skin.food, false)?;
    let Some(cell) = place_food(grid, config) else {
        return Ok(None);
    };
    debug!("food placed at {cell}");
    Ok(Some(grid.add_actor(Actor::new(Piece::Food, vec![sprite]), cell)))
}

/// Moves eaten food to a new free cell, or returns `None` if the board is full
pub fn relocate_food(grid: &mut SnakeGrid, food: ActorId, config: &GameConfig) -> Option<Location> {
    let cell = place_food(grid, config)?;
    grid.set_location(food, cell).ok()?;
    debug!("food moved to {cell}");
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::Variant;

    fn grid(config: &GameConfig) -> SnakeGrid {
        SnakeGrid::with_seed(config.grid_width, config.grid_height, Some(3)).unwrap()
    }

    #[test]
    fn test_food_never_lands_on_an_occupied_cell() {
        let config = GameConfig::new(4, 4);
        let mut grid = grid(&config);
        let mut store = SpriteStore::default();
        let skin = Skin::for_variant(Variant::Classic);
        let body = store.get(skin.body, false).unwrap();

        // fill all but two cells
        let free = [Location::new(1, 2), Location::new(3, 3)];
        for cell in grid.empty_locations() {
            if !free.contains(&cell) {
                grid.add_actor(Actor::new(Piece::Body, vec![body.clone()]), cell);
            }
        }

        for _ in 0..30 {
            let cell = place_food(&mut grid, &config).unwrap();
            assert!(free.contains(&cell));
        }
    }

    #[test]
    fn test_food_stays_inside_the_walls() {
        let mut config = GameConfig::sneaky();
        config.grid_width = 5;
        config.grid_height = 5;
        let mut grid = grid(&config);

        for _ in 0..50 {
            let cell = place_food(&mut grid, &config).unwrap();
            assert!(config.is_playable(cell));
        }
    }

    #[test]
    fn test_spawn_and_relocate() {
        let config = GameConfig::new(3, 1);
        let mut grid = grid(&config);
        let mut store = SpriteStore::default();
        let skin = Skin::for_variant(Variant::Classic);

        let food = spawn_food(&mut grid, &mut store, &skin, &config)
            .unwrap()
            .unwrap();
        let first = grid.location(food).unwrap();

        let second = relocate_food(&mut grid, food, &config).unwrap();
        assert_ne!(first, second);

        // body segments fill every cell the food left free
        let body = store.get(skin.body, false).unwrap();
        for cell in grid.empty_locations() {
            grid.add_actor(Actor::new(Piece::Body, vec![body.clone()]), cell);
        }
        assert_eq!(relocate_food(&mut grid, food, &config), None);
        assert_eq!(spawn_food(&mut grid, &mut store, &skin, &config).unwrap(), None);
    }
}
