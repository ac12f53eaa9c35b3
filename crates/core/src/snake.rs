//! Movement module - snake head movement, collisions and food fallback
//!
//! Coordinates are pixels on a board of `cols x rows` tiles, each `tile_size`
//! pixels wide; every body segment and food position is a multiple of the tile
//! size. Directions are unit vectors (see [`Direction::delta`]), with `(0, 0)`
//! meaning "not moving yet".
//!
//! [`Direction::delta`]: crate::types::Direction::delta

use std::collections::HashSet;

use crate::types::Point;

/// True when `next` would turn the snake back onto its own neck.
///
/// Any turn is allowed from a stationary direction.
pub fn is_reverse_direction(current: Point, next: Point) -> bool {
    (next.x != 0 && current.x != 0) || (next.y != 0 && current.y != 0)
}

/// Head position after one step
pub fn move_head(head: Point, direction: Point, tile_size: i32) -> Point {
    Point::new(
        head.x + direction.x * tile_size,
        head.y + direction.y * tile_size,
    )
}

/// True when `point` lies outside `[0, width) x [0, height)`
pub fn is_wall_collision(point: Point, width: i32, height: i32) -> bool {
    point.x < 0 || point.x >= width || point.y < 0 || point.y >= height
}

/// True when `point` coincides with any body segment
pub fn is_self_collision<'a, I>(point: Point, body: I) -> bool
where
    I: IntoIterator<Item = &'a Point>,
{
    body.into_iter().any(|s| *s == point)
}

/// True when the snake covers every tile of the board
pub fn is_grid_full(body_len: usize, cols: i32, rows: i32) -> bool {
    body_len as i64 >= cols as i64 * rows as i64
}

/// First free tile in a deterministic scan starting at (0, 0).
///
/// The column index is the outer loop, so after (0, 0) the scan tries
/// (0, tile_size) before (tile_size, 0). Returns `None` when the board is full.
pub fn find_first_empty_tile(
    cols: i32,
    rows: i32,
    tile_size: i32,
    occupied: &HashSet<Point>,
) -> Option<Point> {
    for x in 0..cols {
        for y in 0..rows {
            let tile = Point::new(x * tile_size, y * tile_size);
            if !occupied.contains(&tile) {
                return Some(tile);
            }
        }
    }
    None
}
