use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Head-first body plus an occupancy index for O(1) collision checks.
#[derive(Clone, Debug)]
pub struct Snake {
    pub body: VecDeque<Point>,
    pub body_set: HashSet<Point>,
    pub direction: Direction,
    pub pending_direction: Option<Direction>,
}

impl Snake {
    /// Builds a snake of `length` segments with the body trailing away from
    /// `direction`, wrapping around the grid edges if necessary.
    pub fn new(head: Point, direction: Direction, length: usize, cols: usize, rows: usize) -> Self {
        let (dx, dy): (i64, i64) = match direction {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (1, 0),
            Direction::Right => (-1, 0),
        };

        let mut body = VecDeque::with_capacity(length);
        let mut body_set = HashSet::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            body_set.insert(segment);
            segment = Point::new(
                ((segment.x as i64 + dx).rem_euclid(cols as i64)) as usize,
                ((segment.y as i64 + dy).rem_euclid(rows as i64)) as usize,
            );
        }

        Self {
            body,
            body_set,
            direction,
            pending_direction: None,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: &Point) -> bool {
        self.body_set.contains(pos)
    }

    pub fn advance(&mut self, new_head: Point) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);
    }

    /// Removes and returns the tail segment.
    pub fn retract(&mut self) -> Point {
        let tail = self
            .body
            .pop_back()
            .expect("Snake body should never be empty");
        self.body_set.remove(&tail);
        tail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snake_trails_away_from_direction() {
        let snake = Snake::new(Point::new(5, 10), Direction::Right, 3, 20, 20);

        let body: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![Point::new(5, 10), Point::new(4, 10), Point::new(3, 10)]
        );
        assert_eq!(snake.direction, Direction::Right);
        assert!(snake.pending_direction.is_none());
    }

    #[test]
    fn test_new_snake_wraps_trailing_segments() {
        let snake = Snake::new(Point::new(0, 0), Direction::Right, 3, 20, 20);

        let body: Vec<Point> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![Point::new(0, 0), Point::new(19, 0), Point::new(18, 0)]
        );
    }

    #[test]
    fn test_advance_and_retract_keep_index_in_sync() {
        let mut snake = Snake::new(Point::new(5, 5), Direction::Right, 3, 20, 20);

        snake.advance(Point::new(6, 5));
        assert_eq!(snake.len(), 4);
        assert!(snake.contains(&Point::new(6, 5)));

        let tail = snake.retract();
        assert_eq!(tail, Point::new(3, 5));
        assert_eq!(snake.len(), 3);
        assert!(!snake.contains(&Point::new(3, 5)));
    }
}
