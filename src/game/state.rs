use rand::Rng;
use rand::seq::IteratorRandom;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position is inside a grid of the given size
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.x < width as i32 && self.y >= 0 && self.y < height as i32
    }
}

/// The snake: a head plus the segments trailing it
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    /// Trailing segments, nearest to the head first
    body: Vec<Position>,
    direction: Direction,
    /// Set once a turn was accepted; cleared by the next step
    turned: bool,
    dead: bool,
}

impl Snake {
    /// Create a snake of `length` cells with the body laid out behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let (dx, dy) = direction.opposite().delta();
        let mut body = Vec::with_capacity(length.saturating_sub(1));
        let mut prev = head;
        for _ in 1..length {
            prev = prev.moved_by(dx, dy);
            body.push(prev);
        }

        Self {
            head,
            body,
            direction,
            turned: false,
            dead: false,
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    /// Get body segments (excluding head)
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get the tail position (last segment, or the head for a lone head)
    pub fn tail(&self) -> Position {
        self.body.last().copied().unwrap_or(self.head)
    }

    /// All occupied cells, head first
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Get the length of the snake, head included
    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// A snake always has a head
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Request a new heading for the next step
    ///
    /// Ignored if it reverses the current direction or if a turn was already
    /// accepted since the last step. Returns whether the turn was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.turned || self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        self.turned = true;
        true
    }

    /// Advance one cell in the current direction
    ///
    /// Every segment takes the cell its predecessor held before this step.
    pub fn step(&mut self) {
        let mut vacated = self.head;
        self.head = self.head.moved_in_direction(self.direction);
        for segment in &mut self.body {
            vacated = std::mem::replace(segment, vacated);
        }
        self.turned = false;
    }

    /// Bring a head that left the grid back in on the opposite edge
    pub fn wrap_at_borders(&mut self, width: usize, height: usize) {
        self.head.x = self.head.x.rem_euclid(width as i32);
        self.head.y = self.head.y.rem_euclid(height as i32);
    }

    /// Mark the snake dead if its head ran into its own body
    pub fn check_self_collision(&mut self) -> bool {
        if self.body.contains(&self.head) {
            self.dead = true;
        }
        self.dead
    }

    /// Add one segment on top of the tail; the next step pulls it into place
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Check if position is covered by the head or any segment
    pub fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.body.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn consumes(&self, food: &Food) -> bool {
        self.head == food.position
    }
}

/// The single collectible on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Place food on a random free cell of a `width` x `height` grid
    pub fn spawn<R: Rng>(
        snake: &Snake,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Option<Self> {
        let mut food = Food::new(Position::new(-1, -1));
        food.relocate(snake, width, height, rng).then_some(food)
    }

    /// Move to a uniformly random cell not covered by the snake
    ///
    /// Returns false and stays put when the snake covers every cell.
    pub fn relocate<R: Rng>(
        &mut self,
        snake: &Snake,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> bool {
        let attempts = width * height * 4;
        for _ in 0..attempts {
            let pos = Position::new(
                rng.gen_range(0..width) as i32,
                rng.gen_range(0..height) as i32,
            );
            if !snake.occupies(pos) {
                self.position = pos;
                return true;
            }
        }

        // Nearly full grid: pick among the cells that are actually free
        let free = (0..height as i32)
            .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snake.occupies(pos))
            .choose(rng);
        match free {
            Some(pos) => {
                self.position = pos;
                true
            }
            None => false,
        }
    }
}

/// Lifecycle of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Intro,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// A round exists and is either running or paused
    pub fn is_live(&self) -> bool {
        matches!(self, GameStatus::Playing | GameStatus::Paused)
    }
}
