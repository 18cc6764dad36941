use game_core::{DirectionSource, PlayerType};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded serve direction generator
pub struct RandomDirection(StdRng);

impl RandomDirection {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl Default for RandomDirection {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl DirectionSource for RandomDirection {
    fn next_direction(&mut self, last_scorer: Option<PlayerType>) -> Vec2 {
        // Serve toward whoever was just scored against
        let x = match last_scorer {
            Some(PlayerType::Player1) => 1.0,
            Some(PlayerType::Player2) => -1.0,
            None => {
                if self.0.gen_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
        };
        let y = self.0.gen_range(-1.0f32..1.0);
        Vec2::new(x, y)
    }
}
