/// Default tuning parameters for a Pong session
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Field
    pub const FIELD_WIDTH: f32 = 20.0;
    pub const FIELD_HEIGHT: f32 = 10.0;

    // Paddle
    pub const PADDLE_SPEED: f32 = 5.0; // units per second
    pub const PADDLE_LENGTH: f32 = 2.0;

    // Ball
    pub const BALL_SPEED_INITIAL: f32 = 6.0;
    pub const BALL_SPEED_MAX: f32 = 15.0;
    pub const BALL_SPEED_STEP: f32 = 1.0; // Added on every paddle hit

    // Score
    pub const TARGET_SCORE: u32 = 3; // First to 3 wins

    // Seats
    pub const MAX_PLAYERS: usize = 2;
}
