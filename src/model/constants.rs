// Default ruleset constants. The override layer in `config` starts from these values.

// Base value
pub const POINTS_PER_PLAYER: f64 = 0.5;
pub const MAX_BASE_VALUE: f64 = 32.0;
pub const RATED_PLAYER_THRESHOLD: u32 = 5;

// TVA (rating)
pub const RATING_TVA_COEFFICIENT: f64 = 0.000546875;
pub const RATING_TVA_OFFSET: f64 = 0.703125;
pub const RATING_TVA_MAX_VALUE: f64 = 25.0;
pub const PERFECT_RATING: f64 = 2000.0;
// TVA (ranking)
pub const RANKING_TVA_COEFFICIENT: f64 = -0.211675054;
pub const RANKING_TVA_OFFSET: f64 = 1.459827968;
pub const RANKING_TVA_MAX_VALUE: f64 = 50.0;
pub const TVA_MAX_PLAYERS_CONSIDERED: usize = 64;

// TGP
pub const BASE_GAME_VALUE: f64 = 0.04;
pub const MAX_TGP_WITHOUT_FINALS: f64 = 1.0;
pub const MAX_TGP_WITH_FINALS: f64 = 2.0;
pub const MIN_FINALISTS_PERCENT: f64 = 0.10;
pub const MAX_FINALISTS_PERCENT: f64 = 0.50;
pub const FOUR_PLAYER_GROUP_MULTIPLIER: f64 = 2.0;
pub const THREE_PLAYER_GROUP_MULTIPLIER: f64 = 1.5;
pub const UNLIMITED_BEST_GAME_MULTIPLIER: f64 = 2.0;
pub const HYBRID_BEST_GAME_MULTIPLIER: f64 = 3.0;
pub const UNLIMITED_CARD_MULTIPLIER: f64 = 4.0;
pub const PERCENT_PER_HOUR: f64 = 0.01;
pub const MAX_TIME_BONUS: f64 = 0.20;
pub const MIN_HOURS_FOR_MULTIPLIER: f64 = 20.0;
pub const FLIP_FRENZY_THREE_BALL_DIVISOR: f64 = 2.0;
pub const FLIP_FRENZY_ONE_BALL_DIVISOR: f64 = 3.0;

// Event boosters
pub const BOOSTER_NONE: f64 = 1.0;
pub const BOOSTER_CERTIFIED: f64 = 1.25;
pub const BOOSTER_CERTIFIED_PLUS: f64 = 1.5;
pub const BOOSTER_CHAMPIONSHIP_SERIES: f64 = 1.5;
pub const BOOSTER_MAJOR: f64 = 2.0;
pub const CERTIFIED_MIN_FINALISTS: u32 = 24;
pub const CERTIFIED_MAX_DURATION_DAYS: u32 = 4;
pub const CERTIFIED_PLUS_MIN_RATED_PLAYERS: u32 = 128;

// Point distribution
pub const LINEAR_PERCENTAGE: f64 = 0.1;
pub const DYNAMIC_PERCENTAGE: f64 = 0.9;
pub const POSITION_EXPONENT: f64 = 0.7;
pub const VALUE_EXPONENT: f64 = 3.0;
pub const MAX_DYNAMIC_PLAYERS: u32 = 64;

// Time decay
pub const DECAY_YEAR_0_TO_1: f64 = 1.0;
pub const DECAY_YEAR_1_TO_2: f64 = 0.75;
pub const DECAY_YEAR_2_TO_3: f64 = 0.5;
pub const DECAY_YEAR_3_PLUS: f64 = 0.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MILLISECONDS_PER_DAY: i64 = 86_400_000;

// Ranking
pub const TOP_EVENTS_COUNT: usize = 15;
pub const EFFICIENCY_RECENT_WINDOW: usize = 10;
pub const EFFICIENCY_TREND_THRESHOLD: f64 = 5.0;

// Rating
pub const DEFAULT_RATING: f64 = 1300.0;
pub const MIN_RD: f64 = 10.0;
pub const MAX_RD: f64 = 200.0;
pub const RD_DECAY_PER_DAY: f64 = 0.3;
pub const OPPONENTS_RANGE: usize = 32;
pub const PROVISIONAL_EVENT_THRESHOLD: u32 = 5;
pub const DEFAULT_RATING_SYSTEM: &str = "glicko";

// Validation
pub const MIN_PLAYERS: usize = 3;
pub const MAX_GAMES_PER_MACHINE: f64 = 3.0;
pub const MIN_PARTICIPATION_PERCENT: f64 = 0.5;
