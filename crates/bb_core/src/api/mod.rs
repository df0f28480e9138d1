pub mod json_api;

pub use json_api::{
    simulate_day_json, simulate_game_json, DayRequest, DayResponse, GameRequest, GameResponse,
    SCHEMA_VERSION,
};
