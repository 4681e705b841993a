mod settings;

pub use settings::{
    save_api_token, save_api_token_to, ApiConfig, AudioConfig, Config, SessionConfig,
    API_TOKEN_ENV, API_URL_ENV, EXAMPLE_CONFIG,
};
