pub mod weather;

pub use weather::MockWeatherProvider;
