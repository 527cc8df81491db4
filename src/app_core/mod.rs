mod app;

pub use app::Kinescope;
