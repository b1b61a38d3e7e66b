pub mod exchange;
pub mod metrics_manager;
pub mod notifier;
pub mod render;
pub mod session_manager;
pub mod transcript;
pub mod transport;
