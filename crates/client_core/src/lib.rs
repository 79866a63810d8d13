//! Client side of the diabetes risk service: the form session state machine,
//! the HTTP gateway it talks through, and view-model helpers for front ends.

pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod presentation;
pub mod session;

pub use config::{load_settings, GatewaySettings};
pub use error::{PredictionError, SubmitError};
pub use form::FormInputs;
pub use gateway::{HttpPredictionGateway, PredictionGateway};
pub use session::{
    Screen, SessionController, SessionSnapshot, SessionView, SubmitOutcome, SubmitTicket,
};
