pub mod barcode;
pub mod metadata;
pub mod pipeline;
pub mod sealer;
pub mod token;

pub use crate::domain::model::{BookingPass, BookingWindow, OrderPayload};
pub use crate::domain::ports::Mailer;
pub use crate::utils::error::Result;
