//! HTTP submission of finished transport orders

mod client;
mod traits;

pub use client::SubmissionClient;
pub use traits::SubmissionClientTrait;

#[cfg(test)]
pub use traits::MockSubmissionClientTrait;
