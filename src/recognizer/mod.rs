pub mod http;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::RecognizerError;
use crate::models::Prediction;

pub use http::HttpRecognizer;

/// Body returned by the recognizer's detect endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectResponse {
    pub predictions: Vec<Prediction>,
}

/// External service turning an encoded still image into predictions.
///
/// An empty prediction list is a successful answer meaning "no note in
/// frame", not an error.
pub trait Recognizer {
    fn recognize(
        &self,
        frame: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<Prediction>, RecognizerError>>;
}
