//! Response normalization
//!
//! A 2xx response is parsed once into the requested type. Anything else
//! becomes `TmdbError::UpstreamStatus`, whose message reads
//! `API Error: <code> - <phrase>`, or `API Error: <code>` when the code has
//! no known phrase.

use crate::transport::TransportResponse;
use crate::{Result, TmdbError};
use serde::de::DeserializeOwned;

/// Turn a completed response into `T` or a failure
pub fn normalize<T: DeserializeOwned>(response: TransportResponse) -> Result<T> {
    if !response.status.is_success() {
        return Err(TmdbError::UpstreamStatus {
            status: response.status.as_u16(),
            status_text: response.status_text(),
        });
    }

    Ok(serde_json::from_slice(&response.body)?)
}
