use async_trait::async_trait;
use bytes::Bytes;

use crate::error::SynthesisError;
use crate::request::SynthesisRequest;

/// Something that turns a [`SynthesisRequest`] into encoded audio.
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SynthesisError>;
}

#[async_trait]
impl<T: SynthesisBackend + ?Sized> SynthesisBackend for &T {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Bytes, SynthesisError> {
        (**self).synthesize(request).await
    }
}
